use crate::expression::builtins::BuiltinId;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Lit(Lit),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Cond {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// Unresolved call as written: `sin(x)`, `math.sqrt(x)`.
    Call {
        func: String,
        args: Vec<Expr>,
        at: usize,
    },
    /// A dotted identifier path as written: `x`, `pi`, `math.pi`.
    Path {
        segments: Vec<String>,
        at: usize,
    },
    /// Resolved reference to the free variable `x`.
    Param,
    /// Resolved builtin call with checked arity.
    Builtin {
        id: BuiltinId,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Lit {
    F64(f64),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}
