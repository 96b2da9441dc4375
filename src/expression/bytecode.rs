use crate::expression::builtins::BuiltinId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ConstIdx(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ConstVal {
    F64(f64),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    PushConst(ConstIdx),
    LoadParam,

    Neg,
    Not,
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

    CallBuiltin { id: BuiltinId, argc: u8 },

    /// Pop a bool; jump to the absolute op index when it is false.
    JumpIfFalse(u32),
    Jump(u32),
}

#[derive(Debug, Clone)]
pub(crate) struct BytecodeProgram {
    pub(crate) ops: Vec<Op>,
    pub(crate) consts: Vec<ConstVal>,
    /// Deepest stack the program can reach; used to pre-size the VM stack.
    pub(crate) max_stack: usize,
}

impl BytecodeProgram {
    pub(crate) fn new() -> Self {
        Self {
            ops: Vec::new(),
            consts: Vec::new(),
            max_stack: 0,
        }
    }

    pub(crate) fn push_const(&mut self, c: ConstVal) -> ConstIdx {
        let idx = ConstIdx(self.consts.len() as u32);
        self.consts.push(c);
        idx
    }

    pub(crate) fn next_index(&self) -> u32 {
        self.ops.len() as u32
    }
}
