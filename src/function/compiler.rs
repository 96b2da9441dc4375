use crate::expression::bind::{BindCtx, bind_expr};
use crate::expression::closure::{CompiledClosure, compile_closure};
use crate::expression::error::ExprError;
use crate::expression::lower::lower_to_bytecode;
use crate::expression::parser::parse_expr;
use crate::expression::vm::{ValueSlot, VmError, eval_program_with_stack};

/// Result of calling a compiled function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
}

impl Value {
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
        }
    }
}

impl From<ValueSlot> for Value {
    fn from(v: ValueSlot) -> Self {
        match v {
            ValueSlot::F64(v) => Self::Number(v),
            ValueSlot::Bool(v) => Self::Bool(v),
        }
    }
}

/// Source text that did not produce a callable.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("function source is empty")]
    Empty,

    #[error("function source is {len} bytes, limit is {limit}")]
    TooLong { len: usize, limit: usize },

    #[error(transparent)]
    Syntax(#[from] ExprError),
}

/// Failure of a single evaluation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Arithmetic outside its domain, such as division by zero or `sqrt` of a negative.
    #[error("{0}")]
    Domain(String),

    /// The function is ill-typed at this input, such as a boolean used as a number.
    #[error("{0}")]
    Runtime(String),

    /// The callable returned a value that is not a number.
    #[error("function returned a {0}, expected a number")]
    NonNumeric(&'static str),

    /// The callable returned NaN or an infinity.
    #[error("function returned non-finite value {0}")]
    NonFinite(f64),
}

impl From<VmError> for EvalError {
    fn from(e: VmError) -> Self {
        if e.domain {
            Self::Domain(e.message)
        } else {
            Self::Runtime(e.message)
        }
    }
}

/// A compiled `real -> real` callable.
///
/// Implementations own everything they need; a function stays valid after its compiler has
/// produced newer functions.
pub trait CompiledFunction {
    /// Evaluate at `x`. Errors are local to this call.
    fn call(&mut self, x: f64) -> Result<Value, EvalError>;
}

/// The compile-or-reject capability the function backend is built on.
///
/// A compiler may be invoked any number of times over a session; each call is a fresh compile.
pub trait FunctionCompiler {
    /// Short name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Compile a function body in terms of `x`.
    fn compile(&mut self, source: &str) -> Result<Box<dyn CompiledFunction>, CompileError>;
}

/// Available compiler backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Stack bytecode interpreted by a small VM.
    #[default]
    Bytecode,
    /// Tree of boxed closures.
    Closure,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bytecode => "bytecode",
            Self::Closure => "closure",
        }
    }
}

/// Create a compiler implementation.
pub fn create_compiler(kind: BackendKind) -> Box<dyn FunctionCompiler> {
    match kind {
        BackendKind::Bytecode => Box::new(BytecodeCompiler),
        BackendKind::Closure => Box::new(ClosureCompiler),
    }
}

fn parse_and_bind(source: &str) -> Result<crate::expression::ast::Expr, CompileError> {
    if source.trim().is_empty() {
        return Err(CompileError::Empty);
    }
    let ast = parse_expr(source)?;
    Ok(bind_expr(ast, &BindCtx::default())?)
}

/// Compiles to bytecode for the expression VM.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytecodeCompiler;

impl FunctionCompiler for BytecodeCompiler {
    fn name(&self) -> &'static str {
        BackendKind::Bytecode.as_str()
    }

    fn compile(&mut self, source: &str) -> Result<Box<dyn CompiledFunction>, CompileError> {
        let bound = parse_and_bind(source)?;
        let program = lower_to_bytecode(&bound)?;
        let stack = Vec::with_capacity(program.max_stack.max(1));
        Ok(Box::new(BytecodeFunction { program, stack }))
    }
}

struct BytecodeFunction {
    program: crate::expression::bytecode::BytecodeProgram,
    stack: Vec<ValueSlot>,
}

impl CompiledFunction for BytecodeFunction {
    fn call(&mut self, x: f64) -> Result<Value, EvalError> {
        Ok(eval_program_with_stack(&self.program, x, &mut self.stack)?.into())
    }
}

/// Compiles to a tree of closures.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClosureCompiler;

impl FunctionCompiler for ClosureCompiler {
    fn name(&self) -> &'static str {
        BackendKind::Closure.as_str()
    }

    fn compile(&mut self, source: &str) -> Result<Box<dyn CompiledFunction>, CompileError> {
        let bound = parse_and_bind(source)?;
        let f = compile_closure(&bound)?;
        Ok(Box::new(ClosureFunction { f }))
    }
}

struct ClosureFunction {
    f: CompiledClosure,
}

impl CompiledFunction for ClosureFunction {
    fn call(&mut self, x: f64) -> Result<Value, EvalError> {
        Ok((self.f)(x)?.into())
    }
}

/// The built-in default `x -> x²`, available without any compiler.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSquare;

impl BuiltinSquare {
    pub const SOURCE: &'static str = "x*x";
}

impl CompiledFunction for BuiltinSquare {
    fn call(&mut self, x: f64) -> Result<Value, EvalError> {
        Ok(Value::Number(x * x))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/function/compiler.rs"]
mod tests;
