use crate::expression::builtins::{self, BuiltinId};
use crate::expression::bytecode::{BytecodeProgram, ConstVal, Op};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ValueSlot {
    F64(f64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VmError {
    pub(crate) message: String,
    /// Well-typed arithmetic left its domain (division by zero, `sqrt` of a negative, ...).
    pub(crate) domain: bool,
}

impl VmError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            domain: false,
        }
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            domain: true,
        }
    }
}

impl std::fmt::Display for VmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vm error: {}", self.message)
    }
}

impl std::error::Error for VmError {}

impl ValueSlot {
    pub(crate) fn as_f64(self) -> Result<f64, VmError> {
        match self {
            Self::F64(v) => Ok(v),
            Self::Bool(_) => Err(VmError::new("expected number, got bool")),
        }
    }

    pub(crate) fn as_bool(self) -> Result<bool, VmError> {
        match self {
            Self::Bool(v) => Ok(v),
            Self::F64(_) => Err(VmError::new("expected bool, got number")),
        }
    }
}

#[cfg(test)]
pub(crate) fn eval_program(p: &BytecodeProgram, x: f64) -> Result<ValueSlot, VmError> {
    let mut stack: Vec<ValueSlot> = Vec::with_capacity(p.max_stack.max(1));
    eval_program_with_stack(p, x, &mut stack)
}

/// Run `p` with the free variable bound to `x`, reusing `stack` between calls.
pub(crate) fn eval_program_with_stack(
    p: &BytecodeProgram,
    x: f64,
    stack: &mut Vec<ValueSlot>,
) -> Result<ValueSlot, VmError> {
    stack.clear();
    let mut pc = 0usize;

    while let Some(&op) = p.ops.get(pc) {
        pc += 1;
        match op {
            Op::PushConst(idx) => {
                let c = p
                    .consts
                    .get(idx.0 as usize)
                    .ok_or_else(|| VmError::new("const idx out of range"))?;
                stack.push(match *c {
                    ConstVal::F64(v) => ValueSlot::F64(v),
                    ConstVal::Bool(v) => ValueSlot::Bool(v),
                });
            }
            Op::LoadParam => stack.push(ValueSlot::F64(x)),

            Op::Neg => {
                let v = pop_f64(stack)?;
                stack.push(ValueSlot::F64(-v));
            }
            Op::Not => {
                let v = pop_bool(stack)?;
                stack.push(ValueSlot::Bool(!v));
            }
            Op::Add => bin_f64(stack, |a, b| Ok(a + b))?,
            Op::Sub => bin_f64(stack, |a, b| Ok(a - b))?,
            Op::Mul => bin_f64(stack, |a, b| Ok(a * b))?,
            Op::Div => bin_f64(stack, builtins::div)?,
            Op::Mod => bin_f64(stack, builtins::modulo)?,
            Op::Pow => bin_f64(stack, builtins::pow)?,

            Op::Eq => bin_eq(stack, true)?,
            Op::Ne => bin_eq(stack, false)?,
            Op::Lt => bin_cmp(stack, |a, b| a < b)?,
            Op::Le => bin_cmp(stack, |a, b| a <= b)?,
            Op::Gt => bin_cmp(stack, |a, b| a > b)?,
            Op::Ge => bin_cmp(stack, |a, b| a >= b)?,

            Op::And => {
                let b = pop_bool(stack)?;
                let a = pop_bool(stack)?;
                stack.push(ValueSlot::Bool(a && b));
            }
            Op::Or => {
                let b = pop_bool(stack)?;
                let a = pop_bool(stack)?;
                stack.push(ValueSlot::Bool(a || b));
            }

            Op::CallBuiltin { id, argc } => call_builtin(stack, id, argc)?,

            Op::JumpIfFalse(target) => {
                if !pop_bool(stack)? {
                    pc = target as usize;
                }
            }
            Op::Jump(target) => pc = target as usize,
        }
    }

    if stack.len() != 1 {
        return Err(VmError::new(format!(
            "stack has {} values at end of program",
            stack.len()
        )));
    }
    stack.pop().ok_or_else(|| VmError::new("stack underflow"))
}

fn pop(stack: &mut Vec<ValueSlot>) -> Result<ValueSlot, VmError> {
    stack.pop().ok_or_else(|| VmError::new("stack underflow"))
}

fn pop_f64(stack: &mut Vec<ValueSlot>) -> Result<f64, VmError> {
    pop(stack)?.as_f64()
}

fn pop_bool(stack: &mut Vec<ValueSlot>) -> Result<bool, VmError> {
    pop(stack)?.as_bool()
}

fn bin_f64(
    stack: &mut Vec<ValueSlot>,
    f: impl FnOnce(f64, f64) -> Result<f64, String>,
) -> Result<(), VmError> {
    let b = pop_f64(stack)?;
    let a = pop_f64(stack)?;
    stack.push(ValueSlot::F64(f(a, b).map_err(VmError::domain)?));
    Ok(())
}

fn bin_cmp(stack: &mut Vec<ValueSlot>, f: impl FnOnce(f64, f64) -> bool) -> Result<(), VmError> {
    let b = pop_f64(stack)?;
    let a = pop_f64(stack)?;
    stack.push(ValueSlot::Bool(f(a, b)));
    Ok(())
}

fn bin_eq(stack: &mut Vec<ValueSlot>, is_eq: bool) -> Result<(), VmError> {
    let b = pop(stack)?;
    let a = pop(stack)?;

    let res = match (a, b) {
        (ValueSlot::Bool(a), ValueSlot::Bool(b)) => a == b,
        (a, b) => a.as_f64()? == b.as_f64()?,
    };

    stack.push(ValueSlot::Bool(if is_eq { res } else { !res }));
    Ok(())
}

fn call_builtin(stack: &mut Vec<ValueSlot>, id: BuiltinId, argc: u8) -> Result<(), VmError> {
    let argc = argc as usize;
    if stack.len() < argc {
        return Err(VmError::new("stack underflow in builtin call"));
    }

    let mut args = [0.0f64; 3];
    if argc > args.len() {
        return Err(VmError::new(format!("{} called with {argc} args", id.name())));
    }
    for slot in args[..argc].iter_mut().rev() {
        *slot = pop_f64(stack)?;
    }
    let v = id.apply(&args[..argc]).map_err(VmError::domain)?;
    stack.push(ValueSlot::F64(v));
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/expression/vm.rs"]
mod tests;
