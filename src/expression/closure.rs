//! Closure-tree compilation: each bound node becomes a boxed closure over its children.

use crate::expression::ast::{BinaryOp, Expr, Lit, UnaryOp};
use crate::expression::builtins;
use crate::expression::error::ExprError;
use crate::expression::vm::{ValueSlot, VmError};

pub(crate) type CompiledClosure = Box<dyn Fn(f64) -> Result<ValueSlot, VmError>>;

pub(crate) fn compile_closure(expr: &Expr) -> Result<CompiledClosure, ExprError> {
    let compiled: CompiledClosure = match expr {
        Expr::Lit(lit) => {
            let v = match *lit {
                Lit::F64(v) => ValueSlot::F64(v),
                Lit::Bool(v) => ValueSlot::Bool(v),
            };
            Box::new(move |_| Ok(v))
        }
        Expr::Param => Box::new(|x| Ok(ValueSlot::F64(x))),
        Expr::Unary { op, expr } => {
            let inner = compile_closure(expr)?;
            match op {
                UnaryOp::Neg => Box::new(move |x| Ok(ValueSlot::F64(-inner(x)?.as_f64()?))),
                UnaryOp::Not => Box::new(move |x| Ok(ValueSlot::Bool(!inner(x)?.as_bool()?))),
            }
        }
        Expr::Binary { op, left, right } => {
            let l = compile_closure(left)?;
            let r = compile_closure(right)?;
            compile_binary(*op, l, r)
        }
        Expr::Cond {
            cond,
            then,
            otherwise,
        } => {
            let c = compile_closure(cond)?;
            let t = compile_closure(then)?;
            let o = compile_closure(otherwise)?;
            Box::new(move |x| if c(x)?.as_bool()? { t(x) } else { o(x) })
        }
        Expr::Builtin { id, args } => {
            let id = *id;
            let args = args
                .iter()
                .map(compile_closure)
                .collect::<Result<Vec<_>, _>>()?;
            Box::new(move |x| {
                let mut vals = [0.0f64; 3];
                for (slot, a) in vals.iter_mut().zip(&args) {
                    *slot = a(x)?.as_f64()?;
                }
                let n = args.len().min(vals.len());
                id.apply(&vals[..n])
                    .map(ValueSlot::F64)
                    .map_err(VmError::domain)
            })
        }
        Expr::Call { at, .. } | Expr::Path { at, .. } => {
            return Err(ExprError::new(
                *at,
                "unresolved reference in closure compile; bind first",
            ));
        }
    };
    Ok(compiled)
}

fn compile_binary(op: BinaryOp, l: CompiledClosure, r: CompiledClosure) -> CompiledClosure {
    fn arith(
        l: CompiledClosure,
        r: CompiledClosure,
        f: fn(f64, f64) -> Result<f64, String>,
    ) -> CompiledClosure {
        Box::new(move |x| {
            let a = l(x)?.as_f64()?;
            let b = r(x)?.as_f64()?;
            f(a, b).map(ValueSlot::F64).map_err(VmError::domain)
        })
    }

    fn cmp(l: CompiledClosure, r: CompiledClosure, f: fn(f64, f64) -> bool) -> CompiledClosure {
        Box::new(move |x| {
            let a = l(x)?.as_f64()?;
            let b = r(x)?.as_f64()?;
            Ok(ValueSlot::Bool(f(a, b)))
        })
    }

    fn eq(l: CompiledClosure, r: CompiledClosure, is_eq: bool) -> CompiledClosure {
        Box::new(move |x| {
            let res = match (l(x)?, r(x)?) {
                (ValueSlot::Bool(a), ValueSlot::Bool(b)) => a == b,
                (a, b) => a.as_f64()? == b.as_f64()?,
            };
            Ok(ValueSlot::Bool(res == is_eq))
        })
    }

    fn logic(l: CompiledClosure, r: CompiledClosure, f: fn(bool, bool) -> bool) -> CompiledClosure {
        // Both sides are evaluated, matching the bytecode VM.
        Box::new(move |x| {
            let a = l(x)?.as_bool()?;
            let b = r(x)?.as_bool()?;
            Ok(ValueSlot::Bool(f(a, b)))
        })
    }

    match op {
        BinaryOp::Add => arith(l, r, |a, b| Ok(a + b)),
        BinaryOp::Sub => arith(l, r, |a, b| Ok(a - b)),
        BinaryOp::Mul => arith(l, r, |a, b| Ok(a * b)),
        BinaryOp::Div => arith(l, r, builtins::div),
        BinaryOp::Mod => arith(l, r, builtins::modulo),
        BinaryOp::Pow => arith(l, r, builtins::pow),
        BinaryOp::Eq => eq(l, r, true),
        BinaryOp::Ne => eq(l, r, false),
        BinaryOp::Lt => cmp(l, r, |a, b| a < b),
        BinaryOp::Le => cmp(l, r, |a, b| a <= b),
        BinaryOp::Gt => cmp(l, r, |a, b| a > b),
        BinaryOp::Ge => cmp(l, r, |a, b| a >= b),
        BinaryOp::And => logic(l, r, |a, b| a && b),
        BinaryOp::Or => logic(l, r, |a, b| a || b),
    }
}
