use crate::expression::ast::{BinaryOp, Expr, Lit, UnaryOp};
use crate::expression::bytecode::{BytecodeProgram, ConstVal, Op};
use crate::expression::error::ExprError;

/// Lower a bound expression to stack bytecode.
pub(crate) fn lower_to_bytecode(expr: &Expr) -> Result<BytecodeProgram, ExprError> {
    let mut p = BytecodeProgram::new();
    let mut depth = StackDepth::default();
    lower_expr(expr, &mut p, &mut depth)?;
    p.max_stack = depth.max;
    Ok(p)
}

#[derive(Default)]
struct StackDepth {
    cur: usize,
    max: usize,
}

impl StackDepth {
    fn push(&mut self) {
        self.cur += 1;
        self.max = self.max.max(self.cur);
    }

    fn pop(&mut self, n: usize) {
        self.cur = self.cur.saturating_sub(n);
    }
}

fn lower_expr(
    e: &Expr,
    out: &mut BytecodeProgram,
    depth: &mut StackDepth,
) -> Result<(), ExprError> {
    match e {
        Expr::Lit(lit) => {
            let c = match *lit {
                Lit::F64(v) => ConstVal::F64(v),
                Lit::Bool(v) => ConstVal::Bool(v),
            };
            let idx = out.push_const(c);
            out.ops.push(Op::PushConst(idx));
            depth.push();
            Ok(())
        }
        Expr::Param => {
            out.ops.push(Op::LoadParam);
            depth.push();
            Ok(())
        }
        Expr::Unary { op, expr } => {
            lower_expr(expr, out, depth)?;
            out.ops.push(match op {
                UnaryOp::Neg => Op::Neg,
                UnaryOp::Not => Op::Not,
            });
            Ok(())
        }
        Expr::Binary { op, left, right } => {
            lower_expr(left, out, depth)?;
            lower_expr(right, out, depth)?;
            out.ops.push(match op {
                BinaryOp::Add => Op::Add,
                BinaryOp::Sub => Op::Sub,
                BinaryOp::Mul => Op::Mul,
                BinaryOp::Div => Op::Div,
                BinaryOp::Mod => Op::Mod,
                BinaryOp::Pow => Op::Pow,
                BinaryOp::Eq => Op::Eq,
                BinaryOp::Ne => Op::Ne,
                BinaryOp::Lt => Op::Lt,
                BinaryOp::Le => Op::Le,
                BinaryOp::Gt => Op::Gt,
                BinaryOp::Ge => Op::Ge,
                BinaryOp::And => Op::And,
                BinaryOp::Or => Op::Or,
            });
            depth.pop(1);
            Ok(())
        }
        Expr::Cond {
            cond,
            then,
            otherwise,
        } => {
            lower_expr(cond, out, depth)?;
            let jump_else = out.next_index();
            out.ops.push(Op::JumpIfFalse(0));
            depth.pop(1);

            lower_expr(then, out, depth)?;
            let jump_end = out.next_index();
            out.ops.push(Op::Jump(0));
            // Only one branch's value is ever on the stack.
            depth.pop(1);

            out.ops[jump_else as usize] = Op::JumpIfFalse(out.next_index());
            lower_expr(otherwise, out, depth)?;
            out.ops[jump_end as usize] = Op::Jump(out.next_index());
            Ok(())
        }
        Expr::Builtin { id, args } => {
            for a in args {
                lower_expr(a, out, depth)?;
            }
            let argc = u8::try_from(args.len())
                .map_err(|_| ExprError::new(0, "too many builtin arguments"))?;
            out.ops.push(Op::CallBuiltin { id: *id, argc });
            depth.pop(args.len());
            depth.push();
            Ok(())
        }
        Expr::Call { at, .. } | Expr::Path { at, .. } => Err(ExprError::new(
            *at,
            "unresolved reference in lowering; bind before lowering",
        )),
    }
}
