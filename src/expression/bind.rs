use crate::expression::ast::{Expr, Lit};
use crate::expression::builtins::{BuiltinId, constant};
use crate::expression::error::ExprError;

pub(crate) struct BindCtx<'a> {
    /// Name of the single free variable.
    pub(crate) param: &'a str,
}

impl Default for BindCtx<'_> {
    fn default() -> Self {
        Self { param: "x" }
    }
}

/// Resolve identifiers and calls. The result contains no `Path` or `Call` nodes.
pub(crate) fn bind_expr(e: Expr, ctx: &BindCtx<'_>) -> Result<Expr, ExprError> {
    match e {
        Expr::Lit(_) | Expr::Param => Ok(e),
        Expr::Unary { op, expr } => Ok(Expr::Unary {
            op,
            expr: Box::new(bind_expr(*expr, ctx)?),
        }),
        Expr::Binary { op, left, right } => Ok(Expr::Binary {
            op,
            left: Box::new(bind_expr(*left, ctx)?),
            right: Box::new(bind_expr(*right, ctx)?),
        }),
        Expr::Cond {
            cond,
            then,
            otherwise,
        } => Ok(Expr::Cond {
            cond: Box::new(bind_expr(*cond, ctx)?),
            then: Box::new(bind_expr(*then, ctx)?),
            otherwise: Box::new(bind_expr(*otherwise, ctx)?),
        }),
        Expr::Call { func, args, at } => {
            let id = BuiltinId::from_name(&func)
                .ok_or_else(|| ExprError::new(at, format!("unknown function '{func}'")))?;
            if args.len() != id.arity() {
                return Err(ExprError::new(
                    at,
                    format!(
                        "{} expects {} argument{}, got {}",
                        id.name(),
                        id.arity(),
                        if id.arity() == 1 { "" } else { "s" },
                        args.len()
                    ),
                ));
            }
            let mut out_args = Vec::with_capacity(args.len());
            for a in args {
                out_args.push(bind_expr(a, ctx)?);
            }
            Ok(Expr::Builtin { id, args: out_args })
        }
        Expr::Builtin { id, args } => {
            let mut out_args = Vec::with_capacity(args.len());
            for a in args {
                out_args.push(bind_expr(a, ctx)?);
            }
            Ok(Expr::Builtin { id, args: out_args })
        }
        Expr::Path { segments, at } => bind_path(&segments, at, ctx),
    }
}

fn bind_path(p: &[String], at: usize, ctx: &BindCtx<'_>) -> Result<Expr, ExprError> {
    match p {
        [name] if name == ctx.param => Ok(Expr::Param),
        [name] => constant(name)
            .map(|v| Expr::Lit(Lit::F64(v)))
            .ok_or_else(|| ExprError::new(at, format!("unknown identifier '{name}'"))),
        [ns, name] if ns == "math" => constant(name)
            .map(|v| Expr::Lit(Lit::F64(v)))
            .ok_or_else(|| ExprError::new(at, format!("unknown constant 'math.{name}'"))),
        _ => Err(ExprError::new(
            at,
            format!("unknown identifier '{}'", p.join(".")),
        )),
    }
}
