//! Builtin math functions and the checked arithmetic shared by both evaluators.

use std::f64::consts::{E, PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuiltinId {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Cbrt,
    Exp,
    Ln,
    Log10,
    Log2,
    Abs,
    Floor,
    Ceil,
    Round,
    Sign,
    Pow,
    Hypot,
    Min,
    Max,
    Clamp,
    Lerp,
}

impl BuiltinId {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "atan2" => Self::Atan2,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "exp" => Self::Exp,
            // `log` is the natural logarithm, as in Lua's `math.log`.
            "ln" | "log" => Self::Ln,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "abs" => Self::Abs,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "sign" => Self::Sign,
            "pow" => Self::Pow,
            "hypot" => Self::Hypot,
            "min" => Self::Min,
            "max" => Self::Max,
            "clamp" => Self::Clamp,
            "lerp" => Self::Lerp,
            _ => return None,
        })
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Atan2 => "atan2",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Sign => "sign",
            Self::Pow => "pow",
            Self::Hypot => "hypot",
            Self::Min => "min",
            Self::Max => "max",
            Self::Clamp => "clamp",
            Self::Lerp => "lerp",
        }
    }

    pub(crate) fn arity(self) -> usize {
        match self {
            Self::Atan2 | Self::Pow | Self::Hypot | Self::Min | Self::Max => 2,
            Self::Clamp | Self::Lerp => 3,
            _ => 1,
        }
    }

    /// Apply to already type-checked numeric arguments. `args.len()` must equal `arity()`.
    pub(crate) fn apply(self, args: &[f64]) -> Result<f64, String> {
        if args.len() != self.arity() {
            return Err(format!(
                "{} expects {} args, got {}",
                self.name(),
                self.arity(),
                args.len()
            ));
        }
        let a = args[0];
        Ok(match self {
            Self::Sin => a.sin(),
            Self::Cos => a.cos(),
            Self::Tan => a.tan(),
            Self::Asin => {
                unit_domain("asin", a)?;
                a.asin()
            }
            Self::Acos => {
                unit_domain("acos", a)?;
                a.acos()
            }
            Self::Atan => a.atan(),
            Self::Atan2 => a.atan2(args[1]),
            Self::Sinh => a.sinh(),
            Self::Cosh => a.cosh(),
            Self::Tanh => a.tanh(),
            Self::Sqrt => {
                if a < 0.0 {
                    return Err(format!("sqrt of negative number {a}"));
                }
                a.sqrt()
            }
            Self::Cbrt => a.cbrt(),
            Self::Exp => a.exp(),
            Self::Ln => positive_domain("ln", a)?.ln(),
            Self::Log10 => positive_domain("log10", a)?.log10(),
            Self::Log2 => positive_domain("log2", a)?.log2(),
            Self::Abs => a.abs(),
            Self::Floor => a.floor(),
            Self::Ceil => a.ceil(),
            Self::Round => a.round(),
            Self::Sign => {
                if a == 0.0 {
                    0.0
                } else {
                    a.signum()
                }
            }
            Self::Pow => pow(a, args[1])?,
            Self::Hypot => a.hypot(args[1]),
            Self::Min => a.min(args[1]),
            Self::Max => a.max(args[1]),
            Self::Clamp => {
                let (lo, hi) = (args[1], args[2]);
                if lo > hi || lo.is_nan() || hi.is_nan() {
                    return Err(format!("clamp bounds out of order: {lo} > {hi}"));
                }
                a.clamp(lo, hi)
            }
            Self::Lerp => a + (args[1] - a) * args[2],
        })
    }
}

/// Named constants: `pi`, `e`, `tau` (also reachable as `math.pi`).
pub(crate) fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(PI),
        "e" => Some(E),
        "tau" => Some(TAU),
        _ => None,
    }
}

pub(crate) fn div(a: f64, b: f64) -> Result<f64, String> {
    if b == 0.0 {
        return Err("division by zero".to_owned());
    }
    Ok(a / b)
}

/// Floored modulo (sign follows the divisor, as in Lua).
pub(crate) fn modulo(a: f64, b: f64) -> Result<f64, String> {
    if b == 0.0 {
        return Err("modulo by zero".to_owned());
    }
    Ok(a - (a / b).floor() * b)
}

pub(crate) fn pow(base: f64, exp: f64) -> Result<f64, String> {
    if base < 0.0 && exp.fract() != 0.0 && exp.is_finite() {
        return Err(format!(
            "negative base {base} raised to fractional power {exp}"
        ));
    }
    Ok(base.powf(exp))
}

fn unit_domain(name: &str, a: f64) -> Result<(), String> {
    if !(-1.0..=1.0).contains(&a) {
        return Err(format!("{name} argument {a} outside [-1, 1]"));
    }
    Ok(())
}

fn positive_domain(name: &str, a: f64) -> Result<f64, String> {
    if a <= 0.0 {
        return Err(format!("{name} of non-positive number {a}"));
    }
    Ok(a)
}
