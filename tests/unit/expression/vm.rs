use super::*;
use crate::expression::bind::{BindCtx, bind_expr};
use crate::expression::lower::lower_to_bytecode;
use crate::expression::parser::parse_expr;

fn program(src: &str) -> BytecodeProgram {
    let bound = bind_expr(parse_expr(src).unwrap(), &BindCtx::default()).unwrap();
    lower_to_bytecode(&bound).unwrap()
}

fn eval(src: &str, x: f64) -> Result<ValueSlot, VmError> {
    eval_program(&program(src), x)
}

fn num(src: &str, x: f64) -> f64 {
    eval(src, x).unwrap().as_f64().unwrap()
}

#[test]
fn arithmetic_and_precedence() {
    assert_eq!(num("x * x", 3.0), 9.0);
    assert_eq!(num("1 + 2 * x", 4.0), 9.0);
    assert_eq!(num("-x^2", 3.0), -9.0);
    assert_eq!(num("2^3^2", 0.0), 512.0);
    assert_eq!(num("-7 % 3", 0.0), 2.0);
}

#[test]
fn conditionals_pick_one_branch() {
    assert_eq!(num("x < 0 ? 0 : 300", -1.0), 0.0);
    assert_eq!(num("x < 0 ? 0 : 300", 0.0), 300.0);
    // The untaken branch would fail.
    assert_eq!(num("x == 0 ? 1 : 1 / x", 0.0), 1.0);
}

#[test]
fn builtins_and_constants() {
    assert!((num("sin(pi / 2)", 0.0) - 1.0).abs() < 1e-12);
    assert!((num("math.sqrt(x)", 16.0) - 4.0).abs() < 1e-12);
    assert_eq!(num("clamp(x, 0, 1)", 5.0), 1.0);
    assert_eq!(num("max(x, 2)", 1.0), 2.0);
    assert!((num("log(e)", 0.0) - 1.0).abs() < 1e-12);
}

#[test]
fn boolean_results_are_returned_as_bools() {
    assert_eq!(eval("x > 0", 1.0).unwrap(), ValueSlot::Bool(true));
    assert_eq!(eval("!(x > 0) || false", 1.0).unwrap(), ValueSlot::Bool(false));
}

#[test]
fn runtime_errors_are_values_not_panics() {
    assert_eq!(eval("1 / x", 0.0).unwrap_err().message, "division by zero");
    assert!(eval("sqrt(x)", -1.0).unwrap_err().message.contains("sqrt"));
    assert!(eval("ln(x)", 0.0).unwrap_err().message.contains("non-positive"));
    assert!(eval("x ^ 0.5", -4.0).unwrap_err().message.contains("fractional"));
    assert!(eval("true + 1", 0.0).is_err());
    assert!(eval("x ? 1 : 2", 1.0).is_err());
}

#[test]
fn domain_errors_are_marked_apart_from_type_errors() {
    assert!(eval("1 / x", 0.0).unwrap_err().domain);
    assert!(eval("acos(x)", 2.0).unwrap_err().domain);
    assert!(!eval("true + 1", 0.0).unwrap_err().domain);
    assert!(!eval("x ? 1 : 2", 1.0).unwrap_err().domain);
}

#[test]
fn stack_is_reused_between_calls() {
    let p = program("x * x + 1");
    let mut stack = Vec::new();
    for x in [0.0, 1.0, 2.0] {
        let v = eval_program_with_stack(&p, x, &mut stack).unwrap();
        assert_eq!(v, ValueSlot::F64(x * x + 1.0));
    }
    assert!(stack.capacity() >= p.max_stack);
}
