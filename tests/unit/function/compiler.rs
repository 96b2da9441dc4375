use super::*;

fn both() -> [Box<dyn FunctionCompiler>; 2] {
    [
        create_compiler(BackendKind::Bytecode),
        create_compiler(BackendKind::Closure),
    ]
}

#[test]
fn backends_agree_on_values() {
    let sources = [
        "x*x",
        "sin(x) * 100",
        "x < 0 ? -x : sqrt(x)",
        "2^x % 7",
        "clamp(lerp(x, 10, 0.5), -3, 3)",
        "math.hypot(x, 4) - tau",
    ];
    for src in sources {
        let [mut a, mut b] = both();
        let mut fa = a.compile(src).unwrap();
        let mut fb = b.compile(src).unwrap();
        for x in [-3.0, -0.5, 0.0, 1.0, 2.5] {
            assert_eq!(fa.call(x), fb.call(x), "{src} at {x}");
        }
    }
}

#[test]
fn compile_errors_are_reported_by_both_backends() {
    for mut c in both() {
        assert_eq!(c.compile("  ").err(), Some(CompileError::Empty));
        assert!(matches!(c.compile("x +"), Err(CompileError::Syntax(_))));
        assert!(matches!(c.compile("foo(x)"), Err(CompileError::Syntax(_))));
        assert!(matches!(c.compile("y"), Err(CompileError::Syntax(_))));
    }
}

#[test]
fn runtime_errors_surface_as_eval_errors() {
    for mut c in both() {
        let mut f = c.compile("1 / x").unwrap();
        assert_eq!(
            f.call(0.0),
            Err(EvalError::Domain("division by zero".to_owned()))
        );
        assert_eq!(f.call(2.0), Ok(Value::Number(0.5)));

        let mut g = c.compile("x + (x > 0)").unwrap();
        assert!(matches!(g.call(1.0), Err(EvalError::Runtime(_))));
    }
}

#[test]
fn boolean_results_keep_their_type() {
    for mut c in both() {
        let mut f = c.compile("x > 0").unwrap();
        let v = f.call(1.0).unwrap();
        assert_eq!(v, Value::Bool(true));
        assert_eq!(v.type_name(), "boolean");
    }
}

#[test]
fn compiled_functions_outlive_later_compiles() {
    let mut c = create_compiler(BackendKind::Closure);
    let mut first = c.compile("x + 1").unwrap();
    let mut second = c.compile("x + 2").unwrap();
    assert_eq!(first.call(1.0), Ok(Value::Number(2.0)));
    assert_eq!(second.call(1.0), Ok(Value::Number(3.0)));
}

#[test]
fn builtin_square() {
    let mut f = BuiltinSquare;
    assert_eq!(f.call(3.0), Ok(Value::Number(9.0)));
    assert_eq!(f.call(-2.0), Ok(Value::Number(4.0)));
}

#[test]
fn backend_kind_names_and_serde() {
    assert_eq!(create_compiler(BackendKind::Bytecode).name(), "bytecode");
    assert_eq!(create_compiler(BackendKind::Closure).name(), "closure");
    let k: BackendKind = serde_json::from_str("\"closure\"").unwrap();
    assert_eq!(k, BackendKind::Closure);
    assert_eq!(BackendKind::default(), BackendKind::Bytecode);
}
