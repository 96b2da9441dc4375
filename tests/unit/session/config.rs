use super::*;
use crate::foundation::core::Rgba8;

#[test]
fn empty_object_gives_defaults() {
    let cfg = PlotConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, PlotConfig::default());
    assert_eq!(cfg.screen, ScreenSize::DEFAULT);
    assert_eq!(cfg.zoom, ZoomSteps::default());
    assert_eq!(cfg.backend, BackendKind::Bytecode);
    assert_eq!(cfg.smoke_x, 1.0);
    assert_eq!(cfg.max_source_len, 128);
    assert_eq!(cfg.initial_function, None);
}

#[test]
fn fields_override_defaults() {
    let cfg = PlotConfig::from_json_str(
        r#"{
            "screen": { "width": 320, "height": 240 },
            "zoom": { "zoom_in": 1.25, "zoom_out": 0.8 },
            "backend": "closure",
            "smoke_x": 0.5,
            "initial_function": "sin(x) * 50"
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.screen, ScreenSize::new(320, 240).unwrap());
    assert_eq!(cfg.zoom.zoom_in, 1.25);
    assert_eq!(cfg.backend, BackendKind::Closure);
    assert_eq!(cfg.backend_opts().smoke_x, 0.5);
    assert_eq!(cfg.initial_function.as_deref(), Some("sin(x) * 50"));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = PlotConfig::from_json_str(r#"{ "scren": { "width": 1, "height": 1 } }"#).unwrap_err();
    assert!(matches!(err, PlotError::Serde(_)), "{err}");
}

#[test]
fn invalid_values_fail_validation() {
    for json in [
        r#"{ "screen": { "width": 0, "height": 10 } }"#,
        r#"{ "zoom": { "zoom_in": 0.5, "zoom_out": 0.9 } }"#,
        r#"{ "max_source_len": 0 }"#,
        r#"{ "max_source_len": 1000000 }"#,
    ] {
        let err = PlotConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, PlotError::Validation(_)), "{json}: {err}");
    }
}

#[test]
fn json_round_trips() {
    let mut cfg = PlotConfig::default();
    cfg.style.curve = Rgba8::new(255, 0, 0, 255);
    let json = cfg.to_json_pretty().unwrap();
    assert_eq!(PlotConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = PlotConfig::from_path("/nonexistent/fplot.json").unwrap_err();
    assert!(err.to_string().contains("open config JSON"));
}
