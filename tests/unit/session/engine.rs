use super::*;
use crate::present::sink::InMemoryPresenter;

fn session() -> PlotSession {
    PlotSession::new(&PlotConfig::default()).unwrap()
}

#[test]
fn drag_pans_by_pointer_delta() {
    let mut s = session();
    s.handle_event(InputEvent::pointer_moved(100.0, 100.0));
    assert_eq!(s.handle_event(InputEvent::PointerPressed), EventOutcome::Unchanged);
    let before = s.viewport().to_screen(Point::ZERO);
    assert_eq!(
        s.handle_event(InputEvent::pointer_moved(130.0, 90.0)),
        EventOutcome::Panned(Vec2::new(30.0, -10.0))
    );
    let after = s.viewport().to_screen(Point::ZERO);
    assert_eq!(after - before, Vec2::new(30.0, -10.0));

    s.handle_event(InputEvent::PointerReleased);
    assert_eq!(
        s.handle_event(InputEvent::pointer_moved(0.0, 0.0)),
        EventOutcome::Unchanged
    );
}

#[test]
fn wheel_zooms_at_last_pointer_position() {
    let mut s = session();
    s.handle_event(InputEvent::pointer_moved(200.0, 300.0));
    let anchor = s.viewport().to_world(Point::new(200.0, 300.0));
    let out = s.handle_event(InputEvent::Wheel(ZoomDirection::In));
    assert!(matches!(out, EventOutcome::Zoomed { direction: ZoomDirection::In, .. }));
    let now = s.viewport().to_world(Point::new(200.0, 300.0));
    assert!((now - anchor).hypot() < 1e-9);
}

#[test]
fn submit_reports_acceptance_and_rejection() {
    let mut s = session();
    assert_eq!(
        s.handle_event(InputEvent::submit("x + 1")),
        EventOutcome::Redefined { revision: 1 }
    );
    match s.handle_event(InputEvent::submit("x +")) {
        EventOutcome::Rejected(e) => assert_eq!(e.kind(), "CompileError"),
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(!s.backend().is_usable());
    assert_eq!(s.backend().source(), "x + 1");
}

#[test]
fn render_only_when_something_changed() {
    let mut s = session();
    assert!(s.render());
    assert!(!s.render());

    s.drain([
        InputEvent::pointer_moved(10.0, 10.0),
        InputEvent::Wheel(ZoomDirection::Out),
    ]);
    assert!(s.render());
    assert!(!s.render());

    s.handle_event(InputEvent::submit("2*x"));
    assert!(s.render());

    // Rejection flips usability, which suppresses the curve.
    s.handle_event(InputEvent::submit("bogus("));
    assert!(s.render());
    assert!(s.last_stats().curve_suppressed);
    assert!(!s.render());

    s.handle_event(InputEvent::ResetView);
    assert!(s.render());
}

#[test]
fn drain_stops_after_quit() {
    let mut s = session();
    let outcomes = s.drain([
        InputEvent::ResetView,
        InputEvent::Quit,
        InputEvent::submit("x"),
    ]);
    assert_eq!(outcomes, vec![EventOutcome::ViewReset, EventOutcome::Quit]);
    assert!(s.is_quit());
    assert_eq!(s.backend().revision(), 0);
}

#[test]
fn present_hands_frames_to_the_presenter() {
    let mut s = session();
    let mut presenter = InMemoryPresenter::new();
    s.present(&mut presenter).unwrap();
    s.present(&mut presenter).unwrap();
    assert_eq!(presenter.frames.len(), 2);
    assert_eq!(presenter.frames[0], presenter.frames[1]);
    let frame = presenter.last().unwrap();
    assert_eq!((frame.width(), frame.height()), (1200, 900));
}

#[test]
fn initial_function_is_applied_or_rejected() {
    let cfg = PlotConfig {
        initial_function: Some("x / 2".to_owned()),
        ..PlotConfig::default()
    };
    let s = PlotSession::new(&cfg).unwrap();
    assert_eq!(s.backend().revision(), 1);

    let bad = PlotConfig {
        initial_function: Some("x > 1".to_owned()),
        ..PlotConfig::default()
    };
    assert!(matches!(
        PlotSession::new(&bad),
        Err(crate::foundation::error::PlotError::Redefine(_))
    ));
}

#[test]
fn status_reports_function_and_view() {
    let mut s = session();
    s.handle_event(InputEvent::submit("x +"));
    let st = s.status();
    assert_eq!(st.source, "x*x");
    assert_eq!(st.state, FunctionState::Unusable);
    assert_eq!(st.compiler, "bytecode");
    assert_eq!(st.scale, 1.0);
    let line = st.to_string();
    assert!(line.starts_with("f(x) = x*x [unusable, rev 0, bytecode]"), "{line}");
    assert!(line.contains("last_error: compile error"), "{line}");
}
