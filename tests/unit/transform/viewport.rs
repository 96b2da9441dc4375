use super::*;

const EPS: f64 = 1e-9;

fn viewport() -> Viewport {
    Viewport::new(ScreenSize::DEFAULT, ZoomSteps::default()).unwrap()
}

fn assert_close(a: Point, b: Point, eps: f64) {
    assert!(
        (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps,
        "{a:?} != {b:?} (eps {eps})"
    );
}

#[test]
fn default_view_centres_the_world_origin() {
    let v = viewport();
    assert_close(v.to_screen(Point::ZERO), Point::new(600.0, 450.0), EPS);
    assert_close(v.to_world(Point::new(600.0, 450.0)), Point::ZERO, EPS);
    assert_close(v.to_world(Point::ZERO), Point::new(-600.0, -450.0), EPS);
}

#[test]
fn round_trip_holds_across_zoom_and_pan() {
    let mut v = viewport();
    let points = [
        Point::new(0.0, 0.0),
        Point::new(1199.0, 899.0),
        Point::new(317.5, 12.25),
        Point::new(-40.0, 2000.0),
    ];
    for step in 0..40 {
        if step % 3 == 0 {
            v.pan_by(Vec2::new(13.0, -7.5));
        }
        let dir = if step < 25 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        };
        v.zoom_at(Point::new(100.0 + step as f64, 50.0), dir);
        for p in points {
            assert_close(v.to_screen(v.to_world(p)), p, 1e-6);
        }
    }
}

#[test]
fn zoom_keeps_the_point_under_the_cursor() {
    let mut v = viewport();
    let cursor = Point::new(250.0, 700.0);
    for dir in [ZoomDirection::In, ZoomDirection::In, ZoomDirection::Out] {
        let before = v.to_world(cursor);
        v.zoom_at(cursor, dir);
        assert_close(v.to_world(cursor), before, 1e-9);
        assert_close(v.to_screen(before), cursor, 1e-6);
    }
    assert!((v.state().scale() - 1.1 * 1.1 * 0.9).abs() < EPS);
}

#[test]
fn pan_moves_content_by_exactly_delta_at_any_scale() {
    let mut v = viewport();
    for _ in 0..7 {
        v.zoom_at(Point::new(600.0, 450.0), ZoomDirection::In);
    }
    let w = Point::new(3.5, -2.0);
    let before = v.to_screen(w);
    let d = Vec2::new(42.0, -17.0);
    v.pan_by(d);
    assert_close(v.to_screen(w), before + d, 1e-9);
}

#[test]
fn reset_restores_the_default_state() {
    let mut v = viewport();
    v.pan_by(Vec2::new(10.0, 10.0));
    v.zoom_at(Point::new(5.0, 5.0), ZoomDirection::Out);
    v.reset();
    assert_eq!(v.state(), ViewportState::default());
}

#[test]
fn scale_is_clamped_and_stays_finite() {
    let mut v = viewport();
    for _ in 0..1000 {
        v.zoom_at(Point::new(600.0, 450.0), ZoomDirection::Out);
    }
    assert_eq!(v.state().scale(), MIN_SCALE);
    assert!(v.state().offset().x.is_finite());

    v.reset();
    for _ in 0..1000 {
        v.zoom_at(Point::new(600.0, 450.0), ZoomDirection::In);
    }
    assert_eq!(v.state().scale(), MAX_SCALE);
}

#[test]
fn zoom_steps_are_validated() {
    let bad_in = ZoomSteps {
        zoom_in: 1.0,
        zoom_out: 0.9,
    };
    assert!(Viewport::new(ScreenSize::DEFAULT, bad_in).is_err());
    let bad_out = ZoomSteps {
        zoom_in: 1.1,
        zoom_out: 1.0,
    };
    assert!(bad_out.validate().is_err());
    assert_eq!(ZoomSteps::default().factor(ZoomDirection::Out), 0.9);
}
