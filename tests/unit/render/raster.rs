use super::*;
use crate::foundation::core::{ScreenSize, Vec2};
use crate::function::backend::BackendOpts;
use crate::function::compiler::BackendKind;
use crate::transform::viewport::{ZoomDirection, ZoomSteps};

struct Rig {
    viewport: Viewport,
    backend: FunctionBackend,
    fb: FrameBuffer,
    raster: CurveRasterizer,
}

impl Rig {
    fn new() -> Self {
        Self::with_screen(ScreenSize::DEFAULT)
    }

    fn with_screen(screen: ScreenSize) -> Self {
        Self {
            viewport: Viewport::new(screen, ZoomSteps::default()).unwrap(),
            backend: FunctionBackend::with_kind(BackendKind::Bytecode, BackendOpts::default())
                .unwrap(),
            fb: FrameBuffer::new(screen),
            raster: CurveRasterizer::default(),
        }
    }

    fn define(&mut self, src: &str) {
        self.backend.try_redefine(src).unwrap();
    }

    fn render(&mut self) -> RasterStats {
        self.raster
            .render(&self.viewport, &mut self.backend, &mut self.fb)
    }

    fn curve_rows(&self, column: i64) -> Vec<i64> {
        (0..i64::from(self.fb.height()))
            .filter(|&y| self.fb.get(column, y) == Some(Rgba8::WHITE))
            .collect()
    }
}

#[test]
fn axes_cross_at_screen_centre_by_default() {
    let mut rig = Rig::new();
    rig.define("-1000");
    rig.render();
    assert_eq!(rig.fb.get(0, 450), Some(Rgba8::GREY));
    assert_eq!(rig.fb.get(1199, 450), Some(Rgba8::GREY));
    assert_eq!(rig.fb.get(600, 0), Some(Rgba8::GREY));
    assert_eq!(rig.fb.get(600, 899), Some(Rgba8::GREY));
    assert_eq!(rig.fb.get(10, 10), Some(Rgba8::BLACK));
}

#[test]
fn axes_outside_the_frame_are_skipped() {
    let mut rig = Rig::new();
    rig.viewport.pan_by(Vec2::new(5000.0, 5000.0));
    rig.define("-1000000");
    rig.render();
    assert_eq!(rig.fb.count(Rgba8::GREY), 0);
    assert_eq!(rig.fb.rejected_writes(), 0);
}

#[test]
fn default_parabola_passes_through_origin() {
    let mut rig = Rig::new();
    let stats = rig.render();
    assert_eq!(stats.samples, 1200);
    assert_eq!(stats.failed_columns, 0);
    assert!(!stats.curve_suppressed);
    // x = 0 maps to column 600, y = 0 to row 450.
    assert!(rig.curve_rows(600).contains(&450));
    // f(10) = 100, so column 610 reaches row 350.
    assert!(rig.curve_rows(610).contains(&350));
    assert_eq!(rig.raster.samples()[600].row, 450.0);
}

#[test]
fn step_discontinuity_is_filled_vertically() {
    let mut rig = Rig::new();
    rig.define("x < 0 ? 0 : 300");
    rig.render();
    let rows = rig.curve_rows(600);
    assert_eq!(rows, (150..=450).collect::<Vec<_>>());
    assert_eq!(rig.curve_rows(599), vec![450]);
    assert_eq!(rig.curve_rows(601), vec![150]);
}

#[test]
fn steep_descent_leaves_no_gaps() {
    let mut rig = Rig::new();
    rig.define("-50 * x");
    rig.render();
    for column in 590..610 {
        let rows = rig.curve_rows(column);
        if rows.is_empty() {
            continue;
        }
        let span = rows[rows.len() - 1] - rows[0] + 1;
        assert_eq!(span as usize, rows.len(), "gap in column {column}");
    }
    // Consecutive samples differ by 50 rows; each column covers the whole jump.
    assert_eq!(rig.curve_rows(600).len(), 51);
}

#[test]
fn unusable_backend_draws_only_axes() {
    let mut rig = Rig::new();
    rig.backend.try_redefine("x +").unwrap_err();
    let stats = rig.render();
    assert!(stats.curve_suppressed);
    assert_eq!(stats.samples, 0);
    assert_eq!(rig.fb.count(Rgba8::WHITE), 0);
    assert_eq!(rig.fb.count(Rgba8::GREY), 1200 + 900 - 1);
    assert!(rig.raster.samples().is_empty());
}

#[test]
fn failing_columns_are_skipped_and_break_the_fill() {
    let mut rig = Rig::new();
    rig.define("sqrt(x) * 10");
    let stats = rig.render();
    assert_eq!(stats.failed_columns, 600);
    assert_eq!(stats.samples, 600);
    assert!(rig.curve_rows(599).is_empty());
    // First sample has no predecessor: a single pixel on the axis row.
    assert_eq!(rig.curve_rows(600), vec![450]);
}

#[test]
fn curve_off_the_same_edge_draws_nothing() {
    let mut rig = Rig::new();
    rig.define("1000000 + x");
    let stats = rig.render();
    assert_eq!(stats.samples, 1200);
    assert_eq!(stats.curve_pixels, 0);
    assert_eq!(rig.fb.count(Rgba8::WHITE), 0);
}

#[test]
fn crossing_the_frame_between_columns_is_clamped() {
    let mut rig = Rig::new();
    // Jumps from far below to far above the frame at x = 0.
    rig.define("x < 0 ? -100000 : 100000");
    rig.render();
    assert_eq!(rig.curve_rows(600), (0..900).collect::<Vec<_>>());
    assert_eq!(rig.fb.rejected_writes(), 0);
}

#[test]
fn never_writes_out_of_bounds_across_views() {
    let mut rig = Rig::with_screen(ScreenSize::new(160, 120).unwrap());
    let sources = ["x*x", "tan(x)", "1 / x", "x < 0 ? -1e300 : 1e300", "sin(x) * 1e6"];
    for src in sources {
        rig.define(src);
        rig.viewport.reset();
        let mut scale_steps = 0;
        while rig.viewport.state().scale() > 0.01 {
            rig.viewport
                .zoom_at(Point::new(3.0, 117.0), ZoomDirection::Out);
            scale_steps += 1;
            if scale_steps % 5 == 0 {
                rig.render();
            }
        }
        while rig.viewport.state().scale() < 100.0 {
            rig.viewport
                .zoom_at(Point::new(150.0, 4.0), ZoomDirection::In);
            rig.render();
        }
        rig.viewport.pan_by(Vec2::new(1e7, -1e7));
        rig.render();
        rig.viewport.pan_by(Vec2::new(-3e7, 5e7));
        rig.render();
    }
    assert_eq!(rig.fb.rejected_writes(), 0);
}
