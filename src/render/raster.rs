use crate::foundation::core::{Point, Rgba8};
use crate::function::backend::FunctionBackend;
use crate::render::frame::FrameBuffer;
use crate::transform::viewport::Viewport;

/// Colours used for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RasterStyle {
    pub background: Rgba8,
    pub axes: Rgba8,
    pub curve: Rgba8,
}

impl Default for RasterStyle {
    fn default() -> Self {
        Self {
            background: Rgba8::BLACK,
            axes: Rgba8::GREY,
            curve: Rgba8::WHITE,
        }
    }
}

/// One successful evaluation: the column it was taken at and the unclamped screen row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub column: u32,
    pub row: f64,
}

/// Counters for the last rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RasterStats {
    pub samples: u32,
    pub failed_columns: u32,
    pub curve_pixels: u64,
    pub curve_suppressed: bool,
}

/// Samples the active function once per pixel column and draws it with vertical gap filling.
#[derive(Debug, Default)]
pub struct CurveRasterizer {
    style: RasterStyle,
    samples: Vec<Sample>,
}

impl CurveRasterizer {
    pub fn new(style: RasterStyle) -> Self {
        Self {
            style,
            samples: Vec::new(),
        }
    }

    pub fn style(&self) -> RasterStyle {
        self.style
    }

    /// Samples taken during the last frame, in column order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Draw background, axes and (when the backend is usable) the curve into `fb`.
    #[tracing::instrument(skip_all, fields(function = backend.source()))]
    pub fn render(
        &mut self,
        viewport: &Viewport,
        backend: &mut FunctionBackend,
        fb: &mut FrameBuffer,
    ) -> RasterStats {
        fb.clear(self.style.background);
        self.draw_axes(viewport, fb);
        self.samples.clear();

        let mut stats = RasterStats::default();
        if !backend.is_usable() {
            stats.curve_suppressed = true;
            tracing::debug!(?stats, "curve suppressed");
            return stats;
        }

        for column in 0..fb.width() {
            let wx = viewport.to_world(Point::new(f64::from(column), 0.0)).x;
            let wy = match backend.evaluate(wx) {
                Ok(v) => v,
                Err(e) => {
                    tracing::trace!(column, wx, error = %e, "sample skipped");
                    stats.failed_columns += 1;
                    continue;
                }
            };
            let row = viewport.to_screen(Point::new(wx, -wy)).y;
            if row.is_nan() {
                stats.failed_columns += 1;
                continue;
            }
            self.samples.push(Sample { column, row });
        }
        stats.samples = self.samples.len() as u32;
        stats.curve_pixels = self.plot(fb);

        tracing::debug!(?stats, "frame rasterized");
        stats
    }

    fn draw_axes(&self, viewport: &Viewport, fb: &mut FrameBuffer) {
        let origin = viewport.to_screen(Point::ZERO);
        let (w, h) = (i64::from(fb.width()), i64::from(fb.height()));

        let row = origin.y.floor() as i64;
        if (0..h).contains(&row) {
            for x in 0..w {
                fb.put(x, row, self.style.axes);
            }
        }
        let col = origin.x.floor() as i64;
        if (0..w).contains(&col) {
            for y in 0..h {
                fb.put(col, y, self.style.axes);
            }
        }
    }

    fn plot(&self, fb: &mut FrameBuffer) -> u64 {
        let h = i64::from(fb.height());
        let color = self.style.curve;
        let mut written = 0u64;
        let mut prev: Option<Sample> = None;

        for &s in &self.samples {
            let x = i64::from(s.column);
            let cur = s.row.floor();
            match prev.filter(|p| p.column + 1 == s.column) {
                Some(p) => {
                    let last = p.row.floor();
                    let above = last < 0.0 && cur < 0.0;
                    let below = last >= h as f64 && cur >= h as f64;
                    if !(above || below) {
                        let (a, b) = (clamp_row(last, h), clamp_row(cur, h));
                        for y in a.min(b)..=a.max(b) {
                            written += u64::from(fb.put(x, y, color));
                        }
                    }
                }
                None => {
                    if cur >= 0.0 && cur < h as f64 {
                        written += u64::from(fb.put(x, cur as i64, color));
                    }
                }
            }
            prev = Some(s);
        }
        written
    }
}

fn clamp_row(row: f64, height: i64) -> i64 {
    row.clamp(0.0, (height - 1) as f64) as i64
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
