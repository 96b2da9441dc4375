use crate::foundation::core::{Point, ScreenSize, Vec2};
use crate::foundation::error::{PlotError, PlotResult};

/// Smallest scale the viewport will zoom out to.
pub const MIN_SCALE: f64 = 1e-9;
/// Largest scale the viewport will zoom in to.
pub const MAX_SCALE: f64 = 1e9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomDirection {
    In,
    Out,
}

/// Multiplicative scale factors for one zoom step.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoomSteps {
    pub zoom_in: f64,
    pub zoom_out: f64,
}

impl ZoomSteps {
    pub fn validate(&self) -> PlotResult<()> {
        if !(self.zoom_in.is_finite() && self.zoom_in > 1.0) {
            return Err(PlotError::validation(format!(
                "zoom_in must be finite and > 1, got {}",
                self.zoom_in
            )));
        }
        if !(self.zoom_out > 0.0 && self.zoom_out < 1.0) {
            return Err(PlotError::validation(format!(
                "zoom_out must be in (0, 1), got {}",
                self.zoom_out
            )));
        }
        Ok(())
    }

    pub fn factor(&self, direction: ZoomDirection) -> f64 {
        match direction {
            ZoomDirection::In => self.zoom_in,
            ZoomDirection::Out => self.zoom_out,
        }
    }
}

impl Default for ZoomSteps {
    fn default() -> Self {
        Self {
            zoom_in: 1.1,
            zoom_out: 0.9,
        }
    }
}

/// Pan/zoom state. `scale` is always positive and finite.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ViewportState {
    scale: f64,
    offset: Vec2,
}

impl ViewportState {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

/// Invertible mapping between screen pixels and world coordinates.
///
/// With `c` the screen centre, `to_world(s) = s / scale + offset - c` and
/// `to_screen(w) = (w + c - offset) * scale`. At the default state the world origin sits on
/// the screen centre. Both axes grow the same way in both spaces; callers plotting
/// mathematical y (up) negate it first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    screen: ScreenSize,
    steps: ZoomSteps,
    state: ViewportState,
}

impl Viewport {
    pub fn new(screen: ScreenSize, steps: ZoomSteps) -> PlotResult<Self> {
        screen.validate()?;
        steps.validate()?;
        Ok(Self {
            screen,
            steps,
            state: ViewportState::default(),
        })
    }

    pub fn to_world(&self, s: Point) -> Point {
        let c = self.screen.center();
        Point::new(
            s.x / self.state.scale + self.state.offset.x - c.x,
            s.y / self.state.scale + self.state.offset.y - c.y,
        )
    }

    pub fn to_screen(&self, w: Point) -> Point {
        let c = self.screen.center();
        Point::new(
            (w.x + c.x - self.state.offset.x) * self.state.scale,
            (w.y + c.y - self.state.offset.y) * self.state.scale,
        )
    }

    /// Zoom one step keeping the world point under `cursor` fixed on screen.
    pub fn zoom_at(&mut self, cursor: Point, direction: ZoomDirection) {
        let before = self.to_world(cursor);
        let scale = (self.state.scale * self.steps.factor(direction)).clamp(MIN_SCALE, MAX_SCALE);
        if scale == self.state.scale {
            return;
        }
        self.state.scale = scale;
        let after = self.to_world(cursor);
        self.state.offset += before - after;
    }

    /// Move content by `delta` screen pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.state.offset -= delta / self.state.scale;
    }

    pub fn reset(&mut self) {
        self.state = ViewportState::default();
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn steps(&self) -> ZoomSteps {
        self.steps
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/viewport.rs"]
mod tests;
