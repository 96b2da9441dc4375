use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{PlotResult, RedefineError};
use crate::function::backend::{FunctionBackend, FunctionState};
use crate::present::sink::FramePresenter;
use crate::render::frame::FrameBuffer;
use crate::render::raster::{CurveRasterizer, RasterStats};
use crate::session::config::PlotConfig;
use crate::session::events::InputEvent;
use crate::transform::viewport::{Viewport, ViewportState, ZoomDirection};

/// What a single [`InputEvent`] did to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum EventOutcome {
    /// Nothing visible changed.
    Unchanged,
    /// A drag moved the content by this many screen pixels.
    Panned(Vec2),
    Zoomed { direction: ZoomDirection, scale: f64 },
    /// A new function was swapped in.
    Redefined { revision: u64 },
    /// The submitted text was refused; the previous function stays active.
    Rejected(RedefineError),
    ViewReset,
    Quit,
}

/// Snapshot of session state for status reporting.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SessionStatus {
    pub source: String,
    pub state: FunctionState,
    pub revision: u64,
    pub compiler: &'static str,
    pub scale: f64,
    pub offset: (f64, f64),
    pub last_error: Option<String>,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            FunctionState::Usable => "usable",
            FunctionState::Unusable => "unusable",
        };
        write!(
            f,
            "f(x) = {} [{state}, rev {}, {}] scale={} offset=({}, {})",
            self.source, self.revision, self.compiler, self.scale, self.offset.0, self.offset.1
        )?;
        if let Some(err) = &self.last_error {
            write!(f, " last_error: {err}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct RenderKey {
    view: ViewportState,
    revision: u64,
    usable: bool,
}

/// Interactive plotting session: one viewport, one function backend, one frame.
///
/// Events are applied in order. Frames are re-rasterized only when the view or the function
/// changed since the last one.
#[derive(Debug)]
pub struct PlotSession {
    viewport: Viewport,
    backend: FunctionBackend,
    rasterizer: CurveRasterizer,
    frame: FrameBuffer,
    pointer: Point,
    dragging: bool,
    quit: bool,
    rendered: Option<RenderKey>,
    last_stats: RasterStats,
}

impl PlotSession {
    /// Build a session from `config`, applying its initial function if it has one.
    pub fn new(config: &PlotConfig) -> PlotResult<Self> {
        config.validate()?;
        let viewport = Viewport::new(config.screen, config.zoom)?;
        let backend = FunctionBackend::with_kind(config.backend, config.backend_opts())?;
        let mut session = Self::from_parts(viewport, backend, CurveRasterizer::new(config.style));
        if let Some(src) = &config.initial_function {
            session.backend.try_redefine(src)?;
        }
        Ok(session)
    }

    pub fn from_parts(
        viewport: Viewport,
        backend: FunctionBackend,
        rasterizer: CurveRasterizer,
    ) -> Self {
        let screen = viewport.screen();
        Self {
            viewport,
            backend,
            rasterizer,
            frame: FrameBuffer::new(screen),
            pointer: Point::ZERO,
            dragging: false,
            quit: false,
            rendered: None,
            last_stats: RasterStats::default(),
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        match event {
            InputEvent::PointerMoved { x, y } => {
                let next = Point::new(x, y);
                let delta = next - self.pointer;
                self.pointer = next;
                if self.dragging && delta != Vec2::ZERO {
                    self.viewport.pan_by(delta);
                    EventOutcome::Panned(delta)
                } else {
                    EventOutcome::Unchanged
                }
            }
            InputEvent::PointerPressed => {
                self.dragging = true;
                EventOutcome::Unchanged
            }
            InputEvent::PointerReleased => {
                self.dragging = false;
                EventOutcome::Unchanged
            }
            InputEvent::Wheel(direction) => {
                self.viewport.zoom_at(self.pointer, direction);
                EventOutcome::Zoomed {
                    direction,
                    scale: self.viewport.state().scale(),
                }
            }
            InputEvent::Submit(text) => match self.backend.try_redefine(&text) {
                Ok(()) => EventOutcome::Redefined {
                    revision: self.backend.revision(),
                },
                Err(e) => EventOutcome::Rejected(e),
            },
            InputEvent::ResetView => {
                self.viewport.reset();
                EventOutcome::ViewReset
            }
            InputEvent::Quit => {
                self.quit = true;
                EventOutcome::Quit
            }
        }
    }

    /// Apply events in order, stopping after a `Quit`.
    pub fn drain(&mut self, events: impl IntoIterator<Item = InputEvent>) -> Vec<EventOutcome> {
        let mut out = Vec::new();
        for ev in events {
            if self.quit {
                break;
            }
            out.push(self.handle_event(ev));
        }
        out
    }

    /// Rasterize if anything changed since the last frame. Returns whether it did.
    pub fn render(&mut self) -> bool {
        let key = self.render_key();
        if self.rendered == Some(key) {
            return false;
        }
        self.last_stats = self
            .rasterizer
            .render(&self.viewport, &mut self.backend, &mut self.frame);
        self.rendered = Some(key);
        true
    }

    /// Render (if needed) and hand the current frame to `presenter`.
    pub fn present(&mut self, presenter: &mut dyn FramePresenter) -> PlotResult<()> {
        self.render();
        presenter.present(&self.frame)
    }

    fn render_key(&self) -> RenderKey {
        RenderKey {
            view: self.viewport.state(),
            revision: self.backend.revision(),
            usable: self.backend.is_usable(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        let view = self.viewport.state();
        SessionStatus {
            source: self.backend.source().to_owned(),
            state: self.backend.state(),
            revision: self.backend.revision(),
            compiler: self.backend.compiler_name(),
            scale: view.scale(),
            offset: (view.offset().x, view.offset().y),
            last_error: self.backend.last_error().map(ToString::to_string),
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn backend(&self) -> &FunctionBackend {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut FunctionBackend {
        &mut self.backend
    }

    pub fn rasterizer(&self) -> &CurveRasterizer {
        &self.rasterizer
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn is_quit(&self) -> bool {
        self.quit
    }

    /// Stats of the most recent rasterization.
    pub fn last_stats(&self) -> RasterStats {
        self.last_stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/engine.rs"]
mod tests;
