//! fplot is an interactive 2D function plotter engine.
//!
//! The user types the body of a function `f(x)`; the engine keeps a pan/zoom viewport over the
//! plane and redraws the curve once per pixel column, filling vertical gaps so steep and
//! discontinuous functions stay connected. The public surface is session-oriented:
//!
//! - Build a [`PlotSession`] from a [`PlotConfig`]
//! - Feed it [`InputEvent`]s (drag, wheel, submitted text), or console lines via
//!   [`parse_command`]
//! - Present frames to a [`FramePresenter`] such as [`PngPresenter`]
//!
//! Function redefinitions are compile, smoke-test, then swap: a rejected candidate never
//! replaces the active function. See [`FunctionBackend::try_redefine`].
#![forbid(unsafe_code)]

mod expression;
mod foundation;

/// Function compilation and the compile–validate–swap backend.
pub mod function;
/// Presentation surfaces.
pub mod present;
/// Frame buffer and curve rasterizer.
pub mod render;
/// Sessions, input events, console commands and configuration.
pub mod session;
/// Screen/world viewport transform.
pub mod transform;

pub use crate::expression::error::ExprError;
pub use crate::foundation::core::{Point, Rgba8, ScreenSize, Vec2};
pub use crate::foundation::error::{PlotError, PlotResult, RedefineError};

pub use crate::function::backend::{BackendOpts, FunctionBackend, FunctionState};
pub use crate::function::compiler::{
    BackendKind, BuiltinSquare, BytecodeCompiler, ClosureCompiler, CompileError,
    CompiledFunction, EvalError, FunctionCompiler, Value, create_compiler,
};
pub use crate::present::png::{PngPresenter, write_png};
pub use crate::present::sink::{FramePresenter, InMemoryPresenter};
pub use crate::render::frame::FrameBuffer;
pub use crate::render::raster::{CurveRasterizer, RasterStats, RasterStyle, Sample};
pub use crate::session::config::PlotConfig;
pub use crate::session::console::{ConsoleCommand, HELP, parse_command};
pub use crate::session::engine::{EventOutcome, PlotSession, SessionStatus};
pub use crate::session::events::InputEvent;
pub use crate::transform::viewport::{
    MAX_SCALE, MIN_SCALE, Viewport, ViewportState, ZoomDirection, ZoomSteps,
};
