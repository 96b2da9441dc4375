use crate::transform::viewport::ZoomDirection;

/// Input delivered to a [`crate::PlotSession`], in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer position in screen pixels.
    PointerMoved { x: f64, y: f64 },
    /// Primary button down; starts a drag.
    PointerPressed,
    PointerReleased,
    /// One wheel notch, zooming at the last pointer position.
    Wheel(ZoomDirection),
    /// Submitted function text.
    Submit(String),
    ResetView,
    Quit,
}

impl InputEvent {
    pub fn pointer_moved(x: f64, y: f64) -> Self {
        Self::PointerMoved { x, y }
    }

    pub fn submit(text: impl Into<String>) -> Self {
        Self::Submit(text.into())
    }
}
