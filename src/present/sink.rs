use crate::foundation::error::PlotResult;
use crate::render::frame::FrameBuffer;

/// Surface that accepts finished frames.
///
/// `present` is called once per rendered frame, in order.
pub trait FramePresenter {
    fn present(&mut self, frame: &FrameBuffer) -> PlotResult<()>;
}

/// In-memory presenter for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryPresenter {
    /// Frames in presentation order.
    pub frames: Vec<FrameBuffer>,
}

impl InMemoryPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&FrameBuffer> {
        self.frames.last()
    }
}

impl FramePresenter for InMemoryPresenter {
    fn present(&mut self, frame: &FrameBuffer) -> PlotResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}
