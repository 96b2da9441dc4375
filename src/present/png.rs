use std::path::{Path, PathBuf};

use crate::foundation::error::{PlotError, PlotResult};
use crate::present::sink::FramePresenter;
use crate::render::frame::FrameBuffer;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Target {
    /// Rewritten on every frame.
    File(PathBuf),
    /// `frame_00000.png`, `frame_00001.png`, ...
    Sequence(PathBuf),
}

/// Writes frames as PNG files.
#[derive(Clone, Debug)]
pub struct PngPresenter {
    target: Target,
    presented: u64,
}

impl PngPresenter {
    /// Overwrite `path` with each new frame.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            target: Target::File(path.into()),
            presented: 0,
        }
    }

    /// Write one numbered file per frame into `dir`.
    pub fn sequence(dir: impl Into<PathBuf>) -> Self {
        Self {
            target: Target::Sequence(dir.into()),
            presented: 0,
        }
    }

    /// Frames written so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Path the next frame will be written to.
    pub fn next_path(&self) -> PathBuf {
        match &self.target {
            Target::File(p) => p.clone(),
            Target::Sequence(dir) => dir.join(format!("frame_{:05}.png", self.presented)),
        }
    }
}

impl FramePresenter for PngPresenter {
    fn present(&mut self, frame: &FrameBuffer) -> PlotResult<()> {
        let path = self.next_path();
        write_png(&path, frame)?;
        tracing::debug!(path = %path.display(), "frame written");
        self.presented += 1;
        Ok(())
    }
}

/// Encode `frame` as an RGBA8 PNG at `path`, creating parent directories as needed.
pub fn write_png(path: &Path, frame: &FrameBuffer) -> PlotResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            PlotError::present(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }

    image::save_buffer_with_format(
        path,
        &frame.to_rgba8(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| PlotError::present(format!("write png '{}': {e}", path.display())))
}
