use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::ScreenSize;
use crate::foundation::error::{PlotError, PlotResult};
use crate::function::backend::BackendOpts;
use crate::function::compiler::BackendKind;
use crate::render::raster::RasterStyle;
use crate::transform::viewport::ZoomSteps;

/// Session configuration, as read from JSON.
///
/// Every field is optional in the file; missing fields take the defaults of the reference
/// plotter (1200x900 screen, zoom steps 1.1/0.9, bytecode compiler, smoke test at 1.0,
/// sources up to 128 bytes).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    pub screen: ScreenSize,
    pub zoom: ZoomSteps,
    pub backend: BackendKind,
    pub smoke_x: f64,
    pub max_source_len: usize,
    pub style: RasterStyle,
    /// Redefinition applied when the session starts. `None` keeps the built-in `x*x`.
    pub initial_function: Option<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            screen: ScreenSize::DEFAULT,
            zoom: ZoomSteps::default(),
            backend: BackendKind::default(),
            smoke_x: BackendOpts::DEFAULT_SMOKE_X,
            max_source_len: BackendOpts::DEFAULT_MAX_SOURCE_LEN,
            style: RasterStyle::default(),
            initial_function: None,
        }
    }
}

impl PlotConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> PlotResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| PlotError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> PlotResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| PlotError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PlotResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PlotError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PlotError::serde(e.to_string()))
    }

    pub fn validate(&self) -> PlotResult<()> {
        self.screen.validate()?;
        self.zoom.validate()?;
        self.backend_opts().validate()
    }

    pub fn backend_opts(&self) -> BackendOpts {
        BackendOpts {
            smoke_x: self.smoke_x,
            max_source_len: self.max_source_len,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
