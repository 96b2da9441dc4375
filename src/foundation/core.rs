use crate::foundation::error::{PlotError, PlotResult};

pub use kurbo::{Point, Vec2};

/// Pixel dimensions of the presentation surface. Fixed for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    /// Size of the reference plotter window.
    pub const DEFAULT: Self = Self {
        width: 1200,
        height: 900,
    };

    pub fn new(width: u32, height: u32) -> PlotResult<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    pub fn validate(self) -> PlotResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlotError::validation(format!(
                "screen size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Screen centre `(W/2, H/2)`, used to re-centre world space.
    pub fn center(self) -> Vec2 {
        Vec2::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub fn contains(self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const GREY: Self = Self::new(0x73, 0x73, 0x73, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack from `0xRRGGBBAA`.
    pub const fn from_packed(v: u32) -> Self {
        let [r, g, b, a] = v.to_be_bytes();
        Self { r, g, b, a }
    }

    /// Pack into `0xRRGGBBAA`.
    pub const fn to_packed(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
