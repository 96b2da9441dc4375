use crate::foundation::core::{Rgba8, ScreenSize};

/// Row-major frame of packed `0xRRGGBBAA` pixels.
///
/// Writes go through [`FrameBuffer::put`], which drops and counts anything outside the frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    size: ScreenSize,
    pixels: Vec<u32>,
    rejected_writes: u64,
}

impl FrameBuffer {
    pub fn new(size: ScreenSize) -> Self {
        Self {
            size,
            pixels: vec![Rgba8::BLACK.to_packed(); size.pixel_count()],
            rejected_writes: 0,
        }
    }

    pub fn size(&self) -> ScreenSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn clear(&mut self, color: Rgba8) {
        self.pixels.fill(color.to_packed());
    }

    /// Write one pixel. Returns `false` (and counts the attempt) if `(x, y)` is off-frame.
    pub fn put(&mut self, x: i64, y: i64, color: Rgba8) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color.to_packed();
                true
            }
            None => {
                self.rejected_writes += 1;
                false
            }
        }
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Rgba8> {
        self.index(x, y).map(|i| Rgba8::from_packed(self.pixels[i]))
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if !self.size.contains(x, y) {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    /// Out-of-frame writes attempted since creation.
    pub fn rejected_writes(&self) -> u64 {
        self.rejected_writes
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Number of pixels equal to `color`.
    pub fn count(&self, color: Rgba8) -> usize {
        let packed = color.to_packed();
        self.pixels.iter().filter(|&&p| p == packed).count()
    }

    /// Straight RGBA8 bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            out.extend_from_slice(&p.to_be_bytes());
        }
        out
    }
}
