//! Packed RGB output buffer.

use std::path::Path;

use image::{ImageResult, Rgb, RgbImage};

/// `width x height` pixels packed as `0x00RRGGBB`, row-major, top-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Get the packed pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Get the pixel at (x, y) as 8-bit channels.
    pub fn rgb(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.get(x, y).map(unpack_rgb)
    }

    /// Clear to black.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Convert to an `image` buffer for saving or inspection.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            Rgb(self.rgb(x, y).unwrap_or([0, 0, 0]))
        })
    }

    /// Write the buffer to disk. The format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let path = path.as_ref();
        self.to_image().save(path)?;
        log::info!("Saved {}x{} snapshot to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Pack 8-bit channels as `0x00RRGGBB`.
#[inline]
pub fn pack_rgb([r, g, b]: [u8; 3]) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Inverse of [`pack_rgb`].
#[inline]
pub fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8]
}
