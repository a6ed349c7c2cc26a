//! Per-key lighting bitmaps.
//!
//! The SDK lays out a keyboard as a 21×6 grid of BGRA pixels, row-major,
//! one pixel per key position.

use crate::error::{LogiLedError, Result};

use super::LinearColor;

pub const BITMAP_WIDTH: usize = 21;
pub const BITMAP_HEIGHT: usize = 6;
pub const BITMAP_BYTES_PER_PIXEL: usize = 4;
pub const BITMAP_SIZE: usize = BITMAP_WIDTH * BITMAP_HEIGHT * BITMAP_BYTES_PER_PIXEL;

/// RGBA image destined for per-key lighting. Any size is representable so
/// that callers can hand over whatever texture they have; only a
/// [`BITMAP_WIDTH`] × [`BITMAP_HEIGHT`] image is accepted by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightingBitmap {
    width: usize,
    height: usize,
    rgba: Vec<u8>,
}

impl LightingBitmap {
    /// Wrap raw RGBA pixel data. Fails if `rgba` is not `width * height * 4` bytes.
    pub fn from_rgba(width: usize, height: usize, rgba: Vec<u8>) -> Result<Self> {
        let expected = width * height * BITMAP_BYTES_PER_PIXEL;
        if rgba.len() != expected {
            return Err(LogiLedError::Bitmap(format!(
                "{width}x{height} RGBA needs {expected} bytes, got {}",
                rgba.len()
            )));
        }
        Ok(LightingBitmap {
            width,
            height,
            rgba,
        })
    }

    /// Device-sized bitmap with every pixel computed from its grid position.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> LinearColor) -> Self {
        let mut rgba = Vec::with_capacity(BITMAP_SIZE);
        for y in 0..BITMAP_HEIGHT {
            for x in 0..BITMAP_WIDTH {
                let [r, g, b] = f(x, y).to_rgb8();
                rgba.extend_from_slice(&[r, g, b, 0xFF]);
            }
        }
        LightingBitmap {
            width: BITMAP_WIDTH,
            height: BITMAP_HEIGHT,
            rgba,
        }
    }

    /// Device-sized bitmap of a single color.
    pub fn filled(color: LinearColor) -> Self {
        Self::from_fn(|_, _| color)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the bitmap matches the device grid.
    pub fn is_device_sized(&self) -> bool {
        self.width == BITMAP_WIDTH && self.height == BITMAP_HEIGHT
    }

    /// Pixel data reordered to the SDK's BGRA layout.
    pub fn to_bgra(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.rgba.len());
        for px in self.rgba.chunks_exact(BITMAP_BYTES_PER_PIXEL) {
            out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
        }
        out
    }
}
