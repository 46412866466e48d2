//! RGBA pixel buffer and sub-region types.
//!
//! Buffers are row-major with a **top-left origin**: row 0 is the top row
//! of the image and `y` grows downward. This matches PNG scanline order and
//! is the convention every analysis routine in this crate assumes.

use crate::error::BufferError;

/// Alpha values whose normalized value is at or below this threshold are
/// treated as transparent by default.
pub const DEFAULT_ALPHA_THRESHOLD: f32 = 0.01;

/// A single RGBA pixel, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba8 = Rgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// A fully opaque pixel.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba8 { r, g, b, a: 255 }
    }
}

/// A rectangular sub-region of a buffer, in buffer-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the rightmost column.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Intersection with a `width`x`height` buffer; may be empty.
    pub(crate) fn clamped_to(&self, width: u32, height: u32) -> Region {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Region {
            x,
            y,
            width: self.right().min(width) - x,
            height: self.bottom().min(height) - y,
        }
    }
}

/// An immutable RGBA8 image, row-major, top-left origin.
///
/// The length invariant `pixels.len() == width * height` is enforced at
/// construction; analysis functions never mutate a buffer in place, so a
/// valid buffer stays valid for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl PixelBuffer {
    /// Create a buffer filled with a single pixel value.
    pub fn filled(width: u32, height: u32, fill: Rgba8) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }
        let size = width as usize * height as usize;
        Ok(PixelBuffer {
            width,
            height,
            pixels: vec![fill; size],
        })
    }

    /// Create a fully transparent buffer.
    pub fn new_transparent(width: u32, height: u32) -> Result<Self, BufferError> {
        Self::filled(width, height, Rgba8::TRANSPARENT)
    }

    /// Create a buffer from decoded pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba8>) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(PixelBuffer {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer from raw interleaved RGBA8 bytes (4 bytes per pixel,
    /// rows top to bottom).
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| Rgba8 {
                r: p[0],
                g: p[1],
                b: p[2],
                a: p[3],
            })
            .collect();
        Ok(PixelBuffer {
            width,
            height,
            pixels,
        })
    }

    /// Internal constructor for buffers assembled pixel-by-pixel. Callers
    /// uphold the length invariant.
    pub(crate) fn from_vec_unchecked(width: u32, height: u32, pixels: Vec<Rgba8>) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        PixelBuffer {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgba8 {
        self.pixels[self.index(x, y)]
    }

    /// Alpha channel at the given coordinates.
    #[inline]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.pixels[self.index(x, y)].a
    }

    /// One row of pixels.
    #[inline]
    pub fn row(&self, y: u32) -> &[Rgba8] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// The full buffer as a region.
    pub fn full_region(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    /// Convert to interleaved RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        bytes
    }
}

/// Threshold in raw alpha bytes: a pixel is visible when `alpha > cutoff`.
#[inline]
pub(crate) fn alpha_cutoff(alpha_threshold: f32) -> f32 {
    alpha_threshold * 255.0
}
