//! Alpha-boundary cropping with pivot remapping.
//!
//! Cropping trims a buffer to its visible bounding box plus padding and
//! remaps a normalized pivot so that its absolute anchor point in the
//! original image is preserved exactly. Padding may push the crop window
//! outside the source buffer; out-of-range pixels read as fully
//! transparent.

use crate::bounds::compute_bounding_box;
use crate::buffer::{PixelBuffer, Rgba8, DEFAULT_ALPHA_THRESHOLD};

/// Per-side padding in pixels, applied outside the visible bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Padding {
    /// The same padding on all four sides.
    pub const fn uniform(amount: u32) -> Self {
        Padding {
            left: amount,
            right: amount,
            top: amount,
            bottom: amount,
        }
    }
}

/// A cropped buffer and the pivot remapped into its coordinate space.
///
/// The pivot is normalized to the new dimensions; it can fall outside
/// `[0, 1]` when the original anchor lies outside the crop window.
#[derive(Debug, Clone, PartialEq)]
pub struct CropResult {
    pub buffer: PixelBuffer,
    pub pivot: (f32, f32),
}

/// Crop window in source coordinates. `x`/`y` can be negative when padding
/// extends past the top-left corner.
struct CropWindow {
    x: i64,
    y: i64,
    width: u32,
    height: u32,
}

/// Crop a buffer to its visible content plus padding.
///
/// `pivot` is the normalized pivot of the *original* buffer; the returned
/// pivot anchors the same absolute point within the cropped buffer. A
/// fully transparent input produces a 1x1 transparent buffer with the
/// pivot reset to `(0.5, 0.5)`.
pub fn crop(buffer: &PixelBuffer, padding: Padding, pivot: (f32, f32)) -> CropResult {
    match crop_window(buffer, padding) {
        Some(window) => extract(buffer, &window, pivot),
        None => CropResult {
            // Invariant: 1x1 construction cannot fail.
            buffer: PixelBuffer::from_vec_unchecked(1, 1, vec![Rgba8::TRANSPARENT]),
            pivot: (0.5, 0.5),
        },
    }
}

/// Crop only when it would change the buffer.
///
/// Returns `None` when the padded crop window already covers exactly the
/// full buffer (or when nothing is visible and the buffer is already the
/// 1x1 transparent placeholder), so callers can skip churn on assets that
/// are already tight.
pub fn crop_if_needed(buffer: &PixelBuffer, padding: Padding, pivot: (f32, f32)) -> Option<CropResult> {
    match crop_window(buffer, padding) {
        Some(window) => {
            let identity = window.x == 0
                && window.y == 0
                && window.width == buffer.width()
                && window.height == buffer.height();
            if identity {
                None
            } else {
                Some(extract(buffer, &window, pivot))
            }
        }
        None => {
            if buffer.width() == 1 && buffer.height() == 1 {
                None
            } else {
                Some(crop(buffer, padding, pivot))
            }
        }
    }
}

fn crop_window(buffer: &PixelBuffer, padding: Padding) -> Option<CropWindow> {
    let bbox = compute_bounding_box(buffer, None, DEFAULT_ALPHA_THRESHOLD);
    if !bbox.has_visible_pixels {
        return None;
    }
    Some(CropWindow {
        x: bbox.min_x as i64 - padding.left as i64,
        y: bbox.min_y as i64 - padding.top as i64,
        width: bbox.width() + padding.left + padding.right,
        height: bbox.height() + padding.top + padding.bottom,
    })
}

fn extract(buffer: &PixelBuffer, window: &CropWindow, pivot: (f32, f32)) -> CropResult {
    let mut pixels = Vec::with_capacity(window.width as usize * window.height as usize);
    for y in 0..window.height as i64 {
        let sy = window.y + y;
        for x in 0..window.width as i64 {
            let sx = window.x + x;
            let in_bounds = sx >= 0
                && sy >= 0
                && sx < buffer.width() as i64
                && sy < buffer.height() as i64;
            pixels.push(if in_bounds {
                buffer.get(sx as u32, sy as u32)
            } else {
                Rgba8::TRANSPARENT
            });
        }
    }

    // Absolute anchor in source pixels, shifted by the window origin, then
    // re-normalized against the crop dimensions.
    let abs_x = pivot.0 as f64 * buffer.width() as f64;
    let abs_y = pivot.1 as f64 * buffer.height() as f64;
    let new_pivot = (
        ((abs_x - window.x as f64) / window.width as f64) as f32,
        ((abs_y - window.y as f64) / window.height as f64) as f32,
    );

    CropResult {
        buffer: PixelBuffer::from_vec_unchecked(window.width, window.height, pixels),
        pivot: new_pivot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Region;
    use crate::pivot::center_of_mass_pivot;

    fn sheet_with_square(w: u32, h: u32, x0: u32, y0: u32, size: u32) -> PixelBuffer {
        let mut pixels = vec![Rgba8::TRANSPARENT; w as usize * h as usize];
        for y in y0..y0 + size {
            for x in x0..x0 + size {
                pixels[y as usize * w as usize + x as usize] = Rgba8::opaque(200, 100, 50);
            }
        }
        PixelBuffer::from_pixels(w, h, pixels).unwrap()
    }

    #[test]
    fn crops_square_to_content() {
        let sheet = sheet_with_square(64, 64, 20, 20, 10);
        let result = crop(&sheet, Padding::default(), (0.5, 0.5));
        assert_eq!(result.buffer.width(), 10);
        assert_eq!(result.buffer.height(), 10);
        assert!(result.buffer.pixels().iter().all(|p| p.a == 255));

        // Center of mass of the crop is its geometric center.
        let full = Region::new(0, 0, 10, 10);
        let com = center_of_mass_pivot(&result.buffer, full, DEFAULT_ALPHA_THRESHOLD);
        assert!((com.0 - 0.5).abs() < 1e-6);
        assert!((com.1 - 0.5).abs() < 1e-6);
    }

    #[test]
    fn transparent_input_collapses_to_placeholder() {
        let sheet = PixelBuffer::new_transparent(16, 16).unwrap();
        let result = crop(&sheet, Padding::uniform(3), (0.1, 0.9));
        assert_eq!(result.buffer.width(), 1);
        assert_eq!(result.buffer.height(), 1);
        assert_eq!(result.buffer.get(0, 0), Rgba8::TRANSPARENT);
        assert_eq!(result.pivot, (0.5, 0.5));
    }

    #[test]
    fn padding_extends_past_the_source() {
        let sheet = sheet_with_square(8, 8, 0, 0, 8);
        let result = crop(&sheet, Padding::uniform(2), (0.5, 0.5));
        assert_eq!(result.buffer.width(), 12);
        assert_eq!(result.buffer.height(), 12);
        // Border ring reads transparent, interior stays opaque.
        assert_eq!(result.buffer.get(0, 0), Rgba8::TRANSPARENT);
        assert_eq!(result.buffer.get(11, 11), Rgba8::TRANSPARENT);
        assert_eq!(result.buffer.get(2, 2).a, 255);
    }

    #[test]
    fn pivot_anchor_is_preserved() {
        let sheet = sheet_with_square(64, 48, 11, 7, 13);
        let pivot = (0.3_f32, 0.8_f32);
        let result = crop(&sheet, Padding::default(), pivot);

        let abs_before = (pivot.0 as f64 * 64.0, pivot.1 as f64 * 48.0);
        let abs_after = (
            result.pivot.0 as f64 * result.buffer.width() as f64 + 11.0,
            result.pivot.1 as f64 * result.buffer.height() as f64 + 7.0,
        );
        assert!((abs_before.0 - abs_after.0).abs() < 1e-4);
        assert!((abs_before.1 - abs_after.1).abs() < 1e-4);
    }

    #[test]
    fn crop_is_idempotent_when_tight() {
        let sheet = sheet_with_square(64, 64, 20, 20, 10);
        let once = crop(&sheet, Padding::default(), (0.5, 0.5));
        let twice = crop(&once.buffer, Padding::default(), once.pivot);
        assert_eq!(once.buffer, twice.buffer);
        assert!((once.pivot.0 - twice.pivot.0).abs() < 1e-6);
        assert!((once.pivot.1 - twice.pivot.1).abs() < 1e-6);
    }

    #[test]
    fn crop_if_needed_skips_tight_buffers() {
        let tight = sheet_with_square(10, 10, 0, 0, 10);
        assert!(crop_if_needed(&tight, Padding::default(), (0.5, 0.5)).is_none());

        let loose = sheet_with_square(64, 64, 20, 20, 10);
        assert!(crop_if_needed(&loose, Padding::default(), (0.5, 0.5)).is_some());

        // Padding makes even a tight buffer grow.
        assert!(crop_if_needed(&tight, Padding::uniform(1), (0.5, 0.5)).is_some());
    }
}
