//! Visible bounding box computation.
//!
//! A pixel is "visible" when its normalized alpha exceeds the threshold.
//! The scan is a pure min/max reduction, so rows can be processed in any
//! order; large regions fan out over rayon and merge per-row results.

use rayon::prelude::*;

use crate::buffer::{alpha_cutoff, PixelBuffer, Region};
use crate::PARALLEL_PIXEL_THRESHOLD;

/// The tight bounding box of visible pixels, inclusive on all sides.
///
/// When `has_visible_pixels` is false the coordinates are all zero and the
/// box has no area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    pub has_visible_pixels: bool,
}

impl BoundingBox {
    /// The box returned for fully transparent input.
    pub const fn empty() -> Self {
        BoundingBox {
            min_x: 0,
            min_y: 0,
            max_x: 0,
            max_y: 0,
            has_visible_pixels: false,
        }
    }

    /// Width in pixels; zero when nothing is visible.
    pub fn width(&self) -> u32 {
        if self.has_visible_pixels {
            self.max_x - self.min_x + 1
        } else {
            0
        }
    }

    /// Height in pixels; zero when nothing is visible.
    pub fn height(&self) -> u32 {
        if self.has_visible_pixels {
            self.max_y - self.min_y + 1
        } else {
            0
        }
    }
}

/// Compute the tight bounding box of visible pixels.
///
/// `region` restricts the scan to a sub-rectangle (clamped to the buffer);
/// `None` scans the whole buffer. An all-transparent input yields
/// [`BoundingBox::empty`], never an error.
pub fn compute_bounding_box(
    buffer: &PixelBuffer,
    region: Option<Region>,
    alpha_threshold: f32,
) -> BoundingBox {
    let region = region
        .map(|r| r.clamped_to(buffer.width(), buffer.height()))
        .unwrap_or_else(|| buffer.full_region());
    if region.is_empty() {
        return BoundingBox::empty();
    }

    let cutoff = alpha_cutoff(alpha_threshold);

    // (min_x, max_x, y) per row with at least one visible pixel.
    let row_spans: Vec<(u32, u32, u32)> = if region.area() >= PARALLEL_PIXEL_THRESHOLD {
        (region.y..region.bottom())
            .into_par_iter()
            .filter_map(|y| scan_row(buffer, &region, cutoff, y).map(|(lo, hi)| (lo, hi, y)))
            .collect()
    } else {
        (region.y..region.bottom())
            .filter_map(|y| scan_row(buffer, &region, cutoff, y).map(|(lo, hi)| (lo, hi, y)))
            .collect()
    };

    let mut bbox = BoundingBox::empty();
    for (lo, hi, y) in row_spans {
        if !bbox.has_visible_pixels {
            bbox = BoundingBox {
                min_x: lo,
                min_y: y,
                max_x: hi,
                max_y: y,
                has_visible_pixels: true,
            };
        } else {
            bbox.min_x = bbox.min_x.min(lo);
            bbox.max_x = bbox.max_x.max(hi);
            bbox.min_y = bbox.min_y.min(y);
            bbox.max_y = bbox.max_y.max(y);
        }
    }
    bbox
}

/// Min/max visible x within one row, or `None` for a transparent row.
fn scan_row(buffer: &PixelBuffer, region: &Region, cutoff: f32, y: u32) -> Option<(u32, u32)> {
    let row = buffer.row(y);
    let mut span: Option<(u32, u32)> = None;
    for x in region.x..region.right() {
        if row[x as usize].a as f32 > cutoff {
            span = match span {
                None => Some((x, x)),
                Some((lo, _)) => Some((lo, x)),
            };
        }
    }
    span
}
