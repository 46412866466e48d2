//! Pivot placement modes and center-of-mass pivot computation.
//!
//! Pivots are normalized `(x, y)` anchors within a reference rectangle,
//! using the crate's top-left origin: `(0, 0)` is the top-left corner and
//! `(0.5, 1.0)` the bottom center.

use rayon::prelude::*;

use crate::buffer::{alpha_cutoff, PixelBuffer, Region};
use crate::PARALLEL_PIXEL_THRESHOLD;

/// Where to anchor a sprite's pivot within its rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PivotMode {
    Center,
    TopLeft,
    TopCenter,
    TopRight,
    LeftCenter,
    RightCenter,
    BottomLeft,
    BottomCenter,
    BottomRight,
    /// An explicit normalized anchor.
    Custom(f32, f32),
}

impl PivotMode {
    /// The normalized anchor for this mode (top-left origin).
    pub fn normalized(self) -> (f32, f32) {
        match self {
            PivotMode::Center => (0.5, 0.5),
            PivotMode::TopLeft => (0.0, 0.0),
            PivotMode::TopCenter => (0.5, 0.0),
            PivotMode::TopRight => (1.0, 0.0),
            PivotMode::LeftCenter => (0.0, 0.5),
            PivotMode::RightCenter => (1.0, 0.5),
            PivotMode::BottomLeft => (0.0, 1.0),
            PivotMode::BottomCenter => (0.5, 1.0),
            PivotMode::BottomRight => (1.0, 1.0),
            PivotMode::Custom(x, y) => (x, y),
        }
    }
}

/// Compute the alpha-weighted center of mass of `region`, normalized to
/// `[0, 1]` within that region.
///
/// Pixel positions are taken at pixel centers, so a fully opaque region
/// yields exactly `(0.5, 0.5)`. Sums accumulate in 64-bit integers and the
/// division happens once in double precision, keeping the result stable on
/// large buffers. An empty or fully transparent region returns the
/// geometric center `(0.5, 0.5)`.
pub fn center_of_mass_pivot(
    buffer: &PixelBuffer,
    region: Region,
    alpha_threshold: f32,
) -> (f32, f32) {
    let region = region.clamped_to(buffer.width(), buffer.height());
    if region.is_empty() {
        return (0.5, 0.5);
    }

    let cutoff = alpha_cutoff(alpha_threshold);

    // Per-row partial sums of region-relative x, region-relative y, count.
    let (sum_x, sum_y, count) = if region.area() >= PARALLEL_PIXEL_THRESHOLD {
        (region.y..region.bottom())
            .into_par_iter()
            .map(|y| row_sums(buffer, &region, cutoff, y))
            .reduce(|| (0u64, 0u64, 0u64), merge)
    } else {
        (region.y..region.bottom())
            .map(|y| row_sums(buffer, &region, cutoff, y))
            .fold((0u64, 0u64, 0u64), |acc, row| merge(acc, row))
    };

    if count == 0 {
        return (0.5, 0.5);
    }

    // +0.5 shifts integer coordinates to pixel centers.
    let avg_x = sum_x as f64 / count as f64 + 0.5;
    let avg_y = sum_y as f64 / count as f64 + 0.5;
    (
        (avg_x / region.width as f64) as f32,
        (avg_y / region.height as f64) as f32,
    )
}

fn row_sums(buffer: &PixelBuffer, region: &Region, cutoff: f32, y: u32) -> (u64, u64, u64) {
    let row = buffer.row(y);
    let rel_y = (y - region.y) as u64;
    let mut sum_x = 0u64;
    let mut count = 0u64;
    for x in region.x..region.right() {
        if row[x as usize].a as f32 > cutoff {
            sum_x += (x - region.x) as u64;
            count += 1;
        }
    }
    (sum_x, rel_y * count, count)
}

fn merge(a: (u64, u64, u64), b: (u64, u64, u64)) -> (u64, u64, u64) {
    (a.0 + b.0, a.1 + b.1, a.2 + b.2)
}
