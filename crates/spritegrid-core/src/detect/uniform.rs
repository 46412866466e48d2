//! Uniform-grid strategy: factor the expected sprite count into a near-
//! square rows x columns layout and divide the sheet evenly.

use crate::buffer::PixelBuffer;
use crate::detect::support::{is_degenerate, visibility_mask};
use crate::detect::{DetectionAlgorithm, DetectionResult};

/// Confidence when both dimensions divide evenly by the chosen grid.
const EVEN_DIVISION_CONFIDENCE: f32 = 0.95;
/// Ceiling for the uneven case; keeps auto-best moving on to a strategy
/// that can actually see the sheet's structure.
const UNEVEN_DIVISION_CONFIDENCE: f32 = 0.65;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    columns: u32,
    rows: u32,
    product: u64,
    aspect_deviation: f64,
}

pub(crate) fn detect(buffer: &PixelBuffer, expected_sprite_count: Option<u32>) -> DetectionResult {
    let algorithm = DetectionAlgorithm::UniformGrid;
    let Some(expected) = expected_sprite_count.filter(|&n| n > 0) else {
        return DetectionResult::fallback(buffer, algorithm);
    };
    let width = buffer.width();
    let height = buffer.height();
    if expected as u64 > width as u64 * height as u64 {
        return DetectionResult::fallback(buffer, algorithm);
    }
    // A sheet with no transparency (or no content) carries no grid signal.
    if is_degenerate(&visibility_mask(buffer)) {
        return DetectionResult::fallback(buffer, algorithm);
    }

    let Some(candidate) = best_layout(expected, width, height) else {
        return DetectionResult::fallback(buffer, algorithm);
    };

    let cell_width = (width / candidate.columns).max(1);
    let cell_height = (height / candidate.rows).max(1);
    let remainder_x = width % candidate.columns;
    let remainder_y = height % candidate.rows;

    let confidence = if remainder_x == 0 && remainder_y == 0 {
        EVEN_DIVISION_CONFIDENCE
    } else {
        let evenness = (1.0 - remainder_x as f32 / width as f32)
            * (1.0 - remainder_y as f32 / height as f32);
        UNEVEN_DIVISION_CONFIDENCE * evenness
    };

    DetectionResult {
        cell_width,
        cell_height,
        confidence: confidence.clamp(0.0, 1.0),
        algorithm,
    }
}

/// Pick the rows x columns layout whose product is the smallest value that
/// still covers `expected`, preferring near-square cells, then more
/// columns, as a deterministic total order.
fn best_layout(expected: u32, width: u32, height: u32) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for columns in 1..=expected.min(width) {
        let rows = expected.div_ceil(columns);
        if rows > height {
            continue;
        }
        let cell_w = width as f64 / columns as f64;
        let cell_h = height as f64 / rows as f64;
        let candidate = Candidate {
            columns,
            rows,
            product: rows as u64 * columns as u64,
            aspect_deviation: (cell_w / cell_h).ln().abs(),
        };
        let replace = match best {
            None => true,
            Some(current) => {
                candidate.product < current.product
                    || (candidate.product == current.product
                        && (candidate.aspect_deviation < current.aspect_deviation - 1e-9
                            || ((candidate.aspect_deviation - current.aspect_deviation).abs()
                                <= 1e-9
                                && candidate.columns > current.columns)))
            }
        };
        if replace {
            best = Some(candidate);
        }
    }
    best
}
