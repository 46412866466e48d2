//! Boundary-scoring strategy: hypothesize cell sizes and score each by the
//! transparency of the pixels along its interior grid lines.

use crate::buffer::PixelBuffer;
use crate::detect::support::{is_degenerate, visibility_mask};
use crate::detect::{DetectionAlgorithm, DetectionResult};

/// Smallest candidate cell edge considered plausible for a sprite.
const MIN_CELL: u32 = 2;

pub(crate) fn detect(buffer: &PixelBuffer) -> DetectionResult {
    let algorithm = DetectionAlgorithm::BoundaryScoring;
    let mask = visibility_mask(buffer);
    if is_degenerate(&mask) {
        return DetectionResult::fallback(buffer, algorithm);
    }

    let width = buffer.width();
    let height = buffer.height();

    let column_transparency = |x: u32| -> f64 {
        let transparent = (0..height)
            .filter(|&y| !mask[(y * width + x) as usize])
            .count();
        transparent as f64 / height as f64
    };
    let row_transparency = |y: u32| -> f64 {
        let transparent = (0..width)
            .filter(|&x| !mask[(y * width + x) as usize])
            .count();
        transparent as f64 / width as f64
    };

    let (cell_width, score_x) = best_axis(width, column_transparency);
    let (cell_height, score_y) = best_axis(height, row_transparency);

    // Normalize against the sheet's overall transparency: on a mostly
    // empty sheet any hypothesized line scores high, so only transparency
    // in excess of the base rate counts as grid evidence.
    let base = mask.iter().filter(|&&v| !v).count() as f64 / mask.len() as f64;
    let lift = |score: f64| ((score - base) / (1.0 - base)).max(0.0);

    let confidence = (lift(score_x) * lift(score_y)).sqrt() as f32;
    if confidence <= 0.0 {
        return DetectionResult::fallback(buffer, algorithm);
    }
    DetectionResult {
        cell_width,
        cell_height,
        confidence: confidence.clamp(0.0, 1.0),
        algorithm,
    }
}

/// Score every cell-size candidate along one axis and keep the best.
///
/// Candidates are the divisors of the axis length that leave at least one
/// interior grid line. Each hypothesized line is scored as the transparency
/// of its two adjacent pixel lines (taking the better of the two, since a
/// one-pixel gutter can sit on either side of the cell edge); the candidate
/// score is the mean over its lines.
///
/// Ties keep the smallest cell: every multiple of the true cell size also
/// lands all of its lines on gutters, so among equal scores the finest
/// division is the real grid. Candidates are visited in ascending order,
/// which makes strict improvement the whole tie rule.
fn best_axis(dim: u32, line_transparency: impl Fn(u32) -> f64) -> (u32, f64) {
    let mut best_cell = dim;
    let mut best_score = 0.0f64;
    for cell in (MIN_CELL..=dim / 2).filter(|c| dim % c == 0) {
        let boundaries = dim / cell - 1;
        let mut total = 0.0f64;
        for k in 1..=boundaries {
            let edge = k * cell;
            total += line_transparency(edge - 1).max(line_transparency(edge));
        }
        let score = total / boundaries as f64;
        if score > best_score {
            best_score = score;
            best_cell = cell;
        }
    }
    (best_cell, best_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgba8;

    fn grid_sheet(columns: u32, rows: u32, cell: u32) -> PixelBuffer {
        let width = columns * cell;
        let height = rows * cell;
        let mut pixels = vec![Rgba8::TRANSPARENT; (width * height) as usize];
        for row in 0..rows {
            for col in 0..columns {
                for y in row * cell..(row + 1) * cell - 1 {
                    for x in col * cell..(col + 1) * cell - 1 {
                        pixels[(y * width + x) as usize] = Rgba8::opaque(255, 255, 255);
                    }
                }
            }
        }
        PixelBuffer::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn fully_transparent_gutters_score_high() {
        let sheet = grid_sheet(3, 2, 22);
        let result = detect(&sheet);
        assert_eq!((result.cell_width, result.cell_height), (22, 22));
        assert!(result.confidence > 0.9);
    }

    #[test]
    fn opaque_sheet_falls_back() {
        let sheet = PixelBuffer::filled(24, 24, Rgba8::opaque(1, 1, 1)).unwrap();
        let result = detect(&sheet);
        assert_eq!(result.confidence, 0.0);
        assert_eq!((result.cell_width, result.cell_height), (24, 24));
    }

    #[test]
    fn rectangular_cells_are_found_per_axis() {
        let columns = 4;
        let rows = 2;
        let (cw, ch) = (16u32, 24u32);
        let width = columns * cw;
        let height = rows * ch;
        let mut pixels = vec![Rgba8::TRANSPARENT; (width * height) as usize];
        for row in 0..rows {
            for col in 0..columns {
                for y in row * ch..(row + 1) * ch - 1 {
                    for x in col * cw..(col + 1) * cw - 1 {
                        pixels[(y * width + x) as usize] = Rgba8::opaque(10, 20, 30);
                    }
                }
            }
        }
        let sheet = PixelBuffer::from_pixels(width, height, pixels).unwrap();
        let result = detect(&sheet);
        assert_eq!((result.cell_width, result.cell_height), (16, 24));
        assert!(result.confidence > 0.9);
    }
}
