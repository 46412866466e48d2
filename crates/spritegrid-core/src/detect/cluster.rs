//! Cluster-centroid strategy: flood-fill connected sprites, then infer the
//! grid pitch from the modal spacing between component centroids on each
//! axis.

use crate::bounds::compute_bounding_box;
use crate::buffer::{PixelBuffer, DEFAULT_ALPHA_THRESHOLD};
use crate::detect::support::{
    clamp_cell, cluster_positions, connected_components, is_degenerate, merge_eps, modal_spacing,
    visibility_mask,
};
use crate::detect::{DetectionAlgorithm, DetectionResult};

/// Confidence assigned to an axis whose pitch could not be inferred and
/// fell back to the visible extent (single row or column of sprites).
const EXTENT_FALLBACK_CONFIDENCE: f32 = 0.4;

pub(crate) fn detect(buffer: &PixelBuffer) -> DetectionResult {
    let algorithm = DetectionAlgorithm::ClusterCentroid;
    let mask = visibility_mask(buffer);
    if is_degenerate(&mask) {
        return DetectionResult::fallback(buffer, algorithm);
    }

    let components = connected_components(buffer, &mask);
    if components.len() < 2 {
        return DetectionResult::fallback(buffer, algorithm);
    }

    let centroids: Vec<(f64, f64)> = components.iter().map(|c| c.centroid()).collect();
    let columns = cluster_positions(
        centroids.iter().map(|c| c.0).collect(),
        merge_eps(buffer.width()),
    );
    let rows = cluster_positions(
        centroids.iter().map(|c| c.1).collect(),
        merge_eps(buffer.height()),
    );
    if columns.len() < 2 && rows.len() < 2 {
        return DetectionResult::fallback(buffer, algorithm);
    }

    let bbox = compute_bounding_box(buffer, None, DEFAULT_ALPHA_THRESHOLD);
    let (cell_width, confidence_x) = axis_cell(&columns, bbox.width(), buffer.width());
    let (cell_height, confidence_y) = axis_cell(&rows, bbox.height(), buffer.height());

    DetectionResult {
        cell_width,
        cell_height,
        confidence: confidence_x.min(confidence_y).clamp(0.0, 1.0),
        algorithm,
    }
}

/// Cell size along one axis from clustered centroid positions: the modal
/// spacing when at least two clusters exist, otherwise the visible extent
/// at reduced confidence.
fn axis_cell(centers: &[f64], visible_extent: u32, dim: u32) -> (u32, f32) {
    match modal_spacing(centers) {
        Some(estimate) => (clamp_cell(estimate.spacing, dim), estimate.uniformity),
        None => (visible_extent.clamp(1, dim), EXTENT_FALLBACK_CONFIDENCE),
    }
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
    fn centroid_spacing_recovers_the_pitch() {
        let sheet = grid_sheet(3, 2, 22);
        let result = detect(&sheet);
        assert_eq!((result.cell_width, result.cell_height), (22, 22));
        assert!(result.confidence > 0.9);
    }

    #[test]
    fn single_sprite_cannot_infer_a_grid() {
        let sheet = grid_sheet(1, 1, 32);
        let result = detect(&sheet);
        assert_eq!(result.confidence, 0.0);
        assert_eq!((result.cell_width, result.cell_height), (32, 32));
    }

    #[test]
    fn horizontal_strip_falls_back_on_the_vertical_axis() {
        let sheet = grid_sheet(4, 1, 20);
        let result = detect(&sheet);
        assert_eq!(result.cell_width, 20);
        // Vertical pitch is unknowable from one row; extent fallback.
        assert_eq!(result.cell_height, 19);
        assert!(result.confidence > 0.0);
        assert!(result.confidence <= EXTENT_FALLBACK_CONFIDENCE);
    }
}
