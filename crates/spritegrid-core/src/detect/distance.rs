//! Distance-transform strategy: chamfer distance to the nearest transparent
//! pixel, local maxima as candidate sprite centers, grid pitch from the
//! modal peak-to-peak spacing.

use crate::bounds::compute_bounding_box;
use crate::buffer::{PixelBuffer, DEFAULT_ALPHA_THRESHOLD};
use crate::detect::support::{
    clamp_cell, cluster_positions, is_degenerate, modal_spacing, visibility_mask,
};
use crate::detect::{DetectionAlgorithm, DetectionResult};

const EXTENT_FALLBACK_CONFIDENCE: f32 = 0.4;

/// Peak positions inside one sprite form a contiguous ridge (consecutive
/// integer coordinates), while peaks of neighboring sprites sit at least a
/// gutter apart. An epsilon between 1 and 2 bridges exactly the former.
const PEAK_MERGE_EPS: f64 = 1.5;

const INF: u32 = u32::MAX / 2;

pub(crate) fn detect(buffer: &PixelBuffer) -> DetectionResult {
    let algorithm = DetectionAlgorithm::DistanceTransform;
    let mask = visibility_mask(buffer);
    if is_degenerate(&mask) {
        return DetectionResult::fallback(buffer, algorithm);
    }

    let distance = chamfer(&mask, buffer.width() as usize, buffer.height() as usize);
    let peaks = local_maxima(&distance, buffer.width() as usize, buffer.height() as usize);
    if peaks.is_empty() {
        return DetectionResult::fallback(buffer, algorithm);
    }

    let columns = cluster_positions(
        peaks.iter().map(|&(x, _)| x as f64 + 0.5).collect(),
        PEAK_MERGE_EPS,
    );
    let rows = cluster_positions(
        peaks.iter().map(|&(_, y)| y as f64 + 0.5).collect(),
        PEAK_MERGE_EPS,
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

fn axis_cell(centers: &[f64], visible_extent: u32, dim: u32) -> (u32, f32) {
    match modal_spacing(centers) {
        Some(estimate) => (clamp_cell(estimate.spacing, dim), estimate.uniformity),
        None => (visible_extent.clamp(1, dim), EXTENT_FALLBACK_CONFIDENCE),
    }
}

/// Two-pass L1 chamfer transform. Transparent pixels and the buffer border
/// are at distance zero; visible pixels hold the distance to the nearest of
/// either.
fn chamfer(mask: &[bool], width: usize, height: usize) -> Vec<u32> {
    let mut distance = vec![0u32; mask.len()];

    // Forward: top-left to bottom-right.
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            if !mask[i] {
                continue;
            }
            let mut d = INF;
            d = d.min(if x == 0 { 1 } else { distance[i - 1] + 1 });
            d = d.min(if y == 0 { 1 } else { distance[i - width] + 1 });
            distance[i] = d;
        }
    }

    // Backward: bottom-right to top-left.
    for y in (0..height).rev() {
        for x in (0..width).rev() {
            let i = y * width + x;
            if !mask[i] {
                continue;
            }
            let mut d = distance[i];
            d = d.min(if x == width - 1 {
                1
            } else {
                distance[i + 1] + 1
            });
            d = d.min(if y == height - 1 {
                1
            } else {
                distance[i + width] + 1
            });
            distance[i] = d;
        }
    }

    distance
}

/// Pixels whose distance is positive and not exceeded by any 4-neighbor
/// (out-of-range neighbors count as zero). Plateau cells all qualify; the
/// caller's position clustering collapses each plateau to one center.
fn local_maxima(distance: &[u32], width: usize, height: usize) -> Vec<(u32, u32)> {
    let mut peaks = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let d = distance[i];
            if d == 0 {
                continue;
            }
            let left = if x == 0 { 0 } else { distance[i - 1] };
            let right = if x == width - 1 { 0 } else { distance[i + 1] };
            let up = if y == 0 { 0 } else { distance[i - width] };
            let down = if y == height - 1 { 0 } else { distance[i + width] };
            if d >= left && d >= right && d >= up && d >= down {
                peaks.push((x as u32, y as u32));
            }
        }
    }
    peaks
}
