//! Region-growing strategy: grow 4-connected regions outward from alpha
//! maxima until transparency, then infer the grid from the uniformity of
//! the region extents.

use crate::buffer::PixelBuffer;
use crate::detect::support::{is_degenerate, modal_extent, visibility_mask};
use crate::detect::{DetectionAlgorithm, DetectionResult};

/// Bounding rectangle of one grown region.
#[derive(Debug, Clone, Copy)]
struct GrownRegion {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl GrownRegion {
    fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

pub(crate) fn detect(buffer: &PixelBuffer) -> DetectionResult {
    let algorithm = DetectionAlgorithm::RegionGrowing;
    let mask = visibility_mask(buffer);
    if is_degenerate(&mask) {
        return DetectionResult::fallback(buffer, algorithm);
    }

    let regions = grow_regions(buffer, &mask);
    if regions.len() < 2 {
        return DetectionResult::fallback(buffer, algorithm);
    }

    let widths: Vec<u32> = regions.iter().map(|r| r.width()).collect();
    let heights: Vec<u32> = regions.iter().map(|r| r.height()).collect();
    let (Some((cell_width, confidence_x)), Some((cell_height, confidence_y))) =
        (modal_extent(&widths), modal_extent(&heights))
    else {
        return DetectionResult::fallback(buffer, algorithm);
    };

    DetectionResult {
        cell_width: cell_width.clamp(1, buffer.width()),
        cell_height: cell_height.clamp(1, buffer.height()),
        confidence: confidence_x.min(confidence_y).clamp(0.0, 1.0),
        algorithm,
    }
}

/// Grow a region from every unvisited seed, seeds ordered local alpha
/// maxima first, then sweep up any remaining visible pixels so the
/// partition is total.
fn grow_regions(buffer: &PixelBuffer, mask: &[bool]) -> Vec<GrownRegion> {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let mut visited = vec![false; mask.len()];
    let mut regions = Vec::new();

    let alpha_at = |i: usize| buffer.pixels()[i].a;
    let is_local_max = |i: usize| -> bool {
        let x = i % width;
        let y = i / width;
        let a = alpha_at(i);
        let neighbor = |j: usize| -> u8 {
            if mask[j] {
                alpha_at(j)
            } else {
                0
            }
        };
        (x == 0 || a >= neighbor(i - 1))
            && (x == width - 1 || a >= neighbor(i + 1))
            && (y == 0 || a >= neighbor(i - width))
            && (y == height - 1 || a >= neighbor(i + width))
    };

    // Pass 1: seeds at local alpha maxima. Pass 2: leftovers.
    for pass in 0..2 {
        for i in 0..mask.len() {
            if !mask[i] || visited[i] {
                continue;
            }
            if pass == 0 && !is_local_max(i) {
                continue;
            }
            regions.push(grow_from(i, mask, &mut visited, width, height));
        }
    }
    regions
}

fn grow_from(
    seed: usize,
    mask: &[bool],
    visited: &mut [bool],
    width: usize,
    height: usize,
) -> GrownRegion {
    let mut stack = vec![seed];
    visited[seed] = true;
    let mut region = GrownRegion {
        min_x: u32::MAX,
        min_y: u32::MAX,
        max_x: 0,
        max_y: 0,
    };
    while let Some(index) = stack.pop() {
        let x = (index % width) as u32;
        let y = (index / width) as u32;
        region.min_x = region.min_x.min(x);
        region.min_y = region.min_y.min(y);
        region.max_x = region.max_x.max(x);
        region.max_y = region.max_y.max(y);

        let mut push = |neighbor: usize| {
            if mask[neighbor] && !visited[neighbor] {
                visited[neighbor] = true;
                stack.push(neighbor);
            }
        };
        if x > 0 {
            push(index - 1);
        }
        if (x as usize) < width - 1 {
            push(index + 1);
        }
        if y > 0 {
            push(index - width);
        }
        if (y as usize) < height - 1 {
            push(index + width);
        }
    }
    region
}
