//! Shared helpers for the detection strategies: visibility masks,
//! connected components, and spacing/extent statistics.

use crate::buffer::{alpha_cutoff, PixelBuffer, DEFAULT_ALPHA_THRESHOLD};

/// Row-major visibility mask at the default alpha threshold.
pub(crate) fn visibility_mask(buffer: &PixelBuffer) -> Vec<bool> {
    let cutoff = alpha_cutoff(DEFAULT_ALPHA_THRESHOLD);
    buffer.pixels().iter().map(|p| p.a as f32 > cutoff).collect()
}

/// True when the mask is all-transparent or all-opaque; no grid structure
/// can be inferred from either.
pub(crate) fn is_degenerate(mask: &[bool]) -> bool {
    let visible = mask.iter().filter(|&&v| v).count();
    visible == 0 || visible == mask.len()
}

/// One 4-connected component of visible pixels.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Component {
    pub sum_x: u64,
    pub sum_y: u64,
    pub count: u64,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Component {
    /// Pixel-center centroid.
    pub fn centroid(&self) -> (f64, f64) {
        (
            self.sum_x as f64 / self.count as f64 + 0.5,
            self.sum_y as f64 / self.count as f64 + 0.5,
        )
    }

}

/// Collect all 4-connected visible components with an iterative flood
/// fill (explicit stack, no recursion).
pub(crate) fn connected_components(buffer: &PixelBuffer, mask: &[bool]) -> Vec<Component> {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let mut visited = vec![false; mask.len()];
    let mut components = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for start in 0..mask.len() {
        if !mask[start] || visited[start] {
            continue;
        }
        visited[start] = true;
        stack.push(start);
        let mut component = Component {
            sum_x: 0,
            sum_y: 0,
            count: 0,
            min_x: u32::MAX,
            min_y: u32::MAX,
            max_x: 0,
            max_y: 0,
        };
        while let Some(index) = stack.pop() {
            let x = (index % width) as u32;
            let y = (index / width) as u32;
            component.sum_x += x as u64;
            component.sum_y += y as u64;
            component.count += 1;
            component.min_x = component.min_x.min(x);
            component.min_y = component.min_y.min(y);
            component.max_x = component.max_x.max(x);
            component.max_y = component.max_y.max(y);

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
        components.push(component);
    }
    components
}

/// Merge sorted 1-D positions that lie within `merge_eps` of their
/// predecessor into cluster centers (mean of each run).
pub(crate) fn cluster_positions(mut values: Vec<f64>, merge_eps: f64) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    let mut centers = Vec::new();
    let mut run: Vec<f64> = Vec::new();
    for value in values {
        match run.last() {
            Some(&last) if value - last <= merge_eps => run.push(value),
            Some(_) => {
                centers.push(run.iter().sum::<f64>() / run.len() as f64);
                run.clear();
                run.push(value);
            }
            None => run.push(value),
        }
    }
    if !run.is_empty() {
        centers.push(run.iter().sum::<f64>() / run.len() as f64);
    }
    centers
}

/// Modal spacing between consecutive cluster centers, with a uniformity
/// score: the fraction of spacings within 10% (at least one pixel) of the
/// mode.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpacingEstimate {
    pub spacing: f64,
    pub uniformity: f32,
}

pub(crate) fn modal_spacing(centers: &[f64]) -> Option<SpacingEstimate> {
    if centers.len() < 2 {
        return None;
    }
    let spacings: Vec<f64> = centers.windows(2).map(|w| w[1] - w[0]).collect();

    // Histogram keyed by rounded spacing; ties resolve to the larger key.
    let mut modal_key = 0i64;
    let mut modal_count = 0usize;
    for &s in &spacings {
        let key = s.round() as i64;
        let count = spacings.iter().filter(|&&o| o.round() as i64 == key).count();
        if count > modal_count || (count == modal_count && key > modal_key) {
            modal_key = key;
            modal_count = count;
        }
    }

    let in_mode: Vec<f64> = spacings
        .iter()
        .copied()
        .filter(|s| s.round() as i64 == modal_key)
        .collect();
    let spacing = in_mode.iter().sum::<f64>() / in_mode.len() as f64;

    let tolerance = (spacing * 0.1).max(1.0);
    let regular = spacings
        .iter()
        .filter(|s| (**s - spacing).abs() <= tolerance)
        .count();
    Some(SpacingEstimate {
        spacing,
        uniformity: regular as f32 / spacings.len() as f32,
    })
}

/// Modal extent among integer extents, with the same uniformity scoring as
/// [`modal_spacing`].
pub(crate) fn modal_extent(extents: &[u32]) -> Option<(u32, f32)> {
    if extents.is_empty() {
        return None;
    }
    let mut modal = 0u32;
    let mut modal_count = 0usize;
    for &e in extents {
        let count = extents.iter().filter(|&&o| o == e).count();
        if count > modal_count || (count == modal_count && e > modal) {
            modal = e;
            modal_count = count;
        }
    }
    let tolerance = ((modal as f64) * 0.1).max(1.0);
    let regular = extents
        .iter()
        .filter(|&&e| (e as f64 - modal as f64).abs() <= tolerance)
        .count();
    Some((modal, regular as f32 / extents.len() as f32))
}

/// Clamp an inferred fractional cell size into `[1, dim]`.
pub(crate) fn clamp_cell(size: f64, dim: u32) -> u32 {
    (size.round() as i64).clamp(1, dim as i64) as u32
}

/// Centroid/peak merge tolerance for a given axis length.
pub(crate) fn merge_eps(dim: u32) -> f64 {
    (dim as f64 * 0.02).max(2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgba8;

    #[test]
    fn clusters_merge_nearby_positions() {
        let centers = cluster_positions(vec![10.0, 10.4, 32.1, 32.0, 54.2], 2.0);
        assert_eq!(centers.len(), 3);
        assert!((centers[0] - 10.2).abs() < 1e-9);
        assert!((centers[2] - 54.2).abs() < 1e-9);
    }

    #[test]
    fn modal_spacing_scores_uniform_runs() {
        let est = modal_spacing(&[10.0, 32.0, 54.0, 76.0]).unwrap();
        assert!((est.spacing - 22.0).abs() < 1e-9);
        assert_eq!(est.uniformity, 1.0);

        let est = modal_spacing(&[10.0, 32.0, 54.0, 99.0]).unwrap();
        assert!((est.spacing - 22.0).abs() < 1e-9);
        assert!(est.uniformity < 1.0);
    }

    #[test]
    fn modal_spacing_needs_two_centers() {
        assert!(modal_spacing(&[10.0]).is_none());
        assert!(modal_spacing(&[]).is_none());
    }

    #[test]
    fn components_split_on_transparency() {
        // Two 2x2 blocks separated by a transparent column.
        let mut pixels = vec![Rgba8::TRANSPARENT; 5 * 2];
        for y in 0..2u32 {
            for x in [0u32, 1, 3, 4] {
                pixels[y as usize * 5 + x as usize] = Rgba8::opaque(255, 0, 0);
            }
        }
        let buffer = PixelBuffer::from_pixels(5, 2, pixels).unwrap();
        let mask = visibility_mask(&buffer);
        let components = connected_components(&buffer, &mask);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].count, 4);
        assert_eq!((components[0].min_x, components[0].max_x), (0, 1));
        let (cx, cy) = components[0].centroid();
        assert!((cx - 1.0).abs() < 1e-9);
        assert!((cy - 1.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_masks() {
        assert!(is_degenerate(&[false, false]));
        assert!(is_degenerate(&[true, true]));
        assert!(!is_degenerate(&[true, false]));
    }
}
