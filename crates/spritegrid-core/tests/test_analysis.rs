//! End-to-end properties of the bounding box, crop and pivot pipeline.

mod common;

use pretty_assertions::assert_eq;
use spritegrid_core::{
    center_of_mass_pivot, compute_bounding_box, crop, crop_if_needed, BoundingBox, Padding,
    Region, DEFAULT_ALPHA_THRESHOLD,
};

use common::{grid_sheet, transparent, with_square};

/// The concrete scenario from the library contract: a 64x64 sheet holding a
/// single 10x10 opaque square at (20, 20).
#[test]
fn square_sheet_scenario() {
    let sheet = with_square(64, 64, 20, 20, 10);

    let bbox = compute_bounding_box(&sheet, None, DEFAULT_ALPHA_THRESHOLD);
    assert_eq!(
        bbox,
        BoundingBox {
            min_x: 20,
            min_y: 20,
            max_x: 29,
            max_y: 29,
            has_visible_pixels: true,
        }
    );

    let result = crop(&sheet, Padding::default(), (0.5, 0.5));
    assert_eq!(result.buffer.width(), 10);
    assert_eq!(result.buffer.height(), 10);
    assert!(result.buffer.pixels().iter().all(|p| p.a == 255));

    let pivot = center_of_mass_pivot(
        &result.buffer,
        Region::new(0, 0, 10, 10),
        DEFAULT_ALPHA_THRESHOLD,
    );
    assert!((pivot.0 - 0.5).abs() < 1e-6);
    assert!((pivot.1 - 0.5).abs() < 1e-6);
}

#[test]
fn transparent_sheets_report_no_visible_pixels() {
    for (w, h) in [(1, 1), (7, 3), (64, 64), (200, 120)] {
        let bbox = compute_bounding_box(&transparent(w, h), None, DEFAULT_ALPHA_THRESHOLD);
        assert!(!bbox.has_visible_pixels, "{w}x{h}");
    }
}

#[test]
fn crop_is_idempotent_without_padding() {
    let sheet = with_square(48, 32, 5, 9, 12);
    let once = crop(&sheet, Padding::default(), (0.25, 0.75));
    let twice = crop(&once.buffer, Padding::default(), once.pivot);
    assert_eq!(once.buffer, twice.buffer);
    assert!((once.pivot.0 - twice.pivot.0).abs() < 1e-6);
    assert!((once.pivot.1 - twice.pivot.1).abs() < 1e-6);
}

/// Cropping with zero padding must keep the pivot anchored to the same
/// absolute pixel position in original-buffer coordinates.
#[test]
fn pivot_round_trip_preserves_the_anchor() {
    let sheet = with_square(64, 48, 11, 7, 13);
    for pivot in [(0.0, 0.0), (0.5, 0.5), (1.0, 1.0), (0.3, 0.8), (0.17, 0.93)] {
        let result = crop(&sheet, Padding::default(), pivot);
        let abs_before = (pivot.0 as f64 * 64.0, pivot.1 as f64 * 48.0);
        let abs_after = (
            result.pivot.0 as f64 * result.buffer.width() as f64 + 11.0,
            result.pivot.1 as f64 * result.buffer.height() as f64 + 7.0,
        );
        assert!(
            (abs_before.0 - abs_after.0).abs() < 1e-4,
            "pivot {pivot:?}: x {abs_before:?} vs {abs_after:?}"
        );
        assert!((abs_before.1 - abs_after.1).abs() < 1e-4);
    }
}

#[test]
fn padded_crop_still_preserves_the_anchor() {
    let sheet = with_square(64, 48, 11, 7, 13);
    let padding = Padding {
        left: 3,
        right: 1,
        top: 4,
        bottom: 2,
    };
    let pivot = (0.4_f32, 0.6_f32);
    let result = crop(&sheet, padding, pivot);
    assert_eq!(result.buffer.width(), 13 + 3 + 1);
    assert_eq!(result.buffer.height(), 13 + 4 + 2);

    // Window origin is (11 - 3, 7 - 4).
    let abs_before = (pivot.0 as f64 * 64.0, pivot.1 as f64 * 48.0);
    let abs_after = (
        result.pivot.0 as f64 * result.buffer.width() as f64 + 8.0,
        result.pivot.1 as f64 * result.buffer.height() as f64 + 3.0,
    );
    assert!((abs_before.0 - abs_after.0).abs() < 1e-4);
    assert!((abs_before.1 - abs_after.1).abs() < 1e-4);
}

#[test]
fn centroid_of_empty_region_is_the_geometric_center() {
    let sheet = transparent(31, 17);
    let pivot = center_of_mass_pivot(&sheet, sheet.full_region(), DEFAULT_ALPHA_THRESHOLD);
    assert_eq!(pivot, (0.5, 0.5));
}

#[test]
fn centroid_tracks_off_center_content() {
    // Sheet of 2x2 cells; keep only the bottom-right block visible.
    let sheet = grid_sheet(2, 2, 16, 1);
    let region = Region::new(16, 16, 16, 16);
    let pivot = center_of_mass_pivot(&sheet, region, DEFAULT_ALPHA_THRESHOLD);
    // Block occupies the first 15 of 16 pixels on each axis.
    assert!((pivot.0 - 7.5 / 16.0).abs() < 1e-6);
    assert!((pivot.1 - 7.5 / 16.0).abs() < 1e-6);
}

#[test]
fn crop_if_needed_is_an_identity_check() {
    let tight = with_square(12, 12, 0, 0, 12);
    assert!(crop_if_needed(&tight, Padding::default(), (0.5, 0.5)).is_none());

    let loose = with_square(64, 64, 20, 20, 10);
    let result = crop_if_needed(&loose, Padding::default(), (0.5, 0.5)).unwrap();
    assert_eq!(result.buffer.width(), 10);
}
