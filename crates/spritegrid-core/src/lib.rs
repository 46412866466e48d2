//! spritegrid-core — sprite-sheet image analysis.
//!
//! This crate provides the portable algorithmic core for sprite-sheet asset
//! tooling: detecting the cell grid of a sheet from its transparency
//! structure, cropping a sprite to its visible content with pivot
//! preservation, and computing alpha-weighted center-of-mass pivots.
//!
//! # Features
//!
//! - **Grid detection**: five strategies (uniform grid, boundary scoring,
//!   cluster centroid, distance transform, region growing) plus an
//!   auto-best dispatcher that runs them in ascending cost order
//! - **Alpha-boundary cropping**: tight visible bounding box plus padding,
//!   with exact pivot remapping into the cropped coordinate space
//! - **Center-of-mass pivots**: integer-accumulated, parallel-reduced
//!   centroid over any sub-region
//! - **Cache boundary**: a serializable detection record keyed by a BLAKE3
//!   content hash, for hosts that persist results across imports
//!
//! # Conventions
//!
//! All buffers are RGBA8, row-major, **top-left origin** (row 0 is the top
//! row, `y` grows downward). Coordinates are buffer-local pixels; pivots
//! are normalized to `[0, 1]` within their reference rectangle.
//!
//! # Totality
//!
//! Every analysis function is total over valid buffers: degenerate inputs
//! (fully transparent sheets, missing sprite counts, empty regions) are
//! reported through confidence `0.0` or identity fallbacks, never panics.
//! The only fallible operation is buffer construction itself.
//!
//! # Example
//!
//! ```
//! use spritegrid_core::{detect, DetectionAlgorithm, PixelBuffer};
//!
//! let pixels = vec![0u8; 64 * 64 * 4];
//! let sheet = PixelBuffer::from_rgba8(64, 64, &pixels).unwrap();
//! let result = detect(&sheet, DetectionAlgorithm::AutoBest, Some(4));
//! assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
//! ```

pub mod bounds;
pub mod buffer;
pub mod cache;
pub mod crop;
pub mod detect;
pub mod error;
pub mod pivot;

// Re-export main types for convenience
pub use bounds::{compute_bounding_box, BoundingBox};
pub use buffer::{PixelBuffer, Region, Rgba8, DEFAULT_ALPHA_THRESHOLD};
pub use cache::{content_hash, CachedDetection};
pub use crop::{crop, crop_if_needed, CropResult, Padding};
pub use detect::{
    detect, detect_with_report, DetectionAlgorithm, DetectionAttempt, DetectionReport,
    DetectionResult, AUTO_CONFIDENCE_BAR,
};
pub use error::{BufferError, CacheError};
pub use pivot::{center_of_mass_pivot, PivotMode};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Buffers with at least this many pixels in the scanned region use the
/// row-parallel reduction path; smaller scans run sequentially.
pub(crate) const PARALLEL_PIXEL_THRESHOLD: usize = 16_384;
