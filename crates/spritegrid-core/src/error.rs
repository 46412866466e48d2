//! Error types for buffer construction and cache decoding.
//!
//! Analysis functions themselves are total: degenerate inputs surface as
//! zero-confidence results or identity fallbacks, not errors.

use thiserror::Error;

/// Errors from pixel buffer construction.
#[derive(Debug, Error)]
pub enum BufferError {
    /// Width or height is zero.
    #[error("invalid buffer dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data does not match `width * height`.
    #[error("pixel data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Errors from decoding a persisted detection record.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Algorithm index is reserved (0), meta (auto-best) or unknown.
    #[error("algorithm index {0} is not a valid stored detection algorithm")]
    InvalidAlgorithm(u8),

    /// Confidence outside the `[0, 1]` range.
    #[error("confidence {0} is outside [0, 1]")]
    InvalidConfidence(f32),

    /// Cell dimensions must be positive.
    #[error("invalid cell dimensions {0}x{1}")]
    InvalidCellSize(u32, u32),

    /// Malformed JSON record.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
