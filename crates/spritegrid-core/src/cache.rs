//! Persisted detection records and content-hash invalidation.
//!
//! The library never touches the filesystem; hosts serialize
//! [`CachedDetection`] however they like (JSON helpers are provided) and
//! are responsible for hashing the source image bytes. A record is stale
//! as soon as its content hash no longer matches the current bytes.

use serde::{Deserialize, Serialize};

use crate::detect::{DetectionAlgorithm, DetectionResult};
use crate::error::CacheError;

/// Hex BLAKE3 digest of raw image bytes, the staleness key for cached
/// detection results.
pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// A detection result as persisted by a host, keyed by content hash.
///
/// The algorithm is stored as its integer index; index 0 is explicitly
/// invalid ("uninitialized") and the auto-best meta-strategy is never a
/// stored identity, so both are rejected on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedDetection {
    pub algorithm: u8,
    pub cell_width: u32,
    pub cell_height: u32,
    pub confidence: f32,
    pub content_hash: String,
}

impl CachedDetection {
    /// Record a detection result against the hash of its source bytes.
    pub fn new(result: &DetectionResult, content_hash: String) -> Self {
        CachedDetection {
            algorithm: result.algorithm.index(),
            cell_width: result.cell_width,
            cell_height: result.cell_height,
            confidence: result.confidence,
            content_hash,
        }
    }

    /// True when the source image bytes have changed since this record was
    /// written.
    pub fn is_stale(&self, current_hash: &str) -> bool {
        self.content_hash != current_hash
    }

    /// Validate and convert back into a detection result.
    pub fn decode(&self) -> Result<DetectionResult, CacheError> {
        let algorithm = match DetectionAlgorithm::from_index(self.algorithm) {
            Some(a) if a != DetectionAlgorithm::AutoBest => a,
            _ => return Err(CacheError::InvalidAlgorithm(self.algorithm)),
        };
        if !(0.0..=1.0).contains(&self.confidence) || self.confidence.is_nan() {
            return Err(CacheError::InvalidConfidence(self.confidence));
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(CacheError::InvalidCellSize(self.cell_width, self.cell_height));
        }
        Ok(DetectionResult {
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            confidence: self.confidence,
            algorithm,
        })
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, CacheError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON and validate the record.
    pub fn from_json(json: &str) -> Result<Self, CacheError> {
        let record: CachedDetection = serde_json::from_str(json)?;
        record.decode()?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> DetectionResult {
        DetectionResult {
            cell_width: 32,
            cell_height: 48,
            confidence: 0.82,
            algorithm: DetectionAlgorithm::BoundaryScoring,
        }
    }

    #[test]
    fn json_round_trip() {
        let record = CachedDetection::new(&sample_result(), content_hash(b"sheet bytes"));
        let json = record.to_json().unwrap();
        let back = CachedDetection::from_json(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.decode().unwrap(), sample_result());
    }

    #[test]
    fn staleness_follows_the_content_hash() {
        let record = CachedDetection::new(&sample_result(), content_hash(b"v1"));
        assert!(!record.is_stale(&content_hash(b"v1")));
        assert!(record.is_stale(&content_hash(b"v2")));
    }

    #[test]
    fn reserved_and_meta_indices_are_rejected() {
        let mut record = CachedDetection::new(&sample_result(), String::new());
        record.algorithm = 0;
        assert!(matches!(
            record.decode(),
            Err(CacheError::InvalidAlgorithm(0))
        ));
        record.algorithm = DetectionAlgorithm::AutoBest.index();
        assert!(matches!(
            record.decode(),
            Err(CacheError::InvalidAlgorithm(1))
        ));
        record.algorithm = 99;
        assert!(record.decode().is_err());
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        let mut record = CachedDetection::new(&sample_result(), String::new());
        record.confidence = 1.5;
        assert!(matches!(
            record.decode(),
            Err(CacheError::InvalidConfidence(_))
        ));
    }

    #[test]
    fn hash_is_stable_hex() {
        let hash = content_hash(b"abc");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, content_hash(b"abc"));
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
