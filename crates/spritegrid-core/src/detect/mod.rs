//! Sprite-sheet grid detection.
//!
//! Five strategies infer the uniform cell size of a sheet from its
//! transparency structure, each reporting a `[0, 1]` confidence in its own
//! guess. The auto-best dispatcher runs them in ascending cost order and
//! stops at the first result clearing the confidence bar.
//!
//! All strategies are total: transparent sheets, opaque sheets and missing
//! sprite counts yield a zero-confidence fallback whose cell is the full
//! buffer, never an error.

mod boundary;
mod cluster;
mod distance;
mod region;
mod support;
mod uniform;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;

/// Auto-best stops at the first strategy whose confidence exceeds this bar.
pub const AUTO_CONFIDENCE_BAR: f32 = 0.70;

/// Grid detection strategy.
///
/// Discriminants start at 1; index 0 is reserved as "uninitialized" and is
/// rejected when decoding persisted records. `AutoBest` is a meta-strategy
/// and never appears as the identity on a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionAlgorithm {
    AutoBest = 1,
    UniformGrid = 2,
    BoundaryScoring = 3,
    ClusterCentroid = 4,
    DistanceTransform = 5,
    RegionGrowing = 6,
}

impl DetectionAlgorithm {
    /// The persisted index of this algorithm.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Decode a persisted index. Index 0 is explicitly invalid.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(DetectionAlgorithm::AutoBest),
            2 => Some(DetectionAlgorithm::UniformGrid),
            3 => Some(DetectionAlgorithm::BoundaryScoring),
            4 => Some(DetectionAlgorithm::ClusterCentroid),
            5 => Some(DetectionAlgorithm::DistanceTransform),
            6 => Some(DetectionAlgorithm::RegionGrowing),
            _ => None,
        }
    }

    /// Kebab-case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            DetectionAlgorithm::AutoBest => "auto-best",
            DetectionAlgorithm::UniformGrid => "uniform-grid",
            DetectionAlgorithm::BoundaryScoring => "boundary-scoring",
            DetectionAlgorithm::ClusterCentroid => "cluster-centroid",
            DetectionAlgorithm::DistanceTransform => "distance-transform",
            DetectionAlgorithm::RegionGrowing => "region-growing",
        }
    }
}

impl fmt::Display for DetectionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DetectionAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto-best" => Ok(DetectionAlgorithm::AutoBest),
            "uniform-grid" => Ok(DetectionAlgorithm::UniformGrid),
            "boundary-scoring" => Ok(DetectionAlgorithm::BoundaryScoring),
            "cluster-centroid" => Ok(DetectionAlgorithm::ClusterCentroid),
            "distance-transform" => Ok(DetectionAlgorithm::DistanceTransform),
            "region-growing" => Ok(DetectionAlgorithm::RegionGrowing),
            other => Err(format!("unknown detection algorithm: {other}")),
        }
    }
}

/// The outcome of one detection call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionResult {
    /// Inferred cell width in pixels, always positive.
    pub cell_width: u32,
    /// Inferred cell height in pixels, always positive.
    pub cell_height: u32,
    /// Self-assessed confidence in `[0, 1]`.
    pub confidence: f32,
    /// The concrete strategy that produced this result.
    pub algorithm: DetectionAlgorithm,
}

impl DetectionResult {
    /// Zero-confidence placeholder covering the whole buffer.
    pub(crate) fn fallback(buffer: &PixelBuffer, algorithm: DetectionAlgorithm) -> Self {
        DetectionResult {
            cell_width: buffer.width(),
            cell_height: buffer.height(),
            confidence: 0.0,
            algorithm,
        }
    }
}

/// One strategy invocation during auto-best dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionAttempt {
    pub algorithm: DetectionAlgorithm,
    pub confidence: f32,
}

/// Auto-best outcome plus the ordered list of strategies that actually ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    pub result: DetectionResult,
    pub attempts: Vec<DetectionAttempt>,
}

/// Detect the cell grid of a sheet.
///
/// `expected_sprite_count` is consumed by the uniform-grid strategy (and by
/// auto-best on its behalf); the other strategies ignore it.
pub fn detect(
    buffer: &PixelBuffer,
    algorithm: DetectionAlgorithm,
    expected_sprite_count: Option<u32>,
) -> DetectionResult {
    match algorithm {
        DetectionAlgorithm::AutoBest => detect_with_report(buffer, expected_sprite_count).result,
        DetectionAlgorithm::UniformGrid => uniform::detect(buffer, expected_sprite_count),
        DetectionAlgorithm::BoundaryScoring => boundary::detect(buffer),
        DetectionAlgorithm::ClusterCentroid => cluster::detect(buffer),
        DetectionAlgorithm::DistanceTransform => distance::detect(buffer),
        DetectionAlgorithm::RegionGrowing => region::detect(buffer),
    }
}

/// Run the strategies in ascending cost order, stopping at the first result
/// whose confidence clears [`AUTO_CONFIDENCE_BAR`]; otherwise return the
/// highest-confidence result observed. The report records every strategy
/// that ran, in order.
pub fn detect_with_report(
    buffer: &PixelBuffer,
    expected_sprite_count: Option<u32>,
) -> DetectionReport {
    const ORDER: [DetectionAlgorithm; 5] = [
        DetectionAlgorithm::UniformGrid,
        DetectionAlgorithm::BoundaryScoring,
        DetectionAlgorithm::ClusterCentroid,
        DetectionAlgorithm::DistanceTransform,
        DetectionAlgorithm::RegionGrowing,
    ];

    let mut attempts = Vec::new();
    let mut best: Option<DetectionResult> = None;
    for algorithm in ORDER {
        let result = detect(buffer, algorithm, expected_sprite_count);
        attempts.push(DetectionAttempt {
            algorithm,
            confidence: result.confidence,
        });
        if best.map_or(true, |b| result.confidence > b.confidence) {
            best = Some(result);
        }
        if result.confidence > AUTO_CONFIDENCE_BAR {
            break;
        }
    }

    DetectionReport {
        // ORDER is non-empty, so at least one attempt ran.
        result: best.unwrap_or_else(|| {
            DetectionResult::fallback(buffer, DetectionAlgorithm::UniformGrid)
        }),
        attempts,
    }
}
