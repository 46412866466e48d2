//! `spritegrid detect` - grid detection with optional cached-result reuse.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use spritegrid_core::{
    content_hash, detect, detect_with_report, CachedDetection, DetectionAlgorithm,
    DetectionAttempt, DetectionReport, DetectionResult,
};

use crate::png_io;

pub fn run(
    input: &str,
    algorithm: &str,
    expected_count: Option<u32>,
    cache: Option<&str>,
    json: bool,
) -> Result<()> {
    let algorithm: DetectionAlgorithm = algorithm
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let (buffer, bytes) = png_io::load(Path::new(input))?;
    let hash = content_hash(&bytes);

    // A fresh cache record short-circuits detection entirely.
    if let Some(cache_path) = cache {
        if let Some(result) = read_fresh_cache(Path::new(cache_path), &hash)? {
            print_report(input, &hash, &single_attempt_report(result), true, json);
            return Ok(());
        }
    }

    let report = match algorithm {
        DetectionAlgorithm::AutoBest => detect_with_report(&buffer, expected_count),
        other => single_attempt_report(detect(&buffer, other, expected_count)),
    };

    if let Some(cache_path) = cache {
        let record = CachedDetection::new(&report.result, hash.clone());
        std::fs::write(cache_path, record.to_json()?)
            .with_context(|| format!("failed to write cache record {cache_path}"))?;
    }

    print_report(input, &hash, &report, false, json);
    Ok(())
}

/// Wrap a single-strategy result in the report shape auto-best produces.
fn single_attempt_report(result: DetectionResult) -> DetectionReport {
    DetectionReport {
        result,
        attempts: vec![DetectionAttempt {
            algorithm: result.algorithm,
            confidence: result.confidence,
        }],
    }
}

/// A cached result, if the record exists, parses, and matches the hash.
/// A malformed record is treated as stale rather than a hard error.
fn read_fresh_cache(path: &Path, hash: &str) -> Result<Option<DetectionResult>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read cache record {}", path.display()))?;
    let Ok(record) = CachedDetection::from_json(&text) else {
        return Ok(None);
    };
    if record.is_stale(hash) {
        return Ok(None);
    }
    Ok(record.decode().ok())
}

fn print_report(input: &str, hash: &str, report: &DetectionReport, cached: bool, json: bool) {
    if json {
        let value = json!({
            "input": input,
            "content_hash": hash,
            "cached": cached,
            "result": report.result,
            "attempts": report.attempts,
        });
        println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
        return;
    }

    let result = &report.result;
    let source = if cached { " (cached)".dimmed().to_string() } else { String::new() };
    println!(
        "{} {}x{} px cells{}",
        "grid:".bold(),
        result.cell_width,
        result.cell_height,
        source
    );
    println!(
        "{} {} (confidence {:.2})",
        "algorithm:".bold(),
        result.algorithm.to_string().cyan(),
        result.confidence
    );
    if !cached && report.attempts.len() > 1 {
        let attempts: Vec<String> = report
            .attempts
            .iter()
            .map(|a| format!("{} {:.2}", a.algorithm, a.confidence))
            .collect();
        println!("{} {}", "attempts:".bold(), attempts.join(", "));
    }
    println!("{} {}", "content-hash:".bold(), hash.dimmed());
}
