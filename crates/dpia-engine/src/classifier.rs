//! Score-to-level classification.
//!
//! The threshold tables here are the only place risk bands are defined;
//! anything that displays a level must go through these functions.

use std::collections::BTreeMap;

use dpia_core::enums::RiskLevel;

/// Lower bound of `medium`.
pub const MEDIUM_THRESHOLD: f64 = 0.3;
/// Lower bound of `high`.
pub const HIGH_THRESHOLD: f64 = 0.6;
/// Lower bound of `critical`.
pub const CRITICAL_THRESHOLD: f64 = 0.8;

/// Slack absorbed at each band boundary. Means of decimal weights carry
/// binary rounding error (`(0.6 + 0.8 + 1.0) / 3` is `0.7999999999999999`).
const BAND_TOLERANCE: f64 = 1e-9;

/// Classify a `[0, 1]` score. Lower bounds are inclusive, within
/// floating-point rounding.
#[must_use]
pub fn classify(score: f64) -> RiskLevel {
    let score = score + BAND_TOLERANCE;
    if score >= CRITICAL_THRESHOLD {
        RiskLevel::Critical
    } else if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Classify a raw likelihood × impact product (`1..=25`).
#[must_use]
pub const fn classify_matrix(score: u8) -> RiskLevel {
    match score {
        0..=4 => RiskLevel::Low,
        5..=12 => RiskLevel::Medium,
        13..=20 => RiskLevel::High,
        _ => RiskLevel::Critical,
    }
}

/// Categories whose score classifies as high or critical, in the order of
/// `category_order`. Ids missing from `category_scores` are skipped.
pub fn high_risk_areas<'a>(
    category_order: impl IntoIterator<Item = &'a str>,
    category_scores: &BTreeMap<String, f64>,
) -> Vec<String> {
    category_order
        .into_iter()
        .filter(|id| {
            category_scores
                .get(*id)
                .is_some_and(|&score| classify(score).is_high_risk())
        })
        .map(str::to_string)
        .collect()
}
