use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RiskLevel;

/// Likelihood/impact ratings and selected risk factors for one assessment.
///
/// `risk_factors` keeps the ids exactly as selected; unrecognized ids are
/// preserved here and skipped when recommendations are generated.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RiskReview {
    pub assessment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likelihood: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<u8>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Likelihood × impact product on the 1–25 scale with its own band.
///
/// Reported next to the weighted-mean summary, never merged into it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatrixScore {
    pub likelihood: u8,
    pub impact: u8,
    pub score: u8,
    pub level: RiskLevel,
}
