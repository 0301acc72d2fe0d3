//! Summary, diagnostics, and report shapes returned by the engine.
//!
//! These structs define the output contract consumed by report and export
//! collaborators. They are recomputed on demand and never persisted.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Assessment, GdprArticle, MatrixScore, Mitigation, Response};
use crate::enums::{MitigationStatus, RiskLevel};

/// Aggregated risk for one assessment.
///
/// `category_scores` only holds categories with at least one response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub overall_risk_score: f64,
    pub overall_risk_level: RiskLevel,
    pub category_scores: BTreeMap<String, f64>,
    pub high_risk_areas: Vec<String>,
    pub recommendations: Vec<String>,
}

impl RiskSummary {
    /// Summary of an assessment without any responses.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            overall_risk_score: 0.0,
            overall_risk_level: RiskLevel::Low,
            category_scores: BTreeMap::new(),
            high_risk_areas: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// A stored response left out of aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedResponse {
    pub response_id: String,
    pub question_id: String,
    pub reason: String,
}

/// Makes degraded-mode aggregation observable.
///
/// `total_responses - scored_responses == excluded.len()`. `warnings` names
/// stored data that was skipped outside the response set, such as a risk
/// review holding an out-of-range rating.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDiagnostics {
    pub total_responses: usize,
    pub scored_responses: usize,
    pub excluded: Vec<ExcludedResponse>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SummaryDiagnostics {
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.excluded.is_empty() || !self.warnings.is_empty()
    }
}

/// Questionnaire completion for one assessment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentProgress {
    pub answered: usize,
    pub total_questions: usize,
    /// Rounded to the nearest whole percent.
    pub percent_complete: u8,
    pub missing_required: Vec<String>,
}

/// Mitigation counts per status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MitigationProgress {
    pub proposed: usize,
    pub implemented: usize,
    pub rejected: usize,
    pub total: usize,
}

impl MitigationProgress {
    /// Count statuses of the given mitigations.
    pub fn tally<'a>(mitigations: impl IntoIterator<Item = &'a Mitigation>) -> Self {
        mitigations
            .into_iter()
            .fold(Self::default(), |mut acc, mitigation| {
                match mitigation.status {
                    MitigationStatus::Proposed => acc.proposed += 1,
                    MitigationStatus::Implemented => acc.implemented += 1,
                    MitigationStatus::Rejected => acc.rejected += 1,
                }
                acc.total += 1;
                acc
            })
    }
}

/// Everything an export collaborator needs to render a DPIA report.
///
/// `assessment` is present when a header was registered for the id.
/// `articles` holds the reference entries for every article cited by an
/// answered question or a mitigation, in first-cited order; citations the
/// article catalog cannot resolve are listed in `unresolved_articles`. Both
/// stay empty when the engine runs without an article catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub assessment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Assessment>,
    pub generated_at: DateTime<Utc>,
    pub summary: RiskSummary,
    pub diagnostics: SummaryDiagnostics,
    pub progress: AssessmentProgress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_matrix: Option<MatrixScore>,
    pub responses: Vec<Response>,
    pub mitigations: Vec<Mitigation>,
    pub mitigation_progress: MitigationProgress,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub articles: Vec<GdprArticle>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved_articles: Vec<String>,
}
