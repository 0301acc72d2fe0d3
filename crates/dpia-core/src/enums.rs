//! Question types, risk levels, assessment and mitigation status, priority,
//! risk factors.
//!
//! Wire names are lower-case (`kebab-case` for multi-word variants) to match
//! the catalog documents and the summary contract consumed by report exports.
//! `AssessmentStatus::InProgress` is the exception and stays `in_progress`.
//! Every enum exposes `as_str()` and a `FromStr` impl returning `CoreError`.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// QuestionType
// ---------------------------------------------------------------------------

/// Input widget type of a catalog question; determines validation and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Text,
    Textarea,
    Select,
    MultiSelect,
    Radio,
    Number,
}

impl QuestionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::MultiSelect => "multi-select",
            Self::Radio => "radio",
            Self::Number => "number",
        }
    }

    /// Whether answers are picked from the question's option list.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect | Self::Radio)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Ordinal risk band. Ordering follows severity (`Low < Critical`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// `high` and `critical` mark a high-risk area.
    #[must_use]
    pub const fn is_high_risk(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MitigationStatus
// ---------------------------------------------------------------------------

/// Status of a mitigation measure.
///
/// ```text
/// proposed → implemented → rejected → proposed → …
/// ```
///
/// The cycle never locks: every state is reachable from every other state
/// through `set_status`, and `next()` always moves one step forward.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MitigationStatus {
    #[default]
    Proposed,
    Implemented,
    Rejected,
}

impl MitigationStatus {
    pub const ALL: [Self; 3] = [Self::Proposed, Self::Implemented, Self::Rejected];

    /// The state one forward step along the cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Proposed => Self::Implemented,
            Self::Implemented => Self::Rejected,
            Self::Rejected => Self::Proposed,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::Implemented => "implemented",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for MitigationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MitigationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::UnknownVariant {
                kind: "mitigation status",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// AssessmentStatus
// ---------------------------------------------------------------------------

/// Lifecycle of an assessment record. New assessments start as `draft` and
/// move to `in_progress` with their first stored response.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
}

impl AssessmentStatus {
    pub const ALL: [Self; 3] = [Self::Draft, Self::InProgress, Self::Completed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::UnknownVariant {
                kind: "assessment status",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Priority of a mitigation measure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(CoreError::UnknownVariant {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// RiskFactor
// ---------------------------------------------------------------------------

/// Elevated-risk processing characteristics selected during the risk review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RiskFactor {
    SensitiveData,
    LargeScale,
    SystematicMonitoring,
    VulnerableGroups,
    AutomatedDecision,
    DataMatching,
    InnovativeTechnology,
    DenialOfService,
}

impl RiskFactor {
    pub const ALL: [Self; 8] = [
        Self::SensitiveData,
        Self::LargeScale,
        Self::SystematicMonitoring,
        Self::VulnerableGroups,
        Self::AutomatedDecision,
        Self::DataMatching,
        Self::InnovativeTechnology,
        Self::DenialOfService,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SensitiveData => "sensitive-data",
            Self::LargeScale => "large-scale",
            Self::SystematicMonitoring => "systematic-monitoring",
            Self::VulnerableGroups => "vulnerable-groups",
            Self::AutomatedDecision => "automated-decision",
            Self::DataMatching => "data-matching",
            Self::InnovativeTechnology => "innovative-technology",
            Self::DenialOfService => "denial-of-service",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SensitiveData => "Sensitive personal data",
            Self::LargeScale => "Large-scale processing",
            Self::SystematicMonitoring => "Systematic monitoring",
            Self::VulnerableGroups => "Vulnerable groups",
            Self::AutomatedDecision => "Automated decision-making",
            Self::DataMatching => "Data matching/combining",
            Self::InnovativeTechnology => "Innovative technology",
            Self::DenialOfService => "Denial of service",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskFactor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|factor| factor.as_str() == s)
            .ok_or_else(|| CoreError::UnknownVariant {
                kind: "risk factor",
                value: s.to_string(),
            })
    }
}
