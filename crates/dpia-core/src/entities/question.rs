use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::QuestionType;

const fn default_required() -> bool {
    true
}

/// One selectable answer of a choice question.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub value: String,
    #[serde(default)]
    pub label: String,
    /// Overrides the question weight when this option is selected.
    #[serde(default, alias = "risk_weight", skip_serializing_if = "Option::is_none")]
    pub risk_weight: Option<f64>,
}

/// A catalog question.
///
/// `risk_weight` is the base contribution weight in `[0, 1]`. `min`/`max`
/// bound `number` answers for normalization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub text: String,
    /// Filled from the enclosing category when the catalog is loaded.
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuestionOption>>,
    #[serde(alias = "risk_weight")]
    pub risk_weight: f64,
    #[serde(default, alias = "gdpr_articles")]
    pub gdpr_articles: Vec<String>,
    #[serde(default, alias = "help_text", skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Question {
    /// Declared options, empty for non-choice questions.
    #[must_use]
    pub fn options(&self) -> &[QuestionOption] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Look up an option by its value.
    #[must_use]
    pub fn option(&self, value: &str) -> Option<&QuestionOption> {
        self.options().iter().find(|o| o.value == value)
    }

    /// Numeric bounds, present only when both `min` and `max` are declared.
    #[must_use]
    pub const fn bounds(&self) -> Option<(f64, f64)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }
}

/// A group of related questions used for sub-score reporting.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Replaces the built-in protective-measure text when this category is high risk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    pub questions: Vec<Question>,
}

/// The catalog document as loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CatalogDocument {
    pub categories: Vec<Category>,
}
