//! Engine error types.
//!
//! `CatalogError` is fatal: the engine cannot be constructed without a valid
//! catalog. Every `EngineError` is returned at the offending call and leaves
//! stored state unchanged.

use std::path::PathBuf;

use dpia_core::errors::CoreError;
use thiserror::Error;

/// The catalog document could not be loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or misses a required field.
    #[error("Malformed catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but violates a catalog constraint.
    #[error("Invalid catalog at {location}: {reason}")]
    Invalid { location: String, reason: String },
}

impl CatalogError {
    pub(crate) fn invalid(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Catalog loading failed.
    #[error(transparent)]
    CatalogLoad(#[from] CatalogError),

    /// The answer references a question the catalog does not define.
    #[error("Invalid answer: question '{question_id}' is not in the catalog")]
    InvalidAnswer { question_id: String },

    /// The answer does not fit the question's type or options.
    #[error("Answer to '{question_id}' must be {expected}: {reason}")]
    AnswerTypeMismatch {
        question_id: String,
        expected: String,
        reason: String,
    },

    /// No response stored for this assessment/question pair.
    #[error("No response to '{question_id}' in assessment '{assessment_id}'")]
    ResponseNotFound {
        assessment_id: String,
        question_id: String,
    },

    /// A mitigation referenced a response id that does not exist.
    #[error("Unknown response: {0}")]
    UnknownResponse(String),

    /// The mitigation id does not exist.
    #[error("Unknown mitigation: {0}")]
    UnknownMitigation(String),

    /// Mitigation description was empty or whitespace.
    #[error("Mitigation description must not be blank")]
    EmptyDescription,

    /// No assessment header registered under this id.
    #[error("Unknown assessment: {0}")]
    UnknownAssessment(String),

    /// An assessment header with this id already exists.
    #[error("Assessment already exists: {0}")]
    AssessmentExists(String),

    /// An assessment header field is blank or too long.
    #[error("Invalid assessment {field}: {reason}")]
    InvalidAssessment { field: &'static str, reason: String },

    /// Likelihood or impact outside `1..=5`.
    #[error("{field} must be between 1 and 5, got {value}")]
    InvalidRating { field: &'static str, value: u8 },

    /// The injected storage collaborator failed.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl EngineError {
    /// Whether the caller can fix the input and retry.
    #[must_use]
    pub const fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::InvalidAnswer { .. }
                | Self::AnswerTypeMismatch { .. }
                | Self::EmptyDescription
                | Self::AssessmentExists(_)
                | Self::InvalidAssessment { .. }
                | Self::InvalidRating { .. }
        )
    }

    /// Question id for errors that should render as a field-level form error.
    #[must_use]
    pub fn question_id(&self) -> Option<&str> {
        match self {
            Self::InvalidAnswer { question_id }
            | Self::AnswerTypeMismatch { question_id, .. }
            | Self::ResponseNotFound { question_id, .. } => Some(question_id),
            _ => None,
        }
    }
}
