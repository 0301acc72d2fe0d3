//! Storage collaborators.
//!
//! The engine never persists anything itself: assessment headers, responses,
//! risk reviews and mitigations go through these traits. Implementations must be safe to
//! share across threads and must apply each write atomically per key.

mod memory;

pub use memory::{MemoryMitigationStore, MemoryResponseStore};

use chrono::{DateTime, TimeDelta, Utc};
use dpia_core::entities::{Assessment, Mitigation, Response, RiskReview};
use serde_json::Value;

use crate::error::EngineError;

/// A validated, scored answer ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDraft {
    pub assessment_id: String,
    pub question_id: String,
    pub category: String,
    pub answer: Value,
    pub risk_score: f64,
    pub notes: Option<String>,
}

/// Assessment header, response and risk-review persistence.
///
/// All three are keyed by assessment id so one assessment's writes can be
/// serialized together.
pub trait ResponseRepository: Send + Sync {
    /// Insert or overwrite the record keyed by `(assessment_id, question_id)`.
    ///
    /// An overwrite keeps `id` and `created_at` and moves `updated_at`
    /// strictly forward.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` or `EngineError::Core` if the record
    /// cannot be written.
    fn upsert(&self, draft: ResponseDraft) -> Result<Response, EngineError>;

    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the backing store fails.
    fn get(&self, assessment_id: &str, question_id: &str) -> Result<Option<Response>, EngineError>;

    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the backing store fails.
    fn get_by_id(&self, response_id: &str) -> Result<Option<Response>, EngineError>;

    /// Consistent snapshot of an assessment's responses, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the backing store fails.
    fn list(&self, assessment_id: &str) -> Result<Vec<Response>, EngineError>;

    /// Replace the assessment's risk review.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the backing store fails.
    fn save_review(&self, review: RiskReview) -> Result<(), EngineError>;

    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the backing store fails.
    fn review(&self, assessment_id: &str) -> Result<Option<RiskReview>, EngineError>;

    /// Store a new assessment header. Returns `false` without writing if a
    /// header with the same id exists.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the backing store fails.
    fn insert_assessment(&self, assessment: Assessment) -> Result<bool, EngineError>;

    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the backing store fails.
    fn assessment(&self, assessment_id: &str) -> Result<Option<Assessment>, EngineError>;

    /// Apply `change` to the header while holding the assessment's lock and
    /// return the updated header, or `None` if none is registered.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the backing store fails.
    fn modify_assessment(
        &self,
        assessment_id: &str,
        change: &mut dyn FnMut(&mut Assessment),
    ) -> Result<Option<Assessment>, EngineError>;
}

/// Mitigation persistence.
pub trait MitigationRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the id already exists or the write
    /// fails.
    fn insert(&self, mitigation: Mitigation) -> Result<(), EngineError>;

    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the backing store fails.
    fn get(&self, mitigation_id: &str) -> Result<Option<Mitigation>, EngineError>;

    /// Apply `change` to the record while holding its lock and return the
    /// updated record, or `None` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the backing store fails.
    fn modify(
        &self,
        mitigation_id: &str,
        change: &mut dyn FnMut(&mut Mitigation),
    ) -> Result<Option<Mitigation>, EngineError>;

    /// Mitigations attached to a response, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the backing store fails.
    fn list_for_response(&self, response_id: &str) -> Result<Vec<Mitigation>, EngineError>;
}

/// Timestamp for a write to a record last touched at `previous`.
///
/// Returns the current time, or `previous` plus one microsecond when the
/// clock has not advanced past it.
#[must_use]
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}
