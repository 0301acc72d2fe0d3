//! Mitigation tracker.
//!
//! Owns the mitigation lifecycle. Status moves along the cycle
//! `proposed → implemented → rejected → proposed` or jumps directly via
//! [`MitigationTracker::set_status`]; no state is terminal.

use std::sync::Arc;

use chrono::Utc;
use dpia_core::entities::Mitigation;
use dpia_core::enums::{MitigationStatus, Priority};
use dpia_core::ids::{PREFIX_MITIGATION, generate_id};
use dpia_core::report::MitigationProgress;

use crate::error::EngineError;
use crate::store::{MitigationRepository, ResponseRepository, next_timestamp};
use crate::updates::mitigation::MitigationUpdate;

#[derive(Clone)]
pub struct MitigationTracker {
    responses: Arc<dyn ResponseRepository>,
    repo: Arc<dyn MitigationRepository>,
}

impl MitigationTracker {
    #[must_use]
    pub fn new(
        responses: Arc<dyn ResponseRepository>,
        repo: Arc<dyn MitigationRepository>,
    ) -> Self {
        Self { responses, repo }
    }

    /// Create a `proposed` mitigation attached to a response.
    ///
    /// The description is trimmed; a blank `gdpr_article` is stored as `None`.
    ///
    /// # Errors
    ///
    /// - `EngineError::EmptyDescription` if the description is blank.
    /// - `EngineError::UnknownResponse` if the response does not exist.
    pub fn create(
        &self,
        response_id: &str,
        description: &str,
        gdpr_article: Option<String>,
        priority: Option<Priority>,
    ) -> Result<Mitigation, EngineError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(EngineError::EmptyDescription);
        }
        if self.responses.get_by_id(response_id)?.is_none() {
            return Err(EngineError::UnknownResponse(response_id.to_string()));
        }

        let now = Utc::now();
        let mitigation = Mitigation {
            id: generate_id(PREFIX_MITIGATION)?,
            response_id: response_id.to_string(),
            description: description.to_string(),
            status: MitigationStatus::Proposed,
            gdpr_article: normalize_article(gdpr_article),
            priority,
            created_at: now,
            updated_at: now,
        };
        self.repo.insert(mitigation.clone())?;

        tracing::debug!(
            mitigation = %mitigation.id,
            response = response_id,
            ?priority,
            "mitigation created"
        );
        Ok(mitigation)
    }

    /// Move one step forward along the status cycle.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownMitigation` if the id does not exist.
    pub fn advance(&self, mitigation_id: &str) -> Result<Mitigation, EngineError> {
        let updated = self.modify(mitigation_id, |m| m.status = m.status.next())?;
        tracing::debug!(mitigation = mitigation_id, status = %updated.status, "mitigation advanced");
        Ok(updated)
    }

    /// Jump directly to `status`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownMitigation` if the id does not exist.
    pub fn set_status(
        &self,
        mitigation_id: &str,
        status: MitigationStatus,
    ) -> Result<Mitigation, EngineError> {
        let updated = self.modify(mitigation_id, |m| m.status = status)?;
        tracing::debug!(mitigation = mitigation_id, %status, "mitigation status set");
        Ok(updated)
    }

    /// Apply a partial update. An empty update returns the record unchanged.
    ///
    /// # Errors
    ///
    /// - `EngineError::EmptyDescription` if the update sets a blank description.
    /// - `EngineError::UnknownMitigation` if the id does not exist.
    pub fn update(
        &self,
        mitigation_id: &str,
        mut update: MitigationUpdate,
    ) -> Result<Mitigation, EngineError> {
        if update.is_empty() {
            return self.get(mitigation_id);
        }
        if let Some(description) = update.description.as_mut() {
            let trimmed = description.trim();
            if trimmed.is_empty() {
                return Err(EngineError::EmptyDescription);
            }
            *description = trimmed.to_string();
        }
        if let Some(article) = update.gdpr_article.take() {
            update.gdpr_article = Some(normalize_article(article));
        }

        self.modify(mitigation_id, |m| update.apply(m))
    }

    /// # Errors
    ///
    /// Returns `EngineError::UnknownMitigation` if the id does not exist.
    pub fn get(&self, mitigation_id: &str) -> Result<Mitigation, EngineError> {
        self.repo
            .get(mitigation_id)?
            .ok_or_else(|| EngineError::UnknownMitigation(mitigation_id.to_string()))
    }

    /// Mitigations attached to a response, in creation order.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repository.
    pub fn list_for_response(&self, response_id: &str) -> Result<Vec<Mitigation>, EngineError> {
        self.repo.list_for_response(response_id)
    }

    /// Status counts over the given mitigations.
    pub fn progress<'a>(mitigations: impl IntoIterator<Item = &'a Mitigation>) -> MitigationProgress {
        MitigationProgress::tally(mitigations)
    }

    fn modify(
        &self,
        mitigation_id: &str,
        mut change: impl FnMut(&mut Mitigation),
    ) -> Result<Mitigation, EngineError> {
        self.repo
            .modify(mitigation_id, &mut |m: &mut Mitigation| {
                change(m);
                m.updated_at = next_timestamp(m.updated_at);
            })?
            .ok_or_else(|| EngineError::UnknownMitigation(mitigation_id.to_string()))
    }
}

fn normalize_article(article: Option<String>) -> Option<String> {
    article
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::store::{MemoryMitigationStore, MemoryResponseStore, ResponseDraft};
    use crate::updates::mitigation::MitigationUpdateBuilder;

    fn tracker_with_response() -> (MitigationTracker, String) {
        let responses = Arc::new(MemoryResponseStore::new());
        let response = responses
            .upsert(ResponseDraft {
                assessment_id: "a1".into(),
                question_id: "sec-encryption".into(),
                category: "data-security".into(),
                answer: json!("no"),
                risk_score: 0.9,
                notes: None,
            })
            .unwrap();
        let tracker = MitigationTracker::new(responses, Arc::new(MemoryMitigationStore::new()));
        (tracker, response.id)
    }

    #[test]
    fn create_starts_proposed() {
        let (tracker, response_id) = tracker_with_response();
        let m = tracker
            .create(&response_id, "  Encrypt the NAS  ", Some(" 32 ".into()), Some(Priority::High))
            .unwrap();
        assert_eq!(m.status, MitigationStatus::Proposed);
        assert_eq!(m.description, "Encrypt the NAS");
        assert_eq!(m.gdpr_article.as_deref(), Some("32"));
        assert!(m.id.starts_with("mit-"));
    }

    #[test]
    fn create_rejects_blank_description() {
        let (tracker, response_id) = tracker_with_response();
        let err = tracker.create(&response_id, " \t ", None, None).unwrap_err();
        assert!(matches!(err, EngineError::EmptyDescription));
    }

    #[test]
    fn create_rejects_unknown_response() {
        let (tracker, _) = tracker_with_response();
        let err = tracker.create("rsp-nothere", "Encrypt", None, None).unwrap_err();
        assert!(matches!(err, EngineError::UnknownResponse(ref id) if id == "rsp-nothere"));
    }

    #[test]
    fn advance_cycles_through_all_states() {
        let (tracker, response_id) = tracker_with_response();
        let m = tracker.create(&response_id, "Encrypt", None, None).unwrap();

        let seen: Vec<MitigationStatus> = (0..3)
            .map(|_| tracker.advance(&m.id).unwrap().status)
            .collect();
        assert_eq!(
            seen,
            vec![
                MitigationStatus::Implemented,
                MitigationStatus::Rejected,
                MitigationStatus::Proposed
            ]
        );
    }

    #[test]
    fn set_status_jumps_and_bumps_updated_at() {
        let (tracker, response_id) = tracker_with_response();
        let m = tracker.create(&response_id, "Encrypt", None, None).unwrap();
        let rejected = tracker.set_status(&m.id, MitigationStatus::Rejected).unwrap();
        assert_eq!(rejected.status, MitigationStatus::Rejected);
        assert!(rejected.updated_at > m.updated_at);
        assert_eq!(rejected.created_at, m.created_at);
    }

    #[test]
    fn unknown_mitigation_errors() {
        let (tracker, _) = tracker_with_response();
        assert!(matches!(
            tracker.advance("mit-missing").unwrap_err(),
            EngineError::UnknownMitigation(_)
        ));
        assert!(matches!(
            tracker.set_status("mit-missing", MitigationStatus::Implemented).unwrap_err(),
            EngineError::UnknownMitigation(_)
        ));
        assert!(matches!(tracker.get("mit-missing").unwrap_err(), EngineError::UnknownMitigation(_)));
    }

    #[test]
    fn update_applies_fields_and_rejects_blank_description() {
        let (tracker, response_id) = tracker_with_response();
        let m = tracker.create(&response_id, "Encrypt", Some("32".into()), None).unwrap();

        let err = tracker
            .update(&m.id, MitigationUpdateBuilder::new().description("  ").build())
            .unwrap_err();
        assert!(matches!(err, EngineError::EmptyDescription));

        let updated = tracker
            .update(
                &m.id,
                MitigationUpdateBuilder::new()
                    .description("Encrypt with AES-256")
                    .gdpr_article(Some(String::new()))
                    .priority(Some(Priority::Medium))
                    .build(),
            )
            .unwrap();
        assert_eq!(updated.description, "Encrypt with AES-256");
        assert_eq!(updated.gdpr_article, None);
        assert_eq!(updated.priority, Some(Priority::Medium));

        let unchanged = tracker.update(&m.id, MitigationUpdate::default()).unwrap();
        assert_eq!(unchanged, updated);
    }

    #[test]
    fn list_and_progress() {
        let (tracker, response_id) = tracker_with_response();
        let a = tracker.create(&response_id, "Encrypt", None, None).unwrap();
        tracker.create(&response_id, "Audit access", None, None).unwrap();
        tracker.advance(&a.id).unwrap();

        let listed = tracker.list_for_response(&response_id).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, a.id);

        let progress = MitigationTracker::progress(&listed);
        assert_eq!(progress.implemented, 1);
        assert_eq!(progress.proposed, 1);
        assert_eq!(progress.total, 2);
    }
}
