//! Assessment headers.
//!
//! Title, organization, description and lifecycle status of an assessment.
//! Registering a header is optional: responses, summaries and mitigations
//! work on bare assessment ids, and the header only decorates reports.

use std::sync::Arc;

use chrono::Utc;
use dpia_core::entities::Assessment;
use dpia_core::enums::AssessmentStatus;

use crate::error::EngineError;
use crate::store::{ResponseRepository, next_timestamp};
use crate::updates::assessment::AssessmentUpdate;

/// Longest accepted title or organization name, in characters.
pub const MAX_NAME_LEN: usize = 255;

#[derive(Clone)]
pub struct AssessmentRegistry {
    repo: Arc<dyn ResponseRepository>,
}

impl AssessmentRegistry {
    #[must_use]
    pub fn new(repo: Arc<dyn ResponseRepository>) -> Self {
        Self { repo }
    }

    /// Register a `draft` header for `assessment_id`.
    ///
    /// Title and organization are trimmed; a blank description is stored as
    /// `None`.
    ///
    /// # Errors
    ///
    /// - `EngineError::InvalidAssessment` for a blank id, a blank or overlong
    ///   title or organization.
    /// - `EngineError::AssessmentExists` if a header is already registered.
    pub fn create(
        &self,
        assessment_id: &str,
        title: &str,
        organization: &str,
        description: Option<String>,
    ) -> Result<Assessment, EngineError> {
        let id = assessment_id.trim();
        if id.is_empty() {
            return Err(EngineError::InvalidAssessment {
                field: "id",
                reason: "must not be blank".into(),
            });
        }

        let now = Utc::now();
        let assessment = Assessment {
            id: id.to_string(),
            title: check_name("title", title)?,
            organization: check_name("organization", organization)?,
            description: normalize_description(description),
            status: AssessmentStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        if !self.repo.insert_assessment(assessment.clone())? {
            return Err(EngineError::AssessmentExists(id.to_string()));
        }

        tracing::debug!(assessment = id, title = %assessment.title, "assessment registered");
        Ok(assessment)
    }

    /// # Errors
    ///
    /// Returns `EngineError::UnknownAssessment` if no header is registered.
    pub fn get(&self, assessment_id: &str) -> Result<Assessment, EngineError> {
        self.find(assessment_id)?
            .ok_or_else(|| EngineError::UnknownAssessment(assessment_id.to_string()))
    }

    /// # Errors
    ///
    /// Returns storage errors from the repository.
    pub fn find(&self, assessment_id: &str) -> Result<Option<Assessment>, EngineError> {
        self.repo.assessment(assessment_id)
    }

    /// Apply a partial update. An empty update returns the header unchanged.
    ///
    /// # Errors
    ///
    /// - `EngineError::InvalidAssessment` if the update sets a blank or
    ///   overlong title or organization.
    /// - `EngineError::UnknownAssessment` if no header is registered.
    pub fn update(
        &self,
        assessment_id: &str,
        mut update: AssessmentUpdate,
    ) -> Result<Assessment, EngineError> {
        if update.is_empty() {
            return self.get(assessment_id);
        }
        if let Some(title) = update.title.take() {
            update.title = Some(check_name("title", &title)?);
        }
        if let Some(organization) = update.organization.take() {
            update.organization = Some(check_name("organization", &organization)?);
        }
        if let Some(description) = update.description.take() {
            update.description = Some(normalize_description(description));
        }

        self.modify(assessment_id, |a| update.apply(a))
    }

    /// Jump directly to `status`. Any status may follow any other.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownAssessment` if no header is registered.
    pub fn set_status(
        &self,
        assessment_id: &str,
        status: AssessmentStatus,
    ) -> Result<Assessment, EngineError> {
        let updated = self.modify(assessment_id, |a| a.status = status)?;
        tracing::debug!(assessment = assessment_id, %status, "assessment status set");
        Ok(updated)
    }

    fn modify(
        &self,
        assessment_id: &str,
        mut change: impl FnMut(&mut Assessment),
    ) -> Result<Assessment, EngineError> {
        self.repo
            .modify_assessment(assessment_id, &mut |a: &mut Assessment| {
                change(a);
                a.updated_at = next_timestamp(a.updated_at);
            })?
            .ok_or_else(|| EngineError::UnknownAssessment(assessment_id.to_string()))
    }
}

/// Move a registered `draft` header to `in_progress`. No-op for other
/// statuses and for assessments without a header.
pub(crate) fn mark_started(
    repo: &dyn ResponseRepository,
    assessment_id: &str,
) -> Result<(), EngineError> {
    repo.modify_assessment(assessment_id, &mut |a: &mut Assessment| {
        if a.status == AssessmentStatus::Draft {
            a.status = AssessmentStatus::InProgress;
            a.updated_at = next_timestamp(a.updated_at);
        }
    })?;
    Ok(())
}

fn check_name(field: &'static str, value: &str) -> Result<String, EngineError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EngineError::InvalidAssessment {
            field,
            reason: "must not be blank".into(),
        });
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(EngineError::InvalidAssessment {
            field,
            reason: format!("must be at most {MAX_NAME_LEN} characters"),
        });
    }
    Ok(value.to_string())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::MemoryResponseStore;
    use crate::updates::assessment::AssessmentUpdateBuilder;

    fn registry() -> AssessmentRegistry {
        AssessmentRegistry::new(Arc::new(MemoryResponseStore::new()))
    }

    #[test]
    fn create_starts_as_draft_with_trimmed_fields() {
        let registry = registry();
        let created = registry
            .create("a1", "  Payroll ", "Acme GmbH", Some("   ".into()))
            .unwrap();
        assert_eq!(created.title, "Payroll");
        assert_eq!(created.status, AssessmentStatus::Draft);
        assert_eq!(created.description, None);
        assert_eq!(registry.get("a1").unwrap(), created);
    }

    #[test]
    fn create_rejects_duplicates_and_blank_fields() {
        let registry = registry();
        registry.create("a1", "Payroll", "Acme", None).unwrap();
        assert!(matches!(
            registry.create("a1", "Payroll", "Acme", None).unwrap_err(),
            EngineError::AssessmentExists(ref id) if id == "a1"
        ));
        assert!(matches!(
            registry.create("a2", " ", "Acme", None).unwrap_err(),
            EngineError::InvalidAssessment { field: "title", .. }
        ));
        assert!(matches!(
            registry.create("a3", "Payroll", &"x".repeat(256), None).unwrap_err(),
            EngineError::InvalidAssessment { field: "organization", .. }
        ));
        assert!(registry.find("a2").unwrap().is_none());
    }

    #[test]
    fn update_validates_and_bumps_updated_at() {
        let registry = registry();
        let created = registry.create("a1", "Payroll", "Acme", None).unwrap();

        let err = registry
            .update("a1", AssessmentUpdateBuilder::new().title("").build())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAssessment { field: "title", .. }));

        let updated = registry
            .update(
                "a1",
                AssessmentUpdateBuilder::new()
                    .organization("Acme AG")
                    .description(Some(" Outsourced payroll ".into()))
                    .build(),
            )
            .unwrap();
        assert_eq!(updated.organization, "Acme AG");
        assert_eq!(updated.description.as_deref(), Some("Outsourced payroll"));
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn unknown_assessment_errors() {
        let registry = registry();
        assert!(matches!(
            registry.get("nope").unwrap_err(),
            EngineError::UnknownAssessment(_)
        ));
        assert!(matches!(
            registry.set_status("nope", AssessmentStatus::Completed).unwrap_err(),
            EngineError::UnknownAssessment(_)
        ));
    }

    #[test]
    fn mark_started_only_moves_drafts() {
        let repo = Arc::new(MemoryResponseStore::new());
        let registry = AssessmentRegistry::new(Arc::clone(&repo) as Arc<dyn ResponseRepository>);
        mark_started(repo.as_ref(), "unregistered").unwrap();

        registry.create("a1", "Payroll", "Acme", None).unwrap();
        mark_started(repo.as_ref(), "a1").unwrap();
        assert_eq!(registry.get("a1").unwrap().status, AssessmentStatus::InProgress);

        registry.set_status("a1", AssessmentStatus::Completed).unwrap();
        mark_started(repo.as_ref(), "a1").unwrap();
        assert_eq!(registry.get("a1").unwrap().status, AssessmentStatus::Completed);
    }
}
