//! Assessment header update builder.

use dpia_core::entities::Assessment;
use dpia_core::enums::AssessmentStatus;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssessmentStatus>,
}

impl AssessmentUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.organization.is_none()
            && self.description.is_none()
            && self.status.is_none()
    }

    /// Copy the set fields onto `assessment`. Timestamps are left alone.
    pub fn apply(&self, assessment: &mut Assessment) {
        if let Some(title) = &self.title {
            assessment.title.clone_from(title);
        }
        if let Some(organization) = &self.organization {
            assessment.organization.clone_from(organization);
        }
        if let Some(description) = &self.description {
            assessment.description.clone_from(description);
        }
        if let Some(status) = self.status {
            assessment.status = status;
        }
    }
}

pub struct AssessmentUpdateBuilder(AssessmentUpdate);

impl AssessmentUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AssessmentUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.0.organization = Some(organization.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn status(mut self, status: AssessmentStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn build(self) -> AssessmentUpdate {
        self.0
    }
}

impl Default for AssessmentUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
