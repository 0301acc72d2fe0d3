//! Mitigation update builder.

use dpia_core::entities::Mitigation;
use dpia_core::enums::{MitigationStatus, Priority};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MitigationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MitigationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gdpr_article: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<Priority>>,
}

impl MitigationUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.status.is_none()
            && self.gdpr_article.is_none()
            && self.priority.is_none()
    }

    /// Copy the set fields onto `mitigation`. Timestamps are left alone.
    pub fn apply(&self, mitigation: &mut Mitigation) {
        if let Some(description) = &self.description {
            mitigation.description.clone_from(description);
        }
        if let Some(status) = self.status {
            mitigation.status = status;
        }
        if let Some(article) = &self.gdpr_article {
            mitigation.gdpr_article.clone_from(article);
        }
        if let Some(priority) = self.priority {
            mitigation.priority = priority;
        }
    }
}

pub struct MitigationUpdateBuilder(MitigationUpdate);

impl MitigationUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(MitigationUpdate::default())
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: MitigationStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn gdpr_article(mut self, gdpr_article: Option<String>) -> Self {
        self.0.gdpr_article = Some(gdpr_article);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: Option<Priority>) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn build(self) -> MitigationUpdate {
        self.0
    }
}

impl Default for MitigationUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_only_changed_fields() {
        let update = MitigationUpdateBuilder::new()
            .status(MitigationStatus::Implemented)
            .gdpr_article(None)
            .build();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "status": "implemented", "gdprArticle": null })
        );
    }

    #[test]
    fn empty_update_is_empty() {
        assert!(MitigationUpdateBuilder::new().build().is_empty());
        assert!(!MitigationUpdateBuilder::new().priority(None).build().is_empty());
    }

    #[test]
    fn apply_clears_and_sets() {
        let mut mitigation = Mitigation {
            id: "mit-00000001".into(),
            response_id: "rsp-00000001".into(),
            description: "Encrypt backups".into(),
            status: MitigationStatus::Proposed,
            gdpr_article: Some("32".into()),
            priority: Some(Priority::Low),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        MitigationUpdateBuilder::new()
            .description("Encrypt backups with managed keys")
            .gdpr_article(None)
            .priority(Some(Priority::High))
            .build()
            .apply(&mut mitigation);

        assert_eq!(mitigation.description, "Encrypt backups with managed keys");
        assert_eq!(mitigation.gdpr_article, None);
        assert_eq!(mitigation.priority, Some(Priority::High));
        assert_eq!(mitigation.status, MitigationStatus::Proposed);
    }
}
