//! Central schema registry for all DPIA types.
//!
//! The `SchemaRegistry` builds JSON Schemas from dpia-core types at construction
//! time using [`schemars::schema_for!`] and provides validation via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Central store of all JSON Schemas exposed to collaborators.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Generate the schema for `$ty` and store it under `$name`.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    /// Build a new registry containing the catalog, entity, and report schemas.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Catalog input (3) ---
        register!(
            schemas,
            "catalog_document",
            dpia_core::entities::CatalogDocument
        );
        register!(schemas, "category", dpia_core::entities::Category);
        register!(schemas, "question", dpia_core::entities::Question);

        // --- Entities (7) ---
        register!(
            schemas,
            "answer_submission",
            dpia_core::entities::AnswerSubmission
        );
        register!(schemas, "response", dpia_core::entities::Response);
        register!(schemas, "mitigation", dpia_core::entities::Mitigation);
        register!(schemas, "risk_review", dpia_core::entities::RiskReview);
        register!(schemas, "matrix_score", dpia_core::entities::MatrixScore);
        register!(schemas, "assessment", dpia_core::entities::Assessment);
        register!(schemas, "gdpr_article", dpia_core::entities::GdprArticle);

        // --- Report output (5) ---
        register!(schemas, "risk_summary", dpia_core::report::RiskSummary);
        register!(
            schemas,
            "summary_diagnostics",
            dpia_core::report::SummaryDiagnostics
        );
        register!(
            schemas,
            "assessment_progress",
            dpia_core::report::AssessmentProgress
        );
        register!(
            schemas,
            "mitigation_progress",
            dpia_core::report::MitigationProgress
        );
        register!(
            schemas,
            "assessment_report",
            dpia_core::report::AssessmentReport
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use dpia_core::entities::Mitigation;
    use dpia_core::enums::{MitigationStatus, RiskLevel};
    use dpia_core::report::RiskSummary;
    use serde_json::json;

    use super::*;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    #[test]
    fn registry_has_expected_count() {
        // 3 catalog + 7 entities + 5 report shapes
        assert_eq!(registry().schema_count(), 15);
    }

    #[test]
    fn registry_list_is_sorted() {
        let names = registry().list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"risk_summary"));
    }

    #[test]
    fn unknown_schema_is_not_found() {
        let err = registry().validate("nope", &json!({})).unwrap_err();
        assert!(matches!(err, SchemaError::NotFound(ref name) if name == "nope"));
    }

    #[test]
    fn summary_instance_validates() {
        let summary = RiskSummary {
            overall_risk_score: 0.6,
            overall_risk_level: RiskLevel::High,
            category_scores: BTreeMap::from([("security".to_string(), 0.6)]),
            high_risk_areas: vec!["security".into()],
            recommendations: vec!["Encrypt data at rest".into()],
        };
        let value = serde_json::to_value(&summary).unwrap();
        registry().validate("risk_summary", &value).unwrap();
    }

    #[test]
    fn summary_with_unknown_level_fails() {
        let value = json!({
            "overallRiskScore": 0.6,
            "overallRiskLevel": "severe",
            "categoryScores": {},
            "highRiskAreas": [],
            "recommendations": []
        });
        let err = registry().validate("risk_summary", &value).unwrap_err();
        assert!(matches!(err, SchemaError::ValidationFailed { .. }));
    }

    #[test]
    fn mitigation_instance_validates() {
        let mitigation = Mitigation {
            id: "mit-00000001".into(),
            response_id: "rsp-00000001".into(),
            description: "Sign a data processing agreement".into(),
            status: MitigationStatus::Proposed,
            gdpr_article: Some("28".into()),
            priority: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&mitigation).unwrap();
        registry().validate("mitigation", &value).unwrap();
    }

    #[test]
    fn assessment_status_is_constrained() {
        let mut value = json!({
            "id": "dpia-1",
            "title": "Payroll outsourcing",
            "organization": "Acme GmbH",
            "status": "in_progress",
            "createdAt": "2026-01-05T09:00:00Z",
            "updatedAt": "2026-01-05T09:00:00Z"
        });
        registry().validate("assessment", &value).unwrap();

        value["status"] = json!("archived");
        assert!(registry().validate("assessment", &value).is_err());
    }

    #[test]
    fn catalog_document_requires_question_type() {
        let value = json!({
            "categories": [{
                "id": "security",
                "title": "Security",
                "questions": [{ "id": "q1", "riskWeight": 0.4 }]
            }]
        });
        assert!(registry().validate("catalog_document", &value).is_err());
    }
}
