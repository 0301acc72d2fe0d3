//! # dpia-engine
//!
//! Risk aggregation and mitigation engine for Data Protection Impact
//! Assessments.
//!
//! Takes answers to catalog questions, derives a risk score per response,
//! aggregates per-category and overall scores, classifies them into risk
//! levels, generates recommendations, and tracks mitigation measures.
//! Assessment headers and an optional GDPR article catalog decorate the
//! exported report.
//!
//! Storage is injected through the [`store::ResponseRepository`] and
//! [`store::MitigationRepository`] traits; the bundled in-memory stores are
//! safe to share across threads.
//!
//! ```
//! use std::sync::Arc;
//! use dpia_engine::{AssessmentService, Catalog};
//! use serde_json::json;
//!
//! let catalog = Catalog::from_json(r#"{"categories": [{
//!     "id": "security", "title": "Security",
//!     "questions": [{"id": "q1", "type": "text", "riskWeight": 0.7}]
//! }]}"#).unwrap();
//! let service = AssessmentService::in_memory(Arc::new(catalog));
//!
//! service.responses().upsert_response("a1", "q1", json!("Shared drive"), None).unwrap();
//! let summary = service.summarize("a1").unwrap();
//! assert_eq!(summary.high_risk_areas, vec!["security".to_string()]);
//! ```

pub mod answers;
pub mod articles;
pub mod assessments;
pub mod catalog;
pub mod classifier;
pub mod error;
pub mod mitigation;
pub mod recommendations;
pub mod responses;
pub mod scorer;
pub mod service;
pub mod store;
pub mod updates;

#[cfg(test)]
pub(crate) mod test_support;

pub use articles::ArticleCatalog;
pub use assessments::AssessmentRegistry;
pub use catalog::Catalog;
pub use error::{CatalogError, EngineError};
pub use mitigation::MitigationTracker;
pub use responses::ResponseStore;
pub use service::AssessmentService;
