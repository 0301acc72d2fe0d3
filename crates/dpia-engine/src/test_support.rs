//! Shared fixtures for engine unit tests.

use std::sync::Arc;

use serde_json::json;

use crate::catalog::Catalog;
use crate::service::AssessmentService;

/// Three categories covering every question type.
pub fn sample_catalog() -> Catalog {
    let doc = json!({
        "categories": [
            {
                "id": "data-security",
                "title": "Data Security",
                "questions": [
                    {
                        "id": "sec-encryption", "type": "radio", "riskWeight": 0.5,
                        "gdprArticles": ["32"],
                        "options": [
                            { "value": "yes", "riskWeight": 0.1 },
                            { "value": "partial", "riskWeight": 0.5 },
                            { "value": "no", "riskWeight": 0.9 }
                        ]
                    },
                    {
                        "id": "sec-storage", "type": "select", "riskWeight": 0.6,
                        "options": [
                            { "value": "on-premise", "riskWeight": 0.3 },
                            { "value": "cloud-eu", "riskWeight": 0.4 },
                            { "value": "cloud-non-eu", "riskWeight": 0.8 },
                            { "value": "unknown" }
                        ]
                    },
                    {
                        "id": "sec-breaches", "type": "number", "riskWeight": 0.7,
                        "required": false, "min": 0, "max": 10
                    }
                ]
            },
            {
                "id": "data-sharing",
                "title": "Data Sharing",
                "questions": [
                    {
                        "id": "share-recipients", "type": "multi-select", "riskWeight": 0.5,
                        "gdprArticles": ["28", "44"],
                        "options": [
                            { "value": "none", "riskWeight": 0.0 },
                            { "value": "processors", "riskWeight": 0.4 },
                            { "value": "third-parties", "riskWeight": 0.7 },
                            { "value": "international", "riskWeight": 0.9 }
                        ]
                    },
                    {
                        "id": "share-purpose", "type": "textarea", "riskWeight": 0.3,
                        "required": false
                    }
                ]
            },
            {
                "id": "data-subjects",
                "title": "Data Subjects",
                "questions": [
                    { "id": "subj-volume", "type": "number", "riskWeight": 0.4 },
                    {
                        "id": "subj-children", "type": "radio", "riskWeight": 0.5,
                        "gdprArticles": ["8"],
                        "options": [
                            { "value": "yes", "riskWeight": 0.9 },
                            { "value": "no", "riskWeight": 0.1 }
                        ]
                    },
                    { "id": "subj-notes", "type": "text", "riskWeight": 0.2, "required": false }
                ]
            }
        ]
    });
    Catalog::from_json(&doc.to_string()).expect("sample catalog is valid")
}

pub fn sample_service() -> AssessmentService {
    AssessmentService::in_memory(Arc::new(sample_catalog()))
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
