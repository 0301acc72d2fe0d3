//! Serde roundtrip and JsonSchema validation tests for entity and report types.

use std::collections::BTreeMap;

use chrono::Utc;
use schemars::schema_for;
use serde_json::json;
use dpia_core::entities::*;
use dpia_core::enums::*;
use dpia_core::report::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_question() -> Question {
    Question {
        id: "q-special-data".into(),
        text: "Which special categories of data are processed?".into(),
        category: "data-sensitivity".into(),
        question_type: QuestionType::MultiSelect,
        options: Some(vec![
            QuestionOption {
                value: "health".into(),
                label: "Health data".into(),
                risk_weight: Some(0.9),
            },
            QuestionOption {
                value: "none".into(),
                label: "None".into(),
                risk_weight: None,
            },
        ]),
        risk_weight: 0.5,
        gdpr_articles: vec!["9".into()],
        help_text: None,
        required: true,
        min: None,
        max: None,
    }
}

fn sample_response() -> Response {
    Response {
        id: "rsp-a3f8b2c1".into(),
        assessment_id: "crm-migration".into(),
        question_id: "q-special-data".into(),
        category: "data-sensitivity".into(),
        answer: json!(["health"]),
        risk_score: 0.9,
        notes: Some("Confirmed with the data owner".into()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_mitigation() -> Mitigation {
    Mitigation {
        id: "mit-0badf00d".into(),
        response_id: "rsp-a3f8b2c1".into(),
        description: "Pseudonymize health records before analytics".into(),
        status: MitigationStatus::Implemented,
        gdpr_article: Some("32".into()),
        priority: Some(Priority::High),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_assessment() -> Assessment {
    Assessment {
        id: "crm-migration".into(),
        title: "CRM migration".into(),
        organization: "Acme GmbH".into(),
        description: Some("Move customer records to a hosted CRM".into()),
        status: AssessmentStatus::InProgress,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_article() -> GdprArticle {
    GdprArticle {
        number: "32".into(),
        title: "Security of processing".into(),
        summary: "Appropriate technical and organisational measures".into(),
        full_text: None,
        relevance: Some("Drives encryption and access-control mitigations".into()),
    }
}

fn sample_summary() -> RiskSummary {
    RiskSummary {
        overall_risk_score: 0.62,
        overall_risk_level: RiskLevel::High,
        category_scores: BTreeMap::from([
            ("data-sensitivity".to_string(), 0.9),
            ("data-sharing".to_string(), 0.34),
        ]),
        high_risk_areas: vec!["data-sensitivity".into()],
        recommendations: vec!["Apply Article 9 safeguards".into()],
    }
}

roundtrip_and_validate!(question_roundtrip, Question, sample_question());

roundtrip_and_validate!(
    category_roundtrip,
    Category,
    Category {
        id: "data-sensitivity".into(),
        title: "Data Sensitivity".into(),
        description: "What kind of personal data is processed".into(),
        recommendation: None,
        questions: vec![sample_question()],
    }
);

roundtrip_and_validate!(response_roundtrip, Response, sample_response());

roundtrip_and_validate!(mitigation_roundtrip, Mitigation, sample_mitigation());

roundtrip_and_validate!(
    risk_review_roundtrip,
    RiskReview,
    RiskReview {
        assessment_id: "crm-migration".into(),
        likelihood: Some(4),
        impact: Some(5),
        risk_factors: vec!["sensitive-data".into(), "large-scale".into()],
        recorded_at: Utc::now(),
    }
);

roundtrip_and_validate!(assessment_roundtrip, Assessment, sample_assessment());

roundtrip_and_validate!(article_roundtrip, GdprArticle, sample_article());

roundtrip_and_validate!(summary_roundtrip, RiskSummary, sample_summary());

roundtrip_and_validate!(
    report_roundtrip,
    AssessmentReport,
    AssessmentReport {
        assessment_id: "crm-migration".into(),
        assessment: Some(sample_assessment()),
        generated_at: Utc::now(),
        summary: sample_summary(),
        diagnostics: SummaryDiagnostics {
            total_responses: 2,
            scored_responses: 1,
            excluded: vec![ExcludedResponse {
                response_id: "rsp-00c0ffee".into(),
                question_id: "q-retired".into(),
                reason: "question no longer in catalog".into(),
            }],
            warnings: vec![],
        },
        progress: AssessmentProgress {
            answered: 1,
            total_questions: 4,
            percent_complete: 25,
            missing_required: vec!["q-retention".into()],
        },
        risk_matrix: Some(MatrixScore {
            likelihood: 4,
            impact: 5,
            score: 20,
            level: RiskLevel::High,
        }),
        responses: vec![sample_response()],
        mitigations: vec![sample_mitigation()],
        mitigation_progress: MitigationProgress::tally(&[sample_mitigation()]),
        articles: vec![sample_article()],
        unresolved_articles: vec!["99".into()],
    }
);

#[test]
fn question_accepts_snake_case_aliases() {
    let question: Question = serde_json::from_value(json!({
        "id": "q-volume",
        "type": "number",
        "risk_weight": 0.4,
        "gdpr_articles": ["35"],
        "help_text": "Approximate number of data subjects",
        "min": 0,
        "max": 100000
    }))
    .unwrap();

    assert_eq!(question.question_type, QuestionType::Number);
    assert!((question.risk_weight - 0.4).abs() < f64::EPSILON);
    assert_eq!(question.gdpr_articles, vec!["35".to_string()]);
    assert!(question.required, "required defaults to true");
    assert_eq!(question.bounds(), Some((0.0, 100_000.0)));
}

#[test]
fn article_document_accepts_snake_case_full_text() {
    let document: ArticleDocument = serde_json::from_value(json!({
        "articles": [{
            "number": "35",
            "title": "Data protection impact assessment",
            "full_text": "Where a type of processing ..."
        }]
    }))
    .unwrap();
    let article = &document.articles[0];
    assert_eq!(article.full_text.as_deref(), Some("Where a type of processing ..."));
    assert!(article.summary.is_empty());
}

#[test]
fn assessment_status_defaults_to_draft() {
    let assessment: Assessment = serde_json::from_value(json!({
        "id": "a1",
        "title": "Payroll",
        "organization": "Acme",
        "createdAt": "2026-01-05T10:00:00Z",
        "updatedAt": "2026-01-05T10:00:00Z"
    }))
    .unwrap();
    assert_eq!(assessment.status, AssessmentStatus::Draft);
}

#[test]
fn question_without_weight_is_rejected() {
    let result: Result<Question, _> = serde_json::from_value(json!({
        "id": "q-purpose",
        "type": "text"
    }));
    assert!(result.is_err());
}

#[test]
fn summary_field_names_match_export_contract() {
    let value = serde_json::to_value(sample_summary()).unwrap();
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    for expected in [
        "overallRiskScore",
        "overallRiskLevel",
        "categoryScores",
        "highRiskAreas",
        "recommendations",
    ] {
        assert!(keys.contains(&expected), "missing key {expected}");
    }
}
