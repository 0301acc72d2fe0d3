use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use dpia_config::DpiaConfig;
use dpia_core::entities::AnswerSubmission;
use dpia_core::enums::{AssessmentStatus, MitigationStatus, Priority};
use dpia_core::report::AssessmentReport;
use dpia_engine::{ArticleCatalog, AssessmentService, Catalog};
use serde::Deserialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SummarizeArgs;
use crate::output::output;

fn default_assessment_id() -> String {
    "assessment".to_string()
}

/// A recorded questionnaire session replayed by `dpia summarize`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerFile {
    #[serde(default = "default_assessment_id")]
    pub assessment_id: String,
    #[serde(default)]
    pub assessment: Option<HeaderInput>,
    #[serde(default)]
    pub answers: Vec<AnswerSubmission>,
    #[serde(default)]
    pub risk_review: Option<ReviewInput>,
    #[serde(default)]
    pub mitigations: Vec<MitigationInput>,
}

/// Assessment header registered before the answers are replayed.
///
/// `status`, when given, is applied after the replay and overrides the
/// automatic `draft` to `in_progress` move.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderInput {
    pub title: String,
    pub organization: String,
    pub description: Option<String>,
    pub status: Option<AssessmentStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub likelihood: Option<u8>,
    pub impact: Option<u8>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
}

/// A manually entered mitigation, attached to the response of `question_id`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MitigationInput {
    pub question_id: String,
    pub description: String,
    pub gdpr_article: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<MitigationStatus>,
}

/// Handle `dpia summarize`.
pub fn handle(args: &SummarizeArgs, config: &DpiaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog_path = args.catalog.clone().unwrap_or_else(|| config.catalog.path_buf());
    let articles_path = args
        .articles
        .clone()
        .or_else(|| config.catalog.articles_path_buf());
    let propose = args.propose || config.general.auto_propose_mitigations;
    let report = build_report(
        &catalog_path,
        articles_path.as_deref(),
        &args.answers,
        config,
        propose,
    )?;

    if args.summary_only {
        return output(&report.summary, flags.format, config.export.pretty);
    }
    output(&report, flags.format, config.export.pretty)
}

/// Replay an answer file against a catalog and build the report.
///
/// When the file records no risk factors, `general.default_risk_factors`
/// is used. With `export.include_records = false` the response and
/// mitigation lists are left empty. Cited articles are resolved only when
/// `articles_path` is given.
pub fn build_report(
    catalog_path: &Path,
    articles_path: Option<&Path>,
    answers_path: &Path,
    config: &DpiaConfig,
    propose: bool,
) -> anyhow::Result<AssessmentReport> {
    let catalog = Catalog::from_path(catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;
    let file = read_answer_file(answers_path)?;
    let mut service = AssessmentService::in_memory(Arc::new(catalog));
    if let Some(path) = articles_path {
        let articles = ArticleCatalog::from_path(path)
            .with_context(|| format!("failed to load articles {}", path.display()))?;
        service = service.with_articles(Arc::new(articles));
    }
    let assessment_id = file.assessment_id.as_str();

    let final_status = match file.assessment {
        Some(header) => {
            service
                .assessments()
                .create(
                    assessment_id,
                    &header.title,
                    &header.organization,
                    header.description,
                )
                .context("assessment header rejected")?;
            header.status
        }
        None => None,
    };

    for (index, submission) in file.answers.into_iter().enumerate() {
        let question_id = submission.question_id.clone();
        service
            .responses()
            .submit(assessment_id, submission)
            .with_context(|| format!("answer #{index} ({question_id}) rejected"))?;
    }

    let review = file.risk_review.unwrap_or_default();
    let factors = if review.risk_factors.is_empty() {
        config.general.default_risk_factors.clone()
    } else {
        review.risk_factors
    };
    if review.likelihood.is_some() || review.impact.is_some() || !factors.is_empty() {
        service
            .responses()
            .record_risk_review(assessment_id, review.likelihood, review.impact, factors)
            .context("risk review rejected")?;
    }

    for input in file.mitigations {
        let response = service
            .responses()
            .get_response(assessment_id, &input.question_id)
            .with_context(|| format!("mitigation for unanswered question {}", input.question_id))?;
        let created = service.mitigations().create(
            &response.id,
            &input.description,
            input.gdpr_article,
            input.priority,
        )?;
        if let Some(status) = input.status {
            service.mitigations().set_status(&created.id, status)?;
        }
    }

    if propose {
        service.propose_mitigations(assessment_id)?;
    }
    if let Some(status) = final_status {
        service.assessments().set_status(assessment_id, status)?;
    }

    let mut report = service.report(assessment_id)?;
    if !config.export.include_records {
        report.responses.clear();
        report.mitigations.clear();
    }
    Ok(report)
}

fn read_answer_file(path: &Path) -> anyhow::Result<AnswerFile> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("malformed answer file {}", path.display()))
}
