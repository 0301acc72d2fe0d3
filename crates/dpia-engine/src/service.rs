//! Assessment aggregation.
//!
//! `AssessmentService` ties the catalog, assessment headers, response store
//! and mitigation tracker together and derives summaries, progress and
//! report bundles. An optional article catalog resolves cited GDPR articles
//! in reports.
//! Everything it returns is recomputed on demand from stored records; with
//! no intervening writes, repeated calls yield identical output.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use dpia_core::entities::{GdprArticle, MatrixScore, Mitigation, Response, RiskReview};
use dpia_core::enums::{Priority, RiskLevel};
use dpia_core::report::{
    AssessmentProgress, AssessmentReport, ExcludedResponse, MitigationProgress, RiskSummary,
    SummaryDiagnostics,
};

use crate::answers::is_empty_answer;
use crate::articles::ArticleCatalog;
use crate::assessments::AssessmentRegistry;
use crate::catalog::Catalog;
use crate::classifier::{classify, high_risk_areas};
use crate::error::EngineError;
use crate::mitigation::MitigationTracker;
use crate::recommendations::{category_recommendation, generate};
use crate::responses::ResponseStore;
use crate::scorer::{is_valid_score, score_category, score_matrix, score_overall};
use crate::store::{
    MemoryMitigationStore, MemoryResponseStore, MitigationRepository, ResponseRepository,
};

/// Orchestrates scoring, classification, recommendations and mitigations
/// for assessments sharing one catalog.
#[derive(Clone)]
pub struct AssessmentService {
    catalog: Arc<Catalog>,
    articles: Option<Arc<ArticleCatalog>>,
    assessments: AssessmentRegistry,
    responses: ResponseStore,
    mitigations: MitigationTracker,
}

impl AssessmentService {
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        responses: Arc<dyn ResponseRepository>,
        mitigations: Arc<dyn MitigationRepository>,
    ) -> Self {
        Self {
            assessments: AssessmentRegistry::new(Arc::clone(&responses)),
            responses: ResponseStore::new(Arc::clone(&catalog), Arc::clone(&responses)),
            mitigations: MitigationTracker::new(responses, mitigations),
            articles: None,
            catalog,
        }
    }

    /// Resolve cited GDPR articles against `articles` in reports.
    #[must_use]
    pub fn with_articles(mut self, articles: Arc<ArticleCatalog>) -> Self {
        self.articles = Some(articles);
        self
    }

    /// Service backed by the bundled in-memory stores.
    #[must_use]
    pub fn in_memory(catalog: Arc<Catalog>) -> Self {
        Self::new(
            catalog,
            Arc::new(MemoryResponseStore::new()),
            Arc::new(MemoryMitigationStore::new()),
        )
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn articles(&self) -> Option<&ArticleCatalog> {
        self.articles.as_deref()
    }

    /// Reference entry for a cited article, if an article catalog is loaded
    /// and knows it.
    #[must_use]
    pub fn article(&self, reference: &str) -> Option<&GdprArticle> {
        self.articles.as_deref().and_then(|articles| articles.get(reference))
    }

    #[must_use]
    pub const fn assessments(&self) -> &AssessmentRegistry {
        &self.assessments
    }

    #[must_use]
    pub const fn responses(&self) -> &ResponseStore {
        &self.responses
    }

    #[must_use]
    pub const fn mitigations(&self) -> &MitigationTracker {
        &self.mitigations
    }

    /// Aggregate an assessment's responses into a [`RiskSummary`].
    ///
    /// # Errors
    ///
    /// Returns storage errors only; malformed records are excluded, see
    /// [`Self::summarize_with_diagnostics`].
    pub fn summarize(&self, assessment_id: &str) -> Result<RiskSummary, EngineError> {
        self.summarize_with_diagnostics(assessment_id)
            .map(|(summary, _)| summary)
    }

    /// Like [`Self::summarize`], also reporting responses left out of the
    /// aggregation (question no longer in the catalog, or a stored score
    /// that is non-finite or outside `[0, 1]`).
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repositories.
    pub fn summarize_with_diagnostics(
        &self,
        assessment_id: &str,
    ) -> Result<(RiskSummary, SummaryDiagnostics), EngineError> {
        let responses = self.responses.list_responses(assessment_id)?;
        let review = self.responses.risk_review(assessment_id)?;
        Ok(self.aggregate(assessment_id, &responses, review.as_ref()))
    }

    /// Likelihood × impact score from the recorded risk review, if both
    /// ratings were given. Reported beside the summary, never merged into it.
    ///
    /// # Errors
    ///
    /// Returns storage errors, or `EngineError::InvalidRating` if the stored
    /// review holds an out-of-range rating.
    pub fn risk_matrix(&self, assessment_id: &str) -> Result<Option<MatrixScore>, EngineError> {
        let review = self.responses.risk_review(assessment_id)?;
        matrix_of(review.as_ref())
    }

    /// Questionnaire completion.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repository.
    pub fn progress(&self, assessment_id: &str) -> Result<AssessmentProgress, EngineError> {
        let responses = self.responses.list_responses(assessment_id)?;
        Ok(self.progress_of(&responses))
    }

    /// All mitigations of an assessment, grouped by response in catalog order.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repositories.
    pub fn mitigations_for_assessment(
        &self,
        assessment_id: &str,
    ) -> Result<Vec<Mitigation>, EngineError> {
        let responses = self.responses.list_responses(assessment_id)?;
        self.mitigations_of(&responses)
    }

    /// Attach each high-risk category's recommendation to the category's
    /// highest-scoring response.
    ///
    /// Priority is `high` for critical categories and `medium` otherwise;
    /// the GDPR article is the question's first listed article. A response
    /// already carrying a mitigation with the same description is skipped,
    /// so repeated calls create nothing new.
    ///
    /// # Errors
    ///
    /// Returns storage or id-generation errors.
    pub fn propose_mitigations(&self, assessment_id: &str) -> Result<Vec<Mitigation>, EngineError> {
        let responses = self.responses.list_responses(assessment_id)?;
        let review = self.responses.risk_review(assessment_id)?;
        let (summary, _) = self.aggregate(assessment_id, &responses, review.as_ref());

        let mut created = Vec::new();
        for area in &summary.high_risk_areas {
            let Some(category) = self.catalog.category(area) else {
                continue;
            };
            let Some((response, question_articles)) = self.worst_response(&responses, area) else {
                continue;
            };

            let description = category_recommendation(category);
            let existing = self.mitigations.list_for_response(&response.id)?;
            if existing.iter().any(|m| m.description == description) {
                continue;
            }

            let priority = match summary.category_scores.get(area).copied().map(classify) {
                Some(RiskLevel::Critical) => Priority::High,
                _ => Priority::Medium,
            };
            created.push(self.mitigations.create(
                &response.id,
                &description,
                question_articles.first().cloned(),
                Some(priority),
            )?);
        }

        tracing::info!(
            assessment = assessment_id,
            proposed = created.len(),
            "mitigations proposed"
        );
        Ok(created)
    }

    /// Everything an export collaborator needs for one assessment.
    ///
    /// A stored risk review with an out-of-range rating does not fail the
    /// report: `risk_matrix` is left out and the problem is listed in
    /// `diagnostics.warnings`.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repositories.
    pub fn report(&self, assessment_id: &str) -> Result<AssessmentReport, EngineError> {
        let assessment = self.assessments.find(assessment_id)?;
        let responses = self.responses.list_responses(assessment_id)?;
        let review = self.responses.risk_review(assessment_id)?;
        let (summary, mut diagnostics) = self.aggregate(assessment_id, &responses, review.as_ref());
        let mitigations = self.mitigations_of(&responses)?;

        let risk_matrix = match matrix_of(review.as_ref()) {
            Ok(matrix) => matrix,
            Err(error) => {
                tracing::warn!(
                    assessment = assessment_id,
                    %error,
                    "risk matrix left out of report"
                );
                diagnostics.warnings.push(format!("risk matrix omitted: {error}"));
                None
            }
        };
        let (articles, unresolved_articles) = self.cited_articles(&responses, &mitigations);

        Ok(AssessmentReport {
            assessment_id: assessment_id.to_string(),
            assessment,
            generated_at: Utc::now(),
            summary,
            diagnostics,
            progress: self.progress_of(&responses),
            risk_matrix,
            mitigation_progress: MitigationProgress::tally(&mitigations),
            responses,
            mitigations,
            articles,
            unresolved_articles,
        })
    }

    fn aggregate(
        &self,
        assessment_id: &str,
        responses: &[Response],
        review: Option<&RiskReview>,
    ) -> (RiskSummary, SummaryDiagnostics) {
        let mut diagnostics = SummaryDiagnostics {
            total_responses: responses.len(),
            ..SummaryDiagnostics::default()
        };
        let mut by_category: BTreeMap<&str, Vec<&Response>> = BTreeMap::new();

        for response in responses {
            let reason = match self.catalog.get_question(&response.question_id) {
                None => Some("question no longer in catalog"),
                Some(_) if !is_valid_score(response.risk_score) => {
                    Some("stored risk score is not within [0, 1]")
                }
                Some(question) => {
                    by_category
                        .entry(question.category.as_str())
                        .or_default()
                        .push(response);
                    None
                }
            };
            if let Some(reason) = reason {
                tracing::warn!(
                    assessment = assessment_id,
                    response = %response.id,
                    question = %response.question_id,
                    reason,
                    "response excluded from summary"
                );
                diagnostics.excluded.push(ExcludedResponse {
                    response_id: response.id.clone(),
                    question_id: response.question_id.clone(),
                    reason: reason.to_string(),
                });
            }
        }
        diagnostics.scored_responses = diagnostics.total_responses - diagnostics.excluded.len();

        let category_scores: BTreeMap<String, f64> = by_category
            .into_iter()
            .map(|(category, members)| (category.to_string(), score_category(members)))
            .collect();
        let overall_risk_score = score_overall(&category_scores);
        let high_risk_areas = high_risk_areas(self.catalog.category_ids(), &category_scores);
        let risk_factors = review.map(|r| r.risk_factors.as_slice()).unwrap_or_default();
        let recommendations = generate(
            &self.catalog,
            &category_scores,
            &high_risk_areas,
            risk_factors,
        );

        let summary = RiskSummary {
            overall_risk_score,
            overall_risk_level: classify(overall_risk_score),
            category_scores,
            high_risk_areas,
            recommendations,
        };
        (summary, diagnostics)
    }

    /// Highest-scoring response in `category`, first in catalog order on
    /// ties, with its question's GDPR articles.
    fn worst_response<'a>(
        &'a self,
        responses: &'a [Response],
        category: &str,
    ) -> Option<(&'a Response, &'a [String])> {
        responses
            .iter()
            .filter(|r| is_valid_score(r.risk_score))
            .filter_map(|r| {
                self.catalog
                    .get_question(&r.question_id)
                    .filter(|q| q.category == category)
                    .map(|q| (r, q.gdpr_articles.as_slice()))
            })
            .fold(None, |best, candidate| match best {
                Some((current, _)) if candidate.0.risk_score <= current.risk_score => best,
                _ => Some(candidate),
            })
    }

    fn progress_of(&self, responses: &[Response]) -> AssessmentProgress {
        let answered_ids: Vec<&str> = responses
            .iter()
            .filter(|r| !is_empty_answer(&r.answer))
            .filter(|r| self.catalog.get_question(&r.question_id).is_some())
            .map(|r| r.question_id.as_str())
            .collect();
        let total_questions = self.catalog.question_count();
        let answered = answered_ids.len();
        let missing_required = self
            .catalog
            .questions()
            .filter(|q| q.required && !answered_ids.contains(&q.id.as_str()))
            .map(|q| q.id.clone())
            .collect();

        AssessmentProgress {
            answered,
            total_questions,
            percent_complete: percent(answered, total_questions),
            missing_required,
        }
    }

    /// Articles cited by answered questions (catalog order) and then by
    /// mitigations, resolved against the article catalog.
    fn cited_articles(
        &self,
        responses: &[Response],
        mitigations: &[Mitigation],
    ) -> (Vec<GdprArticle>, Vec<String>) {
        let Some(articles) = self.articles.as_deref() else {
            return (Vec::new(), Vec::new());
        };
        let from_questions = responses
            .iter()
            .filter(|r| !is_empty_answer(&r.answer))
            .filter_map(|r| self.catalog.get_question(&r.question_id))
            .flat_map(|q| q.gdpr_articles.iter().map(String::as_str));
        let from_mitigations = mitigations
            .iter()
            .filter_map(|m| m.gdpr_article.as_deref());

        let (found, unresolved) = articles.resolve(from_questions.chain(from_mitigations));
        if !unresolved.is_empty() {
            tracing::debug!(?unresolved, "cited articles missing from article catalog");
        }
        (found, unresolved)
    }

    fn mitigations_of(&self, responses: &[Response]) -> Result<Vec<Mitigation>, EngineError> {
        let mut all = Vec::new();
        for response in responses {
            all.extend(self.mitigations.list_for_response(&response.id)?);
        }
        Ok(all)
    }
}

fn matrix_of(review: Option<&RiskReview>) -> Result<Option<MatrixScore>, EngineError> {
    match review {
        Some(RiskReview {
            likelihood: Some(likelihood),
            impact: Some(impact),
            ..
        }) => score_matrix(*likelihood, *impact).map(Some),
        _ => Ok(None),
    }
}

/// `part / whole` as a whole percentage, rounded half up.
fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    u8::try_from((part * 100 + whole / 2) / whole).unwrap_or(100)
}
