//! Response store: validates, scores and persists answers.
//!
//! Owns the response lifecycle. The risk score is always recomputed from the
//! catalog at write time, callers cannot supply one.

use std::sync::Arc;

use chrono::Utc;
use dpia_core::entities::{AnswerSubmission, Response, RiskReview};
use serde_json::Value;

use crate::answers::validate_answer;
use crate::assessments::mark_started;
use crate::catalog::Catalog;
use crate::error::EngineError;
use crate::scorer::{check_rating, score_response};
use crate::store::{ResponseDraft, ResponseRepository};

#[derive(Clone)]
pub struct ResponseStore {
    catalog: Arc<Catalog>,
    repo: Arc<dyn ResponseRepository>,
}

impl ResponseStore {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, repo: Arc<dyn ResponseRepository>) -> Self {
        Self { catalog, repo }
    }

    /// Validate, score and store an answer, overwriting any earlier answer
    /// to the same question in the same assessment.
    ///
    /// Blank notes are stored as `None`. A registered `draft` assessment
    /// header moves to `in_progress`.
    ///
    /// # Errors
    ///
    /// - `EngineError::InvalidAnswer` if the question is not in the catalog.
    /// - `EngineError::AnswerTypeMismatch` if the answer does not fit the question.
    /// - Storage errors from the repository.
    pub fn upsert_response(
        &self,
        assessment_id: &str,
        question_id: &str,
        answer: Value,
        notes: Option<String>,
    ) -> Result<Response, EngineError> {
        let question =
            self.catalog
                .get_question(question_id)
                .ok_or_else(|| EngineError::InvalidAnswer {
                    question_id: question_id.to_string(),
                })?;
        validate_answer(question, &answer)?;
        let risk_score = score_response(question, &answer);

        let response = self.repo.upsert(ResponseDraft {
            assessment_id: assessment_id.to_string(),
            question_id: question_id.to_string(),
            category: question.category.clone(),
            answer,
            risk_score,
            notes: notes.filter(|n| !n.trim().is_empty()),
        })?;
        mark_started(self.repo.as_ref(), assessment_id)?;

        tracing::debug!(
            assessment = assessment_id,
            question = question_id,
            response = %response.id,
            risk_score,
            "response stored"
        );
        Ok(response)
    }

    /// Store an answer submission. A `category` on the submission that
    /// disagrees with the catalog is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`Self::upsert_response`].
    pub fn submit(
        &self,
        assessment_id: &str,
        submission: AnswerSubmission,
    ) -> Result<Response, EngineError> {
        if let (Some(claimed), Some(question)) = (
            submission.category.as_deref(),
            self.catalog.get_question(&submission.question_id),
        ) && claimed != question.category
        {
            tracing::debug!(
                question = %submission.question_id,
                claimed,
                actual = %question.category,
                "submitted category ignored"
            );
        }
        self.upsert_response(
            assessment_id,
            &submission.question_id,
            submission.answer,
            submission.notes,
        )
    }

    /// All responses of an assessment in catalog order. Responses to
    /// questions no longer in the catalog sort last, by question id.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repository.
    pub fn list_responses(&self, assessment_id: &str) -> Result<Vec<Response>, EngineError> {
        let mut responses = self.repo.list(assessment_id)?;
        responses.sort_by(|a, b| {
            let pa = self.catalog.question_position(&a.question_id);
            let pb = self.catalog.question_position(&b.question_id);
            match (pa, pb) {
                (Some(pa), Some(pb)) => pa.cmp(&pb),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.question_id.cmp(&b.question_id),
            }
        });
        Ok(responses)
    }

    /// # Errors
    ///
    /// Returns `EngineError::ResponseNotFound` if nothing is stored for the pair.
    pub fn get_response(
        &self,
        assessment_id: &str,
        question_id: &str,
    ) -> Result<Response, EngineError> {
        self.repo
            .get(assessment_id, question_id)?
            .ok_or_else(|| EngineError::ResponseNotFound {
                assessment_id: assessment_id.to_string(),
                question_id: question_id.to_string(),
            })
    }

    /// # Errors
    ///
    /// Returns `EngineError::UnknownResponse` if the id does not exist.
    pub fn get_response_by_id(&self, response_id: &str) -> Result<Response, EngineError> {
        self.repo
            .get_by_id(response_id)?
            .ok_or_else(|| EngineError::UnknownResponse(response_id.to_string()))
    }

    /// # Errors
    ///
    /// Returns storage errors from the repository.
    pub fn response_exists(&self, response_id: &str) -> Result<bool, EngineError> {
        Ok(self.repo.get_by_id(response_id)?.is_some())
    }

    /// Record the likelihood, impact and risk factors chosen in the risk
    /// review step, replacing any earlier review of the assessment.
    ///
    /// Factor ids are trimmed and de-duplicated; unrecognized ids are kept
    /// so they round-trip, and are ignored when recommendations are built.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidRating` for ratings outside `1..=5`.
    pub fn record_risk_review(
        &self,
        assessment_id: &str,
        likelihood: Option<u8>,
        impact: Option<u8>,
        risk_factors: Vec<String>,
    ) -> Result<RiskReview, EngineError> {
        if let Some(value) = likelihood {
            check_rating("likelihood", value)?;
        }
        if let Some(value) = impact {
            check_rating("impact", value)?;
        }

        let mut factors: Vec<String> = Vec::with_capacity(risk_factors.len());
        for factor in risk_factors {
            let factor = factor.trim();
            if !factor.is_empty() && !factors.iter().any(|f| f == factor) {
                factors.push(factor.to_string());
            }
        }

        let review = RiskReview {
            assessment_id: assessment_id.to_string(),
            likelihood,
            impact,
            risk_factors: factors,
            recorded_at: Utc::now(),
        };
        self.repo.save_review(review.clone())?;
        tracing::debug!(assessment = assessment_id, ?likelihood, ?impact, "risk review recorded");
        Ok(review)
    }

    /// # Errors
    ///
    /// Returns storage errors from the repository.
    pub fn risk_review(&self, assessment_id: &str) -> Result<Option<RiskReview>, EngineError> {
        self.repo.review(assessment_id)
    }
}
