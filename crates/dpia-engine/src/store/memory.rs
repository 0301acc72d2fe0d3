//! In-memory stores backed by `dashmap`.
//!
//! Each assessment's records live under one map entry, so same-assessment
//! writes serialize on that entry's shard lock while different assessments
//! proceed in parallel. Reads clone under the lock and never observe a
//! half-written record.

use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dpia_core::entities::{Assessment, Mitigation, Response, RiskReview};
use dpia_core::ids::{PREFIX_RESPONSE, generate_id};

use super::{MitigationRepository, ResponseDraft, ResponseRepository, next_timestamp};
use crate::error::EngineError;

#[derive(Debug, Default)]
struct AssessmentRecords {
    header: Option<Assessment>,
    responses: HashMap<String, Response>,
    review: Option<RiskReview>,
}

/// Thread-safe in-memory [`ResponseRepository`].
#[derive(Debug, Default)]
pub struct MemoryResponseStore {
    assessments: DashMap<String, AssessmentRecords>,
    /// response id -> (assessment id, question id)
    by_id: DashMap<String, (String, String)>,
}

impl MemoryResponseStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored responses across all assessments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl ResponseRepository for MemoryResponseStore {
    fn upsert(&self, draft: ResponseDraft) -> Result<Response, EngineError> {
        let mut records = self.assessments.entry(draft.assessment_id.clone()).or_default();

        match records.responses.entry(draft.question_id.clone()) {
            MapEntry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                existing.category = draft.category;
                existing.answer = draft.answer;
                existing.risk_score = draft.risk_score;
                existing.notes = draft.notes;
                existing.updated_at = next_timestamp(existing.updated_at);
                Ok(existing.clone())
            }
            MapEntry::Vacant(slot) => {
                let id = generate_id(PREFIX_RESPONSE)?;
                if self.by_id.contains_key(&id) {
                    return Err(EngineError::Storage(format!("response id collision: {id}")));
                }
                let now = Utc::now();
                let response = Response {
                    id: id.clone(),
                    assessment_id: draft.assessment_id.clone(),
                    question_id: draft.question_id.clone(),
                    category: draft.category,
                    answer: draft.answer,
                    risk_score: draft.risk_score,
                    notes: draft.notes,
                    created_at: now,
                    updated_at: now,
                };
                self.by_id
                    .insert(id, (draft.assessment_id, draft.question_id));
                Ok(slot.insert(response).clone())
            }
        }
    }

    fn get(&self, assessment_id: &str, question_id: &str) -> Result<Option<Response>, EngineError> {
        Ok(self
            .assessments
            .get(assessment_id)
            .and_then(|records| records.responses.get(question_id).cloned()))
    }

    fn get_by_id(&self, response_id: &str) -> Result<Option<Response>, EngineError> {
        let key = self.by_id.get(response_id).map(|entry| entry.value().clone());
        match key {
            Some((assessment_id, question_id)) => self.get(&assessment_id, &question_id),
            None => Ok(None),
        }
    }

    fn list(&self, assessment_id: &str) -> Result<Vec<Response>, EngineError> {
        Ok(self
            .assessments
            .get(assessment_id)
            .map(|records| records.responses.values().cloned().collect())
            .unwrap_or_default())
    }

    fn save_review(&self, review: RiskReview) -> Result<(), EngineError> {
        let key = review.assessment_id.clone();
        self.assessments.entry(key).or_default().review = Some(review);
        Ok(())
    }

    fn review(&self, assessment_id: &str) -> Result<Option<RiskReview>, EngineError> {
        Ok(self
            .assessments
            .get(assessment_id)
            .and_then(|records| records.review.clone()))
    }

    fn insert_assessment(&self, assessment: Assessment) -> Result<bool, EngineError> {
        let mut records = self.assessments.entry(assessment.id.clone()).or_default();
        if records.header.is_some() {
            return Ok(false);
        }
        records.header = Some(assessment);
        Ok(true)
    }

    fn assessment(&self, assessment_id: &str) -> Result<Option<Assessment>, EngineError> {
        Ok(self
            .assessments
            .get(assessment_id)
            .and_then(|records| records.header.clone()))
    }

    fn modify_assessment(
        &self,
        assessment_id: &str,
        change: &mut dyn FnMut(&mut Assessment),
    ) -> Result<Option<Assessment>, EngineError> {
        Ok(self
            .assessments
            .get_mut(assessment_id)
            .and_then(|mut records| {
                records.header.as_mut().map(|header| {
                    change(header);
                    header.clone()
                })
            }))
    }
}

/// Thread-safe in-memory [`MitigationRepository`].
#[derive(Debug, Default)]
pub struct MemoryMitigationStore {
    mitigations: DashMap<String, Mitigation>,
    /// response id -> mitigation ids in creation order
    by_response: DashMap<String, Vec<String>>,
}

impl MemoryMitigationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MitigationRepository for MemoryMitigationStore {
    fn insert(&self, mitigation: Mitigation) -> Result<(), EngineError> {
        match self.mitigations.entry(mitigation.id.clone()) {
            Entry::Occupied(_) => Err(EngineError::Storage(format!(
                "mitigation id collision: {}",
                mitigation.id
            ))),
            Entry::Vacant(slot) => {
                self.by_response
                    .entry(mitigation.response_id.clone())
                    .or_default()
                    .push(mitigation.id.clone());
                slot.insert(mitigation);
                Ok(())
            }
        }
    }

    fn get(&self, mitigation_id: &str) -> Result<Option<Mitigation>, EngineError> {
        Ok(self
            .mitigations
            .get(mitigation_id)
            .map(|entry| entry.value().clone()))
    }

    fn modify(
        &self,
        mitigation_id: &str,
        change: &mut dyn FnMut(&mut Mitigation),
    ) -> Result<Option<Mitigation>, EngineError> {
        Ok(self.mitigations.get_mut(mitigation_id).map(|mut entry| {
            change(entry.value_mut());
            entry.value().clone()
        }))
    }

    fn list_for_response(&self, response_id: &str) -> Result<Vec<Mitigation>, EngineError> {
        let ids = self
            .by_response
            .get(response_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        Ok(ids
            .iter()
            .filter_map(|id| self.mitigations.get(id).map(|entry| entry.value().clone()))
            .collect())
    }
}
