//! Pure risk computation.
//!
//! Per-response scores are derived from the catalog question and the raw
//! answer. Categories average their responses; the overall score averages
//! the non-empty categories (mean of means). All results lie in `[0, 1]`.

use std::collections::BTreeMap;

use dpia_core::entities::{MatrixScore, Question, Response};
use dpia_core::enums::QuestionType;
use serde_json::Value;

use crate::answers::{is_empty_answer, numeric_value};
use crate::classifier::classify_matrix;
use crate::error::EngineError;

/// Contribution of one answer to its category.
///
/// Choice questions take the selected option's weight (worst case for
/// multi-select), falling back to the question weight for options without
/// one. Bounded number questions scale the weight linearly between `min`
/// and `max`.
#[must_use]
pub fn score_response(question: &Question, answer: &Value) -> f64 {
    if is_empty_answer(answer) {
        return 0.0;
    }

    let score = match question.question_type {
        QuestionType::Text | QuestionType::Textarea => question.risk_weight,
        QuestionType::Select | QuestionType::Radio => answer
            .as_str()
            .and_then(|value| question.option(value))
            .and_then(|option| option.risk_weight)
            .unwrap_or(question.risk_weight),
        QuestionType::MultiSelect => answer
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .filter_map(|value| question.option(value))
            .map(|option| option.risk_weight.unwrap_or(question.risk_weight))
            .reduce(f64::max)
            .unwrap_or(question.risk_weight),
        QuestionType::Number => match (numeric_value(answer), question.bounds()) {
            (Some(value), Some((min, max))) => {
                question.risk_weight * ((value - min) / (max - min)).clamp(0.0, 1.0)
            }
            (Some(_), None) => question.risk_weight,
            (None, _) => 0.0,
        },
    };

    clamp_unit(score)
}

/// Mean risk score of one category's responses; `0` when empty.
pub fn score_category<'a>(responses: impl IntoIterator<Item = &'a Response>) -> f64 {
    mean(responses.into_iter().map(|r| r.risk_score))
}

/// Mean of the category scores; `0` when no category has responses.
#[must_use]
pub fn score_overall(category_scores: &BTreeMap<String, f64>) -> f64 {
    mean(category_scores.values().copied())
}

/// Likelihood × impact score on the 1..=5 scales.
///
/// # Errors
///
/// Returns `EngineError::InvalidRating` if either rating is outside `1..=5`.
pub fn score_matrix(likelihood: u8, impact: u8) -> Result<MatrixScore, EngineError> {
    check_rating("likelihood", likelihood)?;
    check_rating("impact", impact)?;
    let score = likelihood * impact;
    Ok(MatrixScore {
        likelihood,
        impact,
        score,
        level: classify_matrix(score),
    })
}

/// Reject ratings outside `1..=5`.
///
/// # Errors
///
/// Returns `EngineError::InvalidRating` naming `field`.
pub fn check_rating(field: &'static str, value: u8) -> Result<(), EngineError> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidRating { field, value })
    }
}

/// Whether a stored score can be aggregated.
#[must_use]
pub fn is_valid_score(score: f64) -> bool {
    score.is_finite() && (0.0..=1.0).contains(&score)
}

fn clamp_unit(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
