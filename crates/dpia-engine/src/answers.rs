//! Answer validation against a question's declared type.
//!
//! Answers are opaque JSON values. Validation only checks shape and option
//! membership; scoring is done separately by [`crate::scorer`].

use dpia_core::entities::Question;
use dpia_core::enums::QuestionType;
use serde_json::Value;

use crate::error::EngineError;

/// Whether an answer counts as "not answered": `null`, a blank string, or an
/// empty array.
#[must_use]
pub fn is_empty_answer(answer: &Value) -> bool {
    match answer {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Numeric value of a `number` answer. Accepts JSON numbers and numeric
/// strings; rejects non-finite values.
#[must_use]
pub fn numeric_value(answer: &Value) -> Option<f64> {
    let value = match answer {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Check that `answer` fits the question.
///
/// # Errors
///
/// Returns `EngineError::AnswerTypeMismatch` describing the expected shape.
pub fn validate_answer(question: &Question, answer: &Value) -> Result<(), EngineError> {
    if is_empty_answer(answer) {
        if question.required {
            return Err(mismatch(question, "a non-empty answer", "question is required"));
        }
        return Ok(());
    }

    match question.question_type {
        QuestionType::Text | QuestionType::Textarea => {
            if !answer.is_string() {
                return Err(mismatch(question, "a string", describe(answer)));
            }
        }
        QuestionType::Select | QuestionType::Radio => {
            let Some(value) = answer.as_str() else {
                return Err(mismatch(question, "one option value", describe(answer)));
            };
            if question.option(value).is_none() {
                return Err(mismatch(
                    question,
                    "one option value",
                    format!("'{value}' is not an option"),
                ));
            }
        }
        QuestionType::MultiSelect => {
            let Some(items) = answer.as_array() else {
                return Err(mismatch(question, "a list of option values", describe(answer)));
            };
            let mut seen: Vec<&str> = Vec::with_capacity(items.len());
            for item in items {
                let Some(value) = item.as_str() else {
                    return Err(mismatch(
                        question,
                        "a list of option values",
                        format!("list contains {}", describe(item)),
                    ));
                };
                if question.option(value).is_none() {
                    return Err(mismatch(
                        question,
                        "a list of option values",
                        format!("'{value}' is not an option"),
                    ));
                }
                if seen.contains(&value) {
                    return Err(mismatch(
                        question,
                        "a list of option values",
                        format!("'{value}' selected twice"),
                    ));
                }
                seen.push(value);
            }
        }
        QuestionType::Number => {
            if numeric_value(answer).is_none() {
                return Err(mismatch(question, "a finite number", describe(answer)));
            }
        }
    }
    Ok(())
}

fn mismatch(question: &Question, expected: &str, reason: impl Into<String>) -> EngineError {
    EngineError::AnswerTypeMismatch {
        question_id: question.id.clone(),
        expected: expected.to_string(),
        reason: reason.into(),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string \"{s}\""),
        Value::Array(_) => "a list".into(),
        Value::Object(_) => "an object".into(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_support::sample_catalog;

    fn check(question_id: &str, answer: &Value) -> Result<(), EngineError> {
        let catalog = sample_catalog();
        validate_answer(catalog.get_question(question_id).unwrap(), answer)
    }

    #[rstest]
    #[case::null(json!(null), true)]
    #[case::blank(json!("  "), true)]
    #[case::empty_list(json!([]), true)]
    #[case::zero(json!(0), false)]
    #[case::text(json!("x"), false)]
    #[case::false_bool(json!(false), false)]
    fn empty_answers(#[case] answer: Value, #[case] empty: bool) {
        assert_eq!(is_empty_answer(&answer), empty);
    }

    #[rstest]
    #[case::int(json!(7), Some(7.0))]
    #[case::float(json!(2.5), Some(2.5))]
    #[case::string(json!(" 42 "), Some(42.0))]
    #[case::word(json!("lots"), None)]
    #[case::inf_string(json!("inf"), None)]
    #[case::list(json!([1]), None)]
    fn numeric_values(#[case] answer: Value, #[case] expected: Option<f64>) {
        assert_eq!(numeric_value(&answer), expected);
    }

    #[rstest]
    #[case::radio_option("sec-encryption", json!("no"))]
    #[case::select_option("sec-storage", json!("cloud-eu"))]
    #[case::multi("share-recipients", json!(["processors", "international"]))]
    #[case::number("subj-volume", json!(12000))]
    #[case::numeric_string("subj-volume", json!("12000"))]
    #[case::text("subj-notes", json!("Staff only"))]
    #[case::optional_empty("share-purpose", json!(""))]
    #[case::optional_null("sec-breaches", json!(null))]
    fn accepts(#[case] question_id: &str, #[case] answer: Value) {
        check(question_id, &answer).unwrap();
    }

    #[rstest]
    #[case::radio_unknown_option("sec-encryption", json!("maybe"))]
    #[case::radio_not_string("sec-encryption", json!(1))]
    #[case::multi_not_list("share-recipients", json!("processors"))]
    #[case::multi_unknown("share-recipients", json!(["aliens"]))]
    #[case::multi_duplicate("share-recipients", json!(["processors", "processors"]))]
    #[case::multi_non_string("share-recipients", json!([3]))]
    #[case::number_word("subj-volume", json!("lots"))]
    #[case::text_number("subj-notes", json!(5))]
    #[case::required_empty("subj-volume", json!(null))]
    #[case::required_blank("sec-encryption", json!(" "))]
    fn rejects(#[case] question_id: &str, #[case] answer: Value) {
        let err = check(question_id, &answer).unwrap_err();
        assert_eq!(err.question_id(), Some(question_id));
        assert!(matches!(err, EngineError::AnswerTypeMismatch { .. }));
    }
}
