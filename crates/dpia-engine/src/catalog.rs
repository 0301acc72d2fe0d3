//! Immutable question catalog.
//!
//! Loaded once at startup, validated, then shared read-only (`Arc<Catalog>`)
//! by every engine component. Category and question order from the document
//! is preserved and drives the order of listings and recommendations.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use dpia_core::entities::{CatalogDocument, Category, Question};
use dpia_core::enums::QuestionType;
use tracing::info;

use crate::error::CatalogError;

/// Validated, indexed question catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    /// question id -> (category index, question index)
    index: HashMap<String, (usize, usize)>,
}

impl Catalog {
    /// Validate a parsed document and build the question index.
    ///
    /// Each question's `category` is set to its enclosing category id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` naming the first offending location.
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let mut categories = document.categories;
        let mut index = HashMap::new();
        let mut category_ids = HashMap::new();

        for (ci, category) in categories.iter_mut().enumerate() {
            let at = format!("categories[{ci}]");
            if category.id.trim().is_empty() {
                return Err(CatalogError::invalid(at, "category id must not be blank"));
            }
            if category_ids.insert(category.id.clone(), ci).is_some() {
                return Err(CatalogError::invalid(
                    at,
                    format!("duplicate category id '{}'", category.id),
                ));
            }

            for (qi, question) in category.questions.iter_mut().enumerate() {
                let at = format!("{at}.questions[{qi}]");
                validate_question(question, &at)?;
                if !question.category.is_empty() && question.category != category.id {
                    return Err(CatalogError::invalid(
                        format!("{at}.category"),
                        format!(
                            "question declares category '{}' inside '{}'",
                            question.category, category.id
                        ),
                    ));
                }
                match index.entry(question.id.clone()) {
                    Entry::Occupied(_) => {
                        return Err(CatalogError::invalid(
                            at,
                            format!("duplicate question id '{}'", question.id),
                        ));
                    }
                    Entry::Vacant(slot) => {
                        slot.insert((ci, qi));
                    }
                }
                question.category.clone_from(&category.id);
            }
        }

        let catalog = Self { categories, index };
        info!(
            categories = catalog.categories.len(),
            questions = catalog.question_count(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog JSON document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON and
    /// `CatalogError::Invalid` for constraint violations.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Read, parse, and validate a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise the
    /// same errors as [`Self::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    #[must_use]
    pub fn get_question(&self, id: &str) -> Option<&Question> {
        self.index
            .get(id)
            .map(|&(ci, qi)| &self.categories[ci].questions[qi])
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Category ids in document order.
    pub fn category_ids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.id.as_str())
    }

    /// All questions in document order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.categories.iter().flat_map(|c| c.questions.iter())
    }

    /// Document position of a category, used for ordering.
    #[must_use]
    pub fn category_position(&self, id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    /// `(category index, question index)` of a question, used for ordering.
    #[must_use]
    pub fn question_position(&self, id: &str) -> Option<(usize, usize)> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.index.len()
    }
}

fn validate_question(question: &Question, at: &str) -> Result<(), CatalogError> {
    if question.id.trim().is_empty() {
        return Err(CatalogError::invalid(at, "question id must not be blank"));
    }
    if !in_unit_range(question.risk_weight) {
        return Err(CatalogError::invalid(
            format!("{at}.riskWeight"),
            format!("must be within [0, 1], got {}", question.risk_weight),
        ));
    }

    if question.question_type.is_choice() && question.options().is_empty() {
        return Err(CatalogError::invalid(
            format!("{at}.options"),
            format!(
                "{} question must declare at least one option",
                question.question_type
            ),
        ));
    }

    let mut seen = Vec::with_capacity(question.options().len());
    for (oi, option) in question.options().iter().enumerate() {
        if seen.contains(&option.value.as_str()) {
            return Err(CatalogError::invalid(
                format!("{at}.options[{oi}]"),
                format!("duplicate option value '{}'", option.value),
            ));
        }
        seen.push(option.value.as_str());
        if let Some(weight) = option.risk_weight
            && !in_unit_range(weight)
        {
            return Err(CatalogError::invalid(
                format!("{at}.options[{oi}].riskWeight"),
                format!("must be within [0, 1], got {weight}"),
            ));
        }
    }

    if question.question_type == QuestionType::Number {
        match (question.min, question.max) {
            (Some(min), Some(max)) if !(min.is_finite() && max.is_finite() && min < max) => {
                return Err(CatalogError::invalid(
                    format!("{at}.min"),
                    format!("min must be less than max, got {min}..{max}"),
                ));
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(CatalogError::invalid(
                    at,
                    "number question must declare both min and max or neither",
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

fn in_unit_range(weight: f64) -> bool {
    (0.0..=1.0).contains(&weight)
}
