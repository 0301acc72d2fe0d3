//! GDPR article reference catalog.
//!
//! Optional companion to the question catalog. When loaded, it resolves the
//! article numbers cited by questions and mitigations into their titles and
//! summaries for reports. Citations are matched leniently: `"Art. 32"`,
//! `"Article 32"` and `"32(1)"` all resolve to article `32`.

use std::collections::HashMap;
use std::path::Path;

use dpia_core::entities::{ArticleDocument, GdprArticle};
use tracing::info;

use crate::error::CatalogError;

/// Validated, indexed article reference list.
#[derive(Debug, Clone)]
pub struct ArticleCatalog {
    articles: Vec<GdprArticle>,
    /// normalized number -> position in `articles`
    index: HashMap<String, usize>,
}

impl ArticleCatalog {
    /// Validate a parsed document and index it by article number.
    ///
    /// Numbers are stored normalized, so `"Art. 5"` in the document is
    /// listed as `"5"`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` for a blank or duplicate number or a
    /// blank title.
    pub fn from_document(document: ArticleDocument) -> Result<Self, CatalogError> {
        let mut articles = document.articles;
        let mut index = HashMap::with_capacity(articles.len());

        for (position, article) in articles.iter_mut().enumerate() {
            let at = format!("articles[{position}]");
            let number = normalize_reference(&article.number);
            if number.is_empty() {
                return Err(CatalogError::invalid(at, "article number must not be blank"));
            }
            if article.title.trim().is_empty() {
                return Err(CatalogError::invalid(
                    format!("{at}.title"),
                    format!("article {number} has a blank title"),
                ));
            }
            if index.insert(number.clone(), position).is_some() {
                return Err(CatalogError::invalid(
                    at,
                    format!("duplicate article number '{number}'"),
                ));
            }
            article.number = number;
        }

        info!(articles = articles.len(), "article catalog loaded");
        Ok(Self { articles, index })
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, otherwise the same
    /// errors as [`Self::from_document`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: ArticleDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

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

    /// Look up a cited article.
    ///
    /// Tries the normalized citation first, then its leading article number
    /// so paragraph references (`"6(1)(a)"`) fall back to the article.
    #[must_use]
    pub fn get(&self, reference: &str) -> Option<&GdprArticle> {
        let normalized = normalize_reference(reference);
        self.index
            .get(&normalized)
            .or_else(|| self.index.get(base_number(&normalized)))
            .map(|&position| &self.articles[position])
    }

    /// All articles in document order.
    #[must_use]
    pub fn articles(&self) -> &[GdprArticle] {
        &self.articles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Resolve citations in order, skipping repeats.
    ///
    /// Returns the matched articles in first-cited order and the citations
    /// that matched nothing, each reported once in normalized form.
    pub fn resolve<'a>(
        &self,
        references: impl IntoIterator<Item = &'a str>,
    ) -> (Vec<GdprArticle>, Vec<String>) {
        let mut found: Vec<GdprArticle> = Vec::new();
        let mut unresolved: Vec<String> = Vec::new();

        for reference in references {
            match self.get(reference) {
                Some(article) => {
                    if !found.iter().any(|a| a.number == article.number) {
                        found.push(article.clone());
                    }
                }
                None => {
                    let normalized = normalize_reference(reference);
                    if !normalized.is_empty() && !unresolved.contains(&normalized) {
                        unresolved.push(normalized);
                    }
                }
            }
        }
        (found, unresolved)
    }
}

/// Strip whitespace and a leading `Article`, `Art.` or `Art` from a citation.
#[must_use]
pub fn normalize_reference(reference: &str) -> String {
    let trimmed = reference.trim();
    let lower = trimmed.to_ascii_lowercase();
    let rest = ["article", "art.", "art"]
        .iter()
        .find(|prefix| lower.starts_with(**prefix))
        .map_or(trimmed, |prefix| &trimmed[prefix.len()..]);
    rest.trim().to_string()
}

fn base_number(reference: &str) -> &str {
    let end = reference
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(reference.len());
    &reference[..end]
}
