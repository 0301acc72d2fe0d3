use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference entry for one GDPR article.
///
/// `number` is the bare article number (`"32"`), the same form questions and
/// mitigations use in their `gdprArticles` / `gdprArticle` fields.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GdprArticle {
    pub number: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, alias = "full_text", skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    /// Why the article matters for an impact assessment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<String>,
}

/// The article reference document as loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ArticleDocument {
    pub articles: Vec<GdprArticle>,
}
