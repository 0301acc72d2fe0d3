//! Question and article catalog locations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "data/questions.json".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Path to the catalog JSON document, relative to the working directory.
    #[serde(default = "default_path")]
    pub path: String,
    /// Optional GDPR article reference document. Reports resolve cited
    /// articles only when this is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles_path: Option<String>,
}

impl CatalogConfig {
    #[must_use]
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }

    #[must_use]
    pub fn articles_path_buf(&self) -> Option<PathBuf> {
        self.articles_path.as_ref().map(PathBuf::from)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            articles_path: None,
        }
    }
}
