use std::path::PathBuf;

use anyhow::Context;
use dpia_config::DpiaConfig;
use dpia_engine::Catalog;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CatalogArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogListing {
    pub path: PathBuf,
    pub question_count: usize,
    pub categories: Vec<CategoryListing>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListing {
    pub id: String,
    pub title: String,
    pub question_ids: Vec<String>,
}

/// Handle `dpia catalog`.
pub fn handle(args: &CatalogArgs, config: &DpiaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = args.path.clone().unwrap_or_else(|| config.catalog.path_buf());
    let listing = list(path)?;
    output(&listing, flags.format, config.export.pretty)
}

/// Load and validate the catalog at `path` and describe its layout.
pub fn list(path: PathBuf) -> anyhow::Result<CatalogListing> {
    let catalog = Catalog::from_path(&path)
        .with_context(|| format!("failed to load catalog {}", path.display()))?;
    let categories = catalog
        .categories()
        .iter()
        .map(|category| CategoryListing {
            id: category.id.clone(),
            title: category.title.clone(),
            question_ids: category.questions.iter().map(|q| q.id.clone()).collect(),
        })
        .collect();

    Ok(CatalogListing {
        question_count: catalog.question_count(),
        path,
        categories,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn lists_categories_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"categories": [
                {{"id": "b", "title": "B", "questions": [{{"id": "b1", "type": "text", "riskWeight": 0.1}}]}},
                {{"id": "a", "title": "A", "questions": []}}
            ]}}"#
        )
        .unwrap();

        let listing = list(file.path().to_path_buf()).unwrap();
        assert_eq!(listing.question_count, 1);
        let ids: Vec<&str> = listing.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(listing.categories[0].question_ids, vec!["b1".to_string()]);
    }

    #[test]
    fn invalid_catalog_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"categories": [{{"id": "", "title": "", "questions": []}}]}}"#).unwrap();
        let err = list(file.path().to_path_buf()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load catalog"));
    }
}
