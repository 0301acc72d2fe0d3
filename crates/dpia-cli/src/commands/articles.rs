use std::path::{Path, PathBuf};

use anyhow::Context;
use dpia_config::DpiaConfig;
use dpia_core::entities::GdprArticle;
use dpia_engine::ArticleCatalog;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ArticlesArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListing {
    pub path: PathBuf,
    pub articles: Vec<GdprArticle>,
}

/// Handle `dpia articles`.
pub fn handle(args: &ArticlesArgs, config: &DpiaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = args
        .path
        .clone()
        .or_else(|| config.catalog.articles_path_buf())
        .context("no article reference configured; pass --path or set catalog.articles_path")?;

    match &args.number {
        Some(reference) => {
            let article = show(&path, reference)?;
            output(&article, flags.format, config.export.pretty)
        }
        None => output(&list(path)?, flags.format, config.export.pretty),
    }
}

/// Load and validate the article reference at `path`.
pub fn list(path: PathBuf) -> anyhow::Result<ArticleListing> {
    let catalog = load(&path)?;
    Ok(ArticleListing {
        articles: catalog.articles().to_vec(),
        path,
    })
}

/// Look up one article by number or citation.
pub fn show(path: &Path, reference: &str) -> anyhow::Result<GdprArticle> {
    load(path)?
        .get(reference)
        .cloned()
        .with_context(|| format!("article '{reference}' not found in {}", path.display()))
}

fn load(path: &Path) -> anyhow::Result<ArticleCatalog> {
    ArticleCatalog::from_path(path)
        .with_context(|| format!("failed to load articles {}", path.display()))
}
