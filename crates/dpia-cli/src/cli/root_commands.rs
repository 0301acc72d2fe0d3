use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Validate a question catalog and list its categories.
    Catalog(CatalogArgs),
    /// Replay an answer file through the engine and print the assessment report.
    Summarize(SummarizeArgs),
    /// List the GDPR article reference or show one article.
    Articles(ArticlesArgs),
    /// Score a likelihood x impact pair.
    Matrix(MatrixArgs),
    /// Print registered JSON Schemas.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CatalogArgs {
    /// Catalog file (defaults to `catalog.path` from config).
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SummarizeArgs {
    /// Answer file with `assessmentId`, `answers` and optional `assessment`
    /// header and `riskReview`.
    pub answers: PathBuf,

    /// Catalog file (defaults to `catalog.path` from config).
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// GDPR article reference (defaults to `catalog.articles_path` from config).
    #[arg(long)]
    pub articles: Option<PathBuf>,

    /// Attach recommendations as proposed mitigations before reporting.
    #[arg(long)]
    pub propose: bool,

    /// Print only the risk summary instead of the full report.
    #[arg(long)]
    pub summary_only: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ArticlesArgs {
    /// Article number or citation such as `Art. 32`; lists all when omitted.
    pub number: Option<String>,

    /// Article reference file (defaults to `catalog.articles_path` from config).
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct MatrixArgs {
    /// Likelihood rating, 1-5.
    #[arg(long, short = 'l')]
    pub likelihood: u8,

    /// Impact rating, 1-5.
    #[arg(long, short = 'i')]
    pub impact: u8,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name; lists all names when omitted.
    pub name: Option<String>,
}
