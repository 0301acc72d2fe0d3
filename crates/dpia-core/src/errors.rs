//! Cross-cutting error types for the DPIA crates.
//!
//! Domain-specific errors (`EngineError`, `CatalogError`, `ConfigError`) are
//! defined in their respective crates. The CLI converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any DPIA crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string did not name any known variant of an enum.
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
