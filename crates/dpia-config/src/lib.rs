//! # dpia-config
//!
//! Layered configuration loading for the DPIA risk engine using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DPIA_*` prefix, `__` as separator)
//! 2. Project-level `.dpia/config.toml`
//! 3. User-level `~/.config/dpia/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DPIA_CATALOG__PATH` -> `catalog.path`,
//! `DPIA_EXPORT__PRETTY` -> `export.pretty`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use dpia_config::DpiaConfig;
//!
//! let config = DpiaConfig::load_with_dotenv().expect("config");
//! println!("catalog: {}", config.catalog.path);
//! ```

mod catalog;
mod error;
mod export;
mod general;

pub use catalog::CatalogConfig;
pub use error::ConfigError;
pub use export::ExportConfig;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DpiaConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl DpiaConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed, or
    /// `ConfigError::InvalidValue` if the merged values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".dpia/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("DPIA_").split("__"))
    }

    /// Reject values that would make the engine unusable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "catalog.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self
            .catalog
            .articles_path
            .as_deref()
            .is_some_and(|path| path.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "catalog.articles_path".into(),
                reason: "must not be empty when set".into(),
            });
        }
        if let Some(blank) = self
            .general
            .default_risk_factors
            .iter()
            .position(|factor| factor.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: format!("general.default_risk_factors[{blank}]"),
                reason: "risk factor id must not be blank".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dpia").join("config.toml"))
    }
}
