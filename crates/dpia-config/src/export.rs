//! Report export settings.

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Pretty-print JSON reports.
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Include stored responses and mitigations in exported reports.
    #[serde(default = "default_true")]
    pub include_records: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            include_records: true,
        }
    }
}
