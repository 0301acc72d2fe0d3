//! General engine behaviour.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Attach recommendations for high-risk categories as proposed mitigations
    /// before a report is built.
    #[serde(default)]
    pub auto_propose_mitigations: bool,

    /// Risk factor ids applied when an answer file does not record any.
    #[serde(default)]
    pub default_risk_factors: Vec<String>,
}
