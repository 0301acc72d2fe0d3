use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{MitigationStatus, Priority};

/// A measure that reduces the risk associated with one response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Mitigation {
    pub id: String,
    pub response_id: String,
    pub description: String,
    pub status: MitigationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gdpr_article: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
