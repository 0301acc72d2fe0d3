//! ID prefixes and generation.
//!
//! Every stored entity gets a prefixed ID of the form `{prefix}-{8 hex chars}`,
//! e.g. `rsp-a3f8b2c1`.

use crate::errors::CoreError;

pub const PREFIX_RESPONSE: &str = "rsp";
pub const PREFIX_MITIGATION: &str = "mit";

/// Generate a prefixed ID from 4 random bytes.
///
/// # Errors
///
/// Returns `CoreError::Other` if the OS entropy source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|e| CoreError::Other(anyhow::anyhow!("entropy source unavailable: {e}")))?;
    Ok(format!(
        "{prefix}-{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    ))
}
