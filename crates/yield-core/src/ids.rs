//! Prefixed ID generation.
//!
//! IDs follow the `{prefix}-{8 lowercase hex chars}` shape, e.g. `aud-3f9a02c1`.

use std::fmt::Write;

use crate::errors::CoreError;

/// Prefix for audit entries.
pub const PREFIX_AUDIT: &str = "aud";

/// Prefix for campaigns created without an explicit ID.
pub const PREFIX_CAMPAIGN: &str = "cmp";

/// Generate a new prefixed ID from 4 random bytes.
///
/// # Errors
///
/// Returns `CoreError::Other` if the OS random source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|error| anyhow::anyhow!("failed to read random bytes: {error}"))?;

    let mut id = String::with_capacity(prefix.len() + 9);
    id.push_str(prefix);
    id.push('-');
    for byte in bytes {
        let _ = write!(id, "{byte:02x}");
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_id_correct_format() {
        let id = generate_id(PREFIX_AUDIT).unwrap();
        assert!(id.starts_with("aud-"));
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn generate_id_uniqueness() {
        let ids: std::collections::HashSet<String> = (0..64)
            .map(|_| generate_id(PREFIX_CAMPAIGN).unwrap())
            .collect();
        assert_eq!(ids.len(), 64);
    }
}
