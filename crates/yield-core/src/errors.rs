//! Cross-cutting error types.
//!
//! Domain-specific errors (e.g. `OptimizeError`, `StoreError`) are defined in
//! their respective crates. Store backends report through `CoreError` so the
//! optimizer can call any of them through the `CampaignStore` trait.

use thiserror::Error;

/// Errors that can be raised by any yield crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// An entity with the same identity already exists.
    #[error("Entity already exists: {entity_type} {id}")]
    AlreadyExists { entity_type: String, id: String },

    /// A commit was attempted against a revision that is no longer current.
    #[error("Stale revision for campaign {campaign_id}: expected {expected}, found {actual}")]
    StaleRevision {
        campaign_id: String,
        expected: u64,
        actual: u64,
    },

    /// Data failed validation (format, ranges, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a campaign `NotFound`.
    #[must_use]
    pub fn campaign_not_found(id: &str) -> Self {
        Self::NotFound {
            entity_type: "campaign".to_string(),
            id: id.to_string(),
        }
    }
}
