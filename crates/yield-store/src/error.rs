//! Store error types.

use std::path::PathBuf;

use thiserror::Error;
use yield_core::errors::CoreError;

/// Backend failures. Converted into `CoreError::Other` at the trait boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a campaign file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A campaign document could not be encoded or decoded.
    #[error("Invalid campaign document at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The temporary file could not be moved into place.
    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },

    /// Another writer holds the campaign's lock.
    #[error("Campaign {campaign_id} is locked by another writer ({holder})")]
    Locked { campaign_id: String, holder: String },

    /// The in-memory store's mutex was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for CoreError {
    fn from(error: StoreError) -> Self {
        Self::Other(error.into())
    }
}
