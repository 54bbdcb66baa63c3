//! Campaign store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> String {
    ".yield/campaigns".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Directory holding one JSON document per campaign.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl StoreConfig {
    #[must_use]
    pub fn data_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}
