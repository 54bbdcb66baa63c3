//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default number of history entries shown.
const fn default_history_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Number of audit entries `yld history` prints when no `--limit` is given.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}
