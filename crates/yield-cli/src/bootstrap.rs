use std::path::PathBuf;

use anyhow::Context;
use yield_config::YieldConfig;
use yield_optimizer::{Optimizer, ReallocationPolicy};
use yield_store::FileCampaignStore;

use crate::cli::GlobalFlags;

/// Load `.env` and the layered configuration.
pub fn load_config() -> anyhow::Result<YieldConfig> {
    load_dotenv()?;
    YieldConfig::load().context("failed to load yield configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}

/// Resolve the campaign directory: `--data-dir` wins over `store.data_dir`.
#[must_use]
pub fn data_dir(flags: &GlobalFlags, config: &YieldConfig) -> PathBuf {
    flags
        .data_dir
        .clone()
        .unwrap_or_else(|| config.store.data_dir_path())
}

pub fn open_store(flags: &GlobalFlags, config: &YieldConfig) -> anyhow::Result<FileCampaignStore> {
    let dir = data_dir(flags, config);
    tracing::debug!(dir = %dir.display(), "opening campaign store");
    FileCampaignStore::open(&dir)
        .with_context(|| format!("failed to open campaign store at {}", dir.display()))
}

#[must_use]
pub fn optimizer(config: &YieldConfig) -> Optimizer {
    Optimizer::new(ReallocationPolicy {
        damping: config.optimizer.damping,
        no_signal_retention: config.optimizer.no_signal_retention,
    })
}
