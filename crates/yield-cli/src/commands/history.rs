use serde::Serialize;
use yield_config::YieldConfig;
use yield_core::entities::AuditEntry;
use yield_core::store::CampaignStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HistoryArgs;
use crate::commands::shared::limit::effective_limit;
use crate::output::output_with_rows;

/// Table row for one audit entry.
#[derive(Debug, Serialize)]
pub struct HistoryRow {
    pub id: String,
    pub at: String,
    pub action: String,
    pub description: String,
}

impl From<&AuditEntry> for HistoryRow {
    fn from(entry: &AuditEntry) -> Self {
        Self {
            id: entry.id.clone(),
            at: entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            action: entry.action.to_string(),
            description: entry.description.clone(),
        }
    }
}

/// The newest `limit` entries, newest first.
#[must_use]
pub fn newest_first(history: &[AuditEntry], limit: usize) -> Vec<&AuditEntry> {
    history.iter().rev().take(limit).collect()
}

/// Handle `yld history`.
pub fn handle(
    args: &HistoryArgs,
    store: &dyn CampaignStore,
    config: &YieldConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let campaign = store.load(&args.campaign_id)?;
    let limit = effective_limit(args.limit, config.general.history_limit);
    let entries = newest_first(&campaign.history, limit);
    let rows = entries.iter().copied().map(HistoryRow::from).collect::<Vec<_>>();
    output_with_rows(&entries, &rows, flags.format)
}
