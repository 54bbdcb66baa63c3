use serde::Serialize;
use yield_core::entities::AuditEntry;
use yield_core::store::CampaignStore;
use yield_optimizer::Proposal;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ApplyArgs;
use crate::commands::shared::input::read_json;
use crate::output::output;

/// JSON response for `yld apply`.
#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub campaign_id: String,
    pub revision: u64,
    pub total_spend: f64,
    pub entry: AuditEntry,
}

/// Handle `yld apply`.
pub fn handle(args: &ApplyArgs, store: &dyn CampaignStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    let proposal: Proposal = read_json(&args.proposal, "proposal")?;
    let applied = proposal.apply(store).map_err(|error| {
        if error.is_stale() {
            anyhow::Error::new(error).context("campaign changed since the proposal was computed; propose again")
        } else {
            anyhow::Error::new(error)
        }
    })?;

    output(
        &ApplyResponse {
            campaign_id: applied.campaign.id.clone(),
            revision: applied.campaign.revision,
            total_spend: applied.campaign.total_spend(),
            entry: applied.entry,
        },
        flags.format,
    )
}
