use serde::Serialize;
use yield_core::entities::{Campaign, LineItem};
use yield_core::ids::{PREFIX_CAMPAIGN, generate_id};
use yield_core::store::CampaignStore;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CampaignCommands;
use crate::commands::shared::input::read_json;
use crate::output::{output, output_with_rows};

/// One row of `yld campaign list`.
#[derive(Debug, Serialize)]
pub struct CampaignRow {
    pub id: String,
    pub name: String,
    pub revision: u64,
    pub line_items: usize,
    pub total_spend: f64,
    pub history: usize,
}

impl From<&Campaign> for CampaignRow {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id.clone(),
            name: campaign.name.clone(),
            revision: campaign.revision,
            line_items: campaign.line_items.len(),
            total_spend: campaign.total_spend(),
            history: campaign.history.len(),
        }
    }
}

/// Handle `yld campaign`.
pub fn handle(
    action: &CampaignCommands,
    store: &dyn CampaignStore,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CampaignCommands::Create { name, items, id } => {
            let line_items: Vec<LineItem> = read_json(items, "line items")?;
            let id = match id {
                Some(id) => id.clone(),
                None => generate_id(PREFIX_CAMPAIGN)?,
            };
            let campaign = store.create(Campaign::create(&id, name, line_items)?)?;
            tracing::info!(campaign = %campaign.id, lines = campaign.line_items.len(), "campaign created");
            output_with_rows(&campaign, &CampaignRow::from(&campaign), flags.format)
        }
        CampaignCommands::Show { id } => {
            let campaign = store.load(id)?;
            output_with_rows(&campaign, &campaign.line_items, flags.format)
        }
        CampaignCommands::List => {
            let rows = store
                .list()?
                .iter()
                .map(CampaignRow::from)
                .collect::<Vec<_>>();
            output(&rows, flags.format)
        }
    }
}
