use std::path::PathBuf;

use clap::Subcommand;

/// Campaign document commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CampaignCommands {
    /// Create a campaign from a JSON array of line items.
    Create {
        #[arg(long)]
        name: String,
        /// Line-item file, or `-` for stdin.
        #[arg(long)]
        items: PathBuf,
        /// Campaign id (generated when omitted).
        #[arg(long)]
        id: Option<String>,
    },
    /// Show a campaign and its line items.
    Show { id: String },
    /// List stored campaigns.
    List,
}
