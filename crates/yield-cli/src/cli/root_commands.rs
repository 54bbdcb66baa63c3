use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::CampaignCommands;

/// Top-level subcommands for the `yld` CLI.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Campaign documents.
    Campaign {
        #[command(subcommand)]
        action: CampaignCommands,
    },
    /// Compute a reallocation without writing it.
    Propose(ProposeArgs),
    /// Commit a saved proposal.
    Apply(ApplyArgs),
    /// Show a campaign's audit history, newest first.
    History(HistoryArgs),
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
    /// Print the effective configuration.
    Config,
}

/// Arguments for `yld propose`.
#[derive(Clone, Debug, Args)]
pub struct ProposeArgs {
    pub campaign_id: String,

    /// Margin goal: increase or decrease.
    #[arg(long)]
    pub goal: Option<String>,

    /// Target KPI value for the campaign.
    #[arg(long)]
    pub target_kpi: f64,

    /// KPI type: cpa, cpc, cpcv, ctr, vcr.
    #[arg(long)]
    pub kpi_type: String,

    /// Keep every sold CPM at or under this ceiling.
    #[arg(long)]
    pub ceiling: Option<f64>,

    /// Line item id to leave untouched (repeatable).
    #[arg(long = "lock", value_name = "LINE_ID")]
    pub locked: Vec<String>,

    /// Save the full proposal to this file for `yld apply`.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for `yld apply`.
#[derive(Clone, Debug, Args)]
pub struct ApplyArgs {
    /// Proposal file written by `yld propose --out`.
    pub proposal: PathBuf,
}

/// Arguments for `yld history`.
#[derive(Clone, Debug, Args)]
pub struct HistoryArgs {
    pub campaign_id: String,

    /// Max entries to show.
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Arguments for `yld schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub type_name: String,
}
