use anyhow::Context;
use serde::Serialize;
use yield_config::YieldConfig;
use yield_core::entities::OptimizationParameters;
use yield_core::enums::{KpiType, MarginGoal};
use yield_core::store::CampaignStore;
use yield_optimizer::{LineChange, PerformanceSignal, ProposalSummary};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProposeArgs;
use crate::output::output_with_rows;

/// JSON response for `yld propose`.
#[derive(Debug, Serialize)]
pub struct ProposeResponse {
    pub base_revision: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
    pub summary: ProposalSummary,
}

/// Table row for one proposed line change.
#[derive(Debug, Serialize)]
pub struct ChangeRow {
    pub id: String,
    pub signal: String,
    pub spend: f64,
    pub new_spend: f64,
    pub margin: f64,
    pub new_margin: f64,
    pub cpm: f64,
    pub new_cpm: f64,
}

impl From<&LineChange> for ChangeRow {
    fn from(change: &LineChange) -> Self {
        let signal = if change.locked {
            "locked".to_string()
        } else {
            match change.signal {
                PerformanceSignal::Missing => "missing".to_string(),
                PerformanceSignal::Measured(ratio) => format!("{ratio:.3}"),
            }
        };
        Self {
            id: change.id.clone(),
            signal,
            spend: change.spend_before,
            new_spend: change.spend_after,
            margin: change.margin_before,
            new_margin: change.margin_after,
            cpm: change.cpm_before,
            new_cpm: change.cpm_after,
        }
    }
}

/// Build optimization parameters from CLI arguments.
pub fn parameters(args: &ProposeArgs) -> anyhow::Result<OptimizationParameters> {
    let kpi_type: KpiType = args.kpi_type.parse()?;
    let mut params = OptimizationParameters::new(args.target_kpi, kpi_type)
        .with_locked(args.locked.iter().cloned());
    if let Some(goal) = &args.goal {
        params = params.with_goal(goal.parse::<MarginGoal>()?);
    }
    if let Some(ceiling) = args.ceiling {
        params = params.with_ceiling(ceiling);
    }
    Ok(params)
}

/// Handle `yld propose`.
pub fn handle(
    args: &ProposeArgs,
    store: &dyn CampaignStore,
    config: &YieldConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let campaign = store.load(&args.campaign_id)?;
    for id in &args.locked {
        if campaign.line_item(id).is_none() {
            tracing::warn!(campaign = %campaign.id, line = %id, "locked id matches no line item");
        }
    }

    let params = parameters(args)?;
    let proposal = bootstrap::optimizer(config).propose(&campaign, &params)?;

    let saved_to = match &args.out {
        Some(path) => {
            let json = serde_json::to_string_pretty(&proposal)?;
            std::fs::write(path, json)
                .with_context(|| format!("failed to write proposal to {}", path.display()))?;
            Some(path.display().to_string())
        }
        None => None,
    };

    let summary = proposal.summary();
    let rows = summary.changes.iter().map(ChangeRow::from).collect::<Vec<_>>();
    let response = ProposeResponse {
        base_revision: proposal.base_revision,
        saved_to,
        summary,
    };
    output_with_rows(&response, &rows, flags.format)
}
