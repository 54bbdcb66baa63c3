use schemars::{Schema, schema_for};
use yield_core::audit_detail::{CreatedDetail, OptimizationDetail};
use yield_core::entities::{AuditEntry, Campaign, LineItem, OptimizationParameters};
use yield_optimizer::{AppliedOptimization, Proposal, ProposalSummary, ScoredLineItem};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Type names accepted by `yld schema`.
pub const TYPE_NAMES: [&str; 10] = [
    "campaign",
    "line_item",
    "audit_entry",
    "optimization_parameters",
    "optimization_detail",
    "created_detail",
    "scored_line_item",
    "proposal",
    "proposal_summary",
    "applied_optimization",
];

/// JSON Schema for a registered type name (`-` and `_` are interchangeable).
#[must_use]
pub fn schema_for_name(name: &str) -> Option<Schema> {
    let schema = match name.replace('-', "_").as_str() {
        "campaign" => schema_for!(Campaign),
        "line_item" => schema_for!(LineItem),
        "audit_entry" => schema_for!(AuditEntry),
        "optimization_parameters" => schema_for!(OptimizationParameters),
        "optimization_detail" => schema_for!(OptimizationDetail),
        "created_detail" => schema_for!(CreatedDetail),
        "scored_line_item" => schema_for!(ScoredLineItem),
        "proposal" => schema_for!(Proposal),
        "proposal_summary" => schema_for!(ProposalSummary),
        "applied_optimization" => schema_for!(AppliedOptimization),
        _ => return None,
    };
    Some(schema)
}

/// Handle `yld schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(schema) = schema_for_name(&args.type_name) else {
        anyhow::bail!(
            "unknown schema type '{}' (expected one of: {})",
            args.type_name,
            TYPE_NAMES.join(", ")
        );
    };
    output(&schema, flags.format)
}
