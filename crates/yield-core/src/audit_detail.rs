//! Typed audit detail payloads.
//!
//! Each audit action can carry a structured `detail` JSON blob. These types
//! give that blob a schema.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{KpiType, MarginGoal};

/// Detail for `AuditAction::Optimized`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct OptimizationDetail {
    pub margin_goal: MarginGoal,
    pub kpi_type: KpiType,
    pub target_kpi: f64,
    pub respect_ceiling: bool,
    pub cpm_ceiling: Option<f64>,
    pub locked_lines: u32,
    pub missing_signal_lines: u32,
    pub spend_before: f64,
    pub spend_after: f64,
}

/// Detail for `AuditAction::Created`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CreatedDetail {
    pub line_items: u32,
    pub total_spend: f64,
}
