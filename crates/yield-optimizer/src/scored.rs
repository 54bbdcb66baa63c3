use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use yield_core::entities::LineItem;

use crate::performance::PerformanceSignal;

/// One line item with everything a pass derived for it.
///
/// Ephemeral: built per pass, shown in diagnostics, never stored on a campaign.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ScoredLineItem {
    pub item: LineItem,
    pub locked: bool,
    pub signal: PerformanceSignal,
    pub new_margin: f64,
    pub new_cpm_revenue: f64,
    /// Present only when CPM is adjusted against a ceiling.
    pub cap_alignment_bonus: Option<f64>,
    pub allocation_score: f64,
}
