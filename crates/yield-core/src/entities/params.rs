use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{KpiType, MarginGoal};
use crate::errors::CoreError;

/// Inputs that steer one optimization pass.
///
/// `margin_goal` may be unset until the user picks a direction; running a pass
/// without one is a precondition failure.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct OptimizationParameters {
    pub target_kpi: f64,
    pub kpi_type: KpiType,
    #[serde(default)]
    pub margin_goal: Option<MarginGoal>,
    /// Only consulted when `respect_ceiling` is set.
    #[serde(default)]
    pub cpm_ceiling: f64,
    #[serde(default)]
    pub respect_ceiling: bool,
    /// Line item ids excluded from reallocation.
    #[serde(default)]
    pub locked_ids: BTreeSet<String>,
}

impl OptimizationParameters {
    #[must_use]
    pub const fn new(target_kpi: f64, kpi_type: KpiType) -> Self {
        Self {
            target_kpi,
            kpi_type,
            margin_goal: None,
            cpm_ceiling: 0.0,
            respect_ceiling: false,
            locked_ids: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_goal(mut self, goal: MarginGoal) -> Self {
        self.margin_goal = Some(goal);
        self
    }

    /// Enable ceiling-respecting CPM adjustment.
    #[must_use]
    pub fn with_ceiling(mut self, cpm_ceiling: f64) -> Self {
        self.cpm_ceiling = cpm_ceiling;
        self.respect_ceiling = true;
        self
    }

    #[must_use]
    pub fn with_locked<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locked_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn is_locked(&self, id: &str) -> bool {
        self.locked_ids.contains(id)
    }

    /// Reject parameters no pass can sensibly run with.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when `target_kpi` is not a positive
    /// finite number.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.target_kpi.is_finite() || self.target_kpi <= 0.0 {
            return Err(CoreError::Validation(format!(
                "target_kpi must be positive, got {}",
                self.target_kpi
            )));
        }
        Ok(())
    }
}
