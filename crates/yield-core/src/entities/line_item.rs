use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Lowest margin percentage a line item may carry.
pub const MARGIN_MIN: f64 = 5.0;

/// Highest margin percentage a line item may carry.
pub const MARGIN_MAX: f64 = 95.0;

/// A sub-allocation of a campaign's budget with its own spend, sold CPM,
/// margin, and observed KPI.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    /// Currency amount, never negative.
    pub spend: f64,
    /// Sold CPM.
    pub cpm_revenue: f64,
    /// Margin percentage in `[MARGIN_MIN, MARGIN_MAX]`.
    pub margin_pct: f64,
    /// Observed KPI value; unit depends on the campaign's KPI type.
    pub kpi_actual: f64,
}

impl LineItem {
    /// Check the field ranges a stored line item must satisfy.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation("line item id must not be empty".into()));
        }
        if !self.spend.is_finite() || self.spend < 0.0 {
            return Err(CoreError::Validation(format!(
                "line item {}: spend must be a non-negative amount, got {}",
                self.id, self.spend
            )));
        }
        if !self.cpm_revenue.is_finite() || self.cpm_revenue <= 0.0 {
            return Err(CoreError::Validation(format!(
                "line item {}: cpm_revenue must be positive, got {}",
                self.id, self.cpm_revenue
            )));
        }
        if !(MARGIN_MIN..=MARGIN_MAX).contains(&self.margin_pct) {
            return Err(CoreError::Validation(format!(
                "line item {}: margin_pct must be within [{MARGIN_MIN}, {MARGIN_MAX}], got {}",
                self.id, self.margin_pct
            )));
        }
        if !self.kpi_actual.is_finite() || self.kpi_actual < 0.0 {
            return Err(CoreError::Validation(format!(
                "line item {}: kpi_actual must be a non-negative number, got {}",
                self.id, self.kpi_actual
            )));
        }
        Ok(())
    }
}
