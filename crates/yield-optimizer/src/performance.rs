//! Performance scoring: observed KPI against target.
//!
//! The result is oriented so that a ratio above 1 always means "beating
//! target", whichever direction the KPI itself prefers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use yield_core::entities::LineItem;
use yield_core::enums::{KpiOrientation, KpiType};

/// How a line performed against the campaign target.
///
/// `Missing` only arises for cost-type KPIs with no observed value: a cost of
/// zero means nothing was bought yet, not that the line is infinitely good.
/// A quality-type KPI of zero is a real, poor measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "ratio", rename_all = "snake_case")]
pub enum PerformanceSignal {
    Missing,
    Measured(f64),
}

impl PerformanceSignal {
    /// Score one line against `target_kpi`.
    #[must_use]
    pub fn measure(item: &LineItem, target_kpi: f64, kpi_type: KpiType) -> Self {
        match kpi_type.orientation() {
            KpiOrientation::Cost => {
                if item.kpi_actual == 0.0 {
                    Self::Missing
                } else {
                    Self::Measured(target_kpi / item.kpi_actual)
                }
            }
            KpiOrientation::Quality => Self::Measured(item.kpi_actual / target_kpi),
        }
    }

    /// Numeric ratio, with `Missing` read as 0.
    #[must_use]
    pub const fn ratio(self) -> f64 {
        match self {
            Self::Missing => 0.0,
            Self::Measured(ratio) => ratio,
        }
    }

    #[must_use]
    pub const fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kpi_actual: f64) -> LineItem {
        LineItem {
            id: "li".into(),
            name: "li".into(),
            spend: 100.0,
            cpm_revenue: 5.0,
            margin_pct: 20.0,
            kpi_actual,
        }
    }

    #[test]
    fn cost_kpi_below_target_beats_it() {
        let signal = PerformanceSignal::measure(&item(8.0), 10.0, KpiType::Cpa);
        assert_eq!(signal, PerformanceSignal::Measured(1.25));
    }

    #[test]
    fn cost_kpi_zero_is_missing() {
        let signal = PerformanceSignal::measure(&item(0.0), 10.0, KpiType::Cpc);
        assert!(signal.is_missing());
        assert!(signal.ratio().abs() < f64::EPSILON);
    }

    #[test]
    fn quality_kpi_above_target_beats_it() {
        let signal = PerformanceSignal::measure(&item(0.9), 0.6, KpiType::Ctr);
        assert!((signal.ratio() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn quality_kpi_zero_is_a_measurement() {
        let signal = PerformanceSignal::measure(&item(0.0), 0.6, KpiType::Vcr);
        assert_eq!(signal, PerformanceSignal::Measured(0.0));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(PerformanceSignal::Measured(1.25)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "measured", "ratio": 1.25}));
        let json = serde_json::to_value(PerformanceSignal::Missing).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "missing"}));
    }
}
