//! Budget reallocation.
//!
//! Unlocked spend forms a pool that is split in proportion to allocation
//! scores and then blended with current spend. Locked lines keep their spend.
//! Unlocked lines with no KPI signal sit outside the pool and keep only a
//! fixed fraction of their spend, so the portfolio total can shrink.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scored::ScoredLineItem;

/// Weights for the two non-locked spend rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReallocationPolicy {
    /// Share of the proportional target in the blended spend.
    pub damping: f64,
    /// Fraction of spend kept by unlocked lines with a missing signal.
    pub no_signal_retention: f64,
}

impl Default for ReallocationPolicy {
    fn default() -> Self {
        Self {
            damping: 0.7,
            no_signal_retention: 0.1,
        }
    }
}

/// Pool totals for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PoolTotals {
    pub total_spend: f64,
    pub locked_spend: f64,
    pub available_spend: f64,
    pub total_score: f64,
}

impl PoolTotals {
    #[must_use]
    pub fn from_scored(scored: &[ScoredLineItem]) -> Self {
        let total_spend: f64 = scored.iter().map(|line| line.item.spend).sum();
        let locked_spend: f64 = scored
            .iter()
            .filter(|line| line.locked)
            .map(|line| line.item.spend)
            .sum();
        let total_score: f64 = scored
            .iter()
            .filter(|line| !line.locked)
            .map(|line| line.allocation_score)
            .sum();

        Self {
            total_spend,
            locked_spend,
            available_spend: (total_spend - locked_spend).max(0.0),
            total_score,
        }
    }
}

/// New spend for every line, in input order.
#[must_use]
pub fn reallocate(scored: &[ScoredLineItem], policy: ReallocationPolicy) -> (Vec<f64>, PoolTotals) {
    let totals = PoolTotals::from_scored(scored);
    if totals.total_score <= 0.0 {
        debug!("no unlocked line has a positive score; proportional targets fall back to current spend");
    }

    let spends = scored
        .iter()
        .map(|line| final_spend(line, &totals, policy))
        .collect();
    (spends, totals)
}

fn final_spend(line: &ScoredLineItem, totals: &PoolTotals, policy: ReallocationPolicy) -> f64 {
    let spend = line.item.spend;
    if line.locked {
        return spend;
    }
    if line.signal.is_missing() {
        return round_currency(spend * policy.no_signal_retention);
    }

    let theoretical = if totals.total_score > 0.0 {
        line.allocation_score / totals.total_score * totals.available_spend
    } else {
        spend
    };
    round_currency(policy.damping * theoretical + (1.0 - policy.damping) * spend)
}

/// Round to cents; NaN becomes 0.
#[must_use]
pub fn round_currency(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use yield_core::entities::LineItem;

    use super::*;
    use crate::performance::PerformanceSignal;

    fn line(id: &str, spend: f64, score: f64, signal: PerformanceSignal, locked: bool) -> ScoredLineItem {
        ScoredLineItem {
            item: LineItem {
                id: id.into(),
                name: id.into(),
                spend,
                cpm_revenue: 5.0,
                margin_pct: 20.0,
                kpi_actual: 1.0,
            },
            locked,
            signal,
            new_margin: 20.0,
            new_cpm_revenue: 5.0,
            cap_alignment_bonus: None,
            allocation_score: score,
        }
    }

    fn measured(id: &str, spend: f64, score: f64) -> ScoredLineItem {
        line(id, spend, score, PerformanceSignal::Measured(1.0), false)
    }

    #[test]
    fn splits_pool_by_score_and_blends() {
        let scored = [measured("a", 600.0, 3.0), measured("b", 400.0, 1.0)];
        let (spends, totals) = reallocate(&scored, ReallocationPolicy::default());

        // a: 0.7 * 750 + 0.3 * 600, b: 0.7 * 250 + 0.3 * 400
        assert_eq!(spends, vec![705.0, 295.0]);
        assert!((totals.available_spend - 1000.0).abs() < f64::EPSILON);
        assert!((totals.total_score - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn locked_spend_is_untouched_and_excluded_from_pool() {
        let scored = [
            line("a", 123.456_789, 5.0, PerformanceSignal::Measured(2.0), true),
            measured("b", 400.0, 1.0),
        ];
        let (spends, totals) = reallocate(&scored, ReallocationPolicy::default());

        assert_eq!(spends[0].to_bits(), 123.456_789_f64.to_bits());
        assert!((totals.available_spend - 400.0).abs() < 1e-9);
        assert!((totals.total_score - 1.0).abs() < f64::EPSILON);
        assert!((spends[1] - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_signal_keeps_a_tenth() {
        let scored = [
            line("a", 100.0, 0.0, PerformanceSignal::Missing, false),
            measured("b", 900.0, 2.0),
        ];
        let (spends, _) = reallocate(&scored, ReallocationPolicy::default());
        assert!((spends[0] - 10.0).abs() < f64::EPSILON);
        // b takes the whole pool including a's spend: 0.7 * 1000 + 0.3 * 900
        assert!((spends[1] - 970.0).abs() < 1e-9);
    }

    #[test]
    fn zero_total_score_keeps_current_spend() {
        let scored = [
            line("a", 100.0, 0.0, PerformanceSignal::Missing, false),
            line("b", 250.0, 0.0, PerformanceSignal::Measured(1.0), false),
        ];
        let (spends, _) = reallocate(&scored, ReallocationPolicy::default());
        assert_eq!(spends, vec![10.0, 250.0]);
    }

    #[test]
    fn nan_spend_becomes_zero() {
        // inf / inf poisons the first line's target; the other gets no pool share.
        let scored = [measured("a", 100.0, f64::INFINITY), measured("b", 100.0, 1.0)];
        let (spends, _) = reallocate(&scored, ReallocationPolicy::default());
        assert_eq!(spends, vec![0.0, 30.0]);
    }

    #[test]
    fn custom_policy_changes_weights() {
        let policy = ReallocationPolicy {
            damping: 1.0,
            no_signal_retention: 0.5,
        };
        let scored = [
            line("a", 100.0, 0.0, PerformanceSignal::Missing, false),
            measured("b", 300.0, 1.0),
            measured("c", 100.0, 3.0),
        ];
        let (spends, _) = reallocate(&scored, policy);
        assert_eq!(spends, vec![50.0, 125.0, 375.0]);
    }

    #[test]
    fn rounds_to_cents() {
        assert!((round_currency(670.654_205_6) - 670.65).abs() < 1e-9);
        assert!((round_currency(299.345_794_4) - 299.35).abs() < 1e-9);
        assert!(round_currency(f64::NAN).abs() < f64::EPSILON);
    }
}
