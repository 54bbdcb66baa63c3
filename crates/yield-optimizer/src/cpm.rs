//! Sold-CPM adjustment strategies.
//!
//! Two strategies share one interface. [`Unconstrained`] takes coarse steps and
//! never clamps. [`CeilingAware`] takes smaller steps, bounds each tier below a
//! fraction of the ceiling, and finally clamps to the ceiling itself. It also
//! knows where the portfolio currently sits relative to the ceiling, which the
//! allocation scorer uses to reward lines that move the blend the right way.

use tracing::{debug, warn};
use yield_core::entities::{LineItem, OptimizationParameters};
use yield_core::enums::MarginGoal;

use crate::margin::{ON_TARGET, STRONG};
use crate::performance::PerformanceSignal;

/// Ratio below which the ceiling-aware strategy stops raising CPM.
pub const WEAK: f64 = 0.8;

/// Bonus range for ceiling alignment.
pub const BONUS_MIN: f64 = 0.5;
pub const BONUS_MAX: f64 = 1.5;

/// A per-line sold-CPM policy.
pub trait CpmAdjuster {
    /// New sold CPM for a line currently selling at `cpm`.
    fn adjust(&self, cpm: f64, signal: PerformanceSignal, goal: MarginGoal) -> f64;

    /// Multiplier rewarding lines that move the portfolio toward the ceiling.
    /// `None` when the strategy has no ceiling.
    fn cap_alignment_bonus(&self, new_cpm: f64) -> Option<f64>;
}

/// Pick the strategy the parameters ask for.
#[must_use]
pub fn for_parameters(
    params: &OptimizationParameters,
    items: &[LineItem],
) -> Box<dyn CpmAdjuster> {
    if params.respect_ceiling {
        Box::new(CeilingAware::new(params.cpm_ceiling, items))
    } else {
        Box::new(Unconstrained)
    }
}

// ---------------------------------------------------------------------------
// Unconstrained
// ---------------------------------------------------------------------------

/// Coarse steps, no ceiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconstrained;

impl CpmAdjuster for Unconstrained {
    fn adjust(&self, cpm: f64, signal: PerformanceSignal, goal: MarginGoal) -> f64 {
        let ratio = signal.ratio();
        let factor = match goal {
            MarginGoal::Increase => {
                if ratio >= STRONG {
                    1.08
                } else if ratio >= ON_TARGET {
                    1.05
                } else {
                    return cpm;
                }
            }
            MarginGoal::Decrease => {
                if ratio >= ON_TARGET {
                    0.97
                } else {
                    return cpm;
                }
            }
        };
        cpm * factor
    }

    fn cap_alignment_bonus(&self, _new_cpm: f64) -> Option<f64> {
        None
    }
}

// ---------------------------------------------------------------------------
// CeilingAware
// ---------------------------------------------------------------------------

/// Nudges CPM toward a portfolio ceiling without ever crossing it.
#[derive(Debug, Clone, Copy)]
pub struct CeilingAware {
    ceiling: f64,
    portfolio_cpm: f64,
}

impl CeilingAware {
    /// Build the strategy, computing the current portfolio CPM over `items`
    /// (locked and unlocked alike).
    #[must_use]
    pub fn new(ceiling: f64, items: &[LineItem]) -> Self {
        if !has_usable_ceiling(ceiling) {
            warn!(ceiling, "CPM ceiling is not a positive number; keeping current CPMs");
        }
        Self {
            ceiling,
            portfolio_cpm: portfolio_cpm(items),
        }
    }

    /// Whether the portfolio currently sells below the ceiling.
    #[must_use]
    pub fn portfolio_below_ceiling(&self) -> bool {
        self.portfolio_cpm < self.ceiling
    }
}

impl CpmAdjuster for CeilingAware {
    fn adjust(&self, cpm: f64, signal: PerformanceSignal, goal: MarginGoal) -> f64 {
        if !has_usable_ceiling(self.ceiling) {
            return cpm;
        }

        let ceiling = self.ceiling;
        let ratio = signal.ratio();
        let stepped = match goal {
            MarginGoal::Increase => {
                if ratio >= STRONG {
                    (cpm * 1.05).min(ceiling)
                } else if ratio >= ON_TARGET {
                    (cpm * 1.03).min(ceiling * 0.95)
                } else if ratio >= WEAK {
                    (cpm * 1.01).min(ceiling * 0.85)
                } else {
                    cpm * 0.97
                }
            }
            MarginGoal::Decrease => {
                if ratio >= ON_TARGET {
                    (cpm * 0.98).min(ceiling * 0.95)
                } else {
                    cpm * 0.95
                }
            }
        };
        stepped.min(ceiling)
    }

    fn cap_alignment_bonus(&self, new_cpm: f64) -> Option<f64> {
        if !has_usable_ceiling(self.ceiling) {
            return Some(1.0);
        }

        let ratio = new_cpm / self.ceiling;
        let bonus = if self.portfolio_below_ceiling() {
            1.0 + (ratio - 1.0) * 0.5
        } else {
            1.0 + (1.0 - ratio) * 0.5
        };
        Some(bonus.clamp(BONUS_MIN, BONUS_MAX))
    }
}

fn has_usable_ceiling(ceiling: f64) -> bool {
    ceiling.is_finite() && ceiling > 0.0
}

/// Spend-weighted average sold CPM.
///
/// With no spend at all the plain mean is used, and an empty portfolio sits
/// at 0.
#[must_use]
pub fn portfolio_cpm(items: &[LineItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }

    let total_spend: f64 = items.iter().map(|item| item.spend).sum();
    if total_spend > 0.0 {
        let weighted: f64 = items.iter().map(|item| item.spend * item.cpm_revenue).sum();
        weighted / total_spend
    } else {
        debug!("portfolio has no spend; using unweighted mean CPM");
        #[allow(clippy::cast_precision_loss)]
        let count = items.len() as f64;
        items.iter().map(|item| item.cpm_revenue).sum::<f64>() / count
    }
}
