//! Margin adjustment from performance and the portfolio margin goal.
//!
//! | signal              | increase | decrease |
//! |---------------------|----------|----------|
//! | missing             | 0        | 0        |
//! | ratio < 1.0         | 0        | -5       |
//! | 1.0 <= ratio < 1.2  | +2       | -5       |
//! | ratio >= 1.2        | +5       | -2       |
//!
//! Weak lines are never asked for more margin, strong lines give up less.

use yield_core::entities::{MARGIN_MAX, MARGIN_MIN};
use yield_core::enums::MarginGoal;

use crate::performance::PerformanceSignal;

/// Ratio at or above which a line counts as meeting target.
pub const ON_TARGET: f64 = 1.0;

/// Ratio at or above which a line counts as a strong over-performer.
pub const STRONG: f64 = 1.2;

/// Percentage-point change for a measured ratio.
#[must_use]
pub fn margin_delta(ratio: f64, goal: MarginGoal) -> f64 {
    match goal {
        MarginGoal::Increase => {
            if ratio >= STRONG {
                5.0
            } else if ratio >= ON_TARGET {
                2.0
            } else {
                0.0
            }
        }
        MarginGoal::Decrease => {
            if ratio >= STRONG {
                -2.0
            } else {
                -5.0
            }
        }
    }
}

/// New margin percentage, clamped to `[MARGIN_MIN, MARGIN_MAX]`.
#[must_use]
pub fn adjust_margin(signal: PerformanceSignal, current: f64, goal: MarginGoal) -> f64 {
    let delta = match signal {
        PerformanceSignal::Missing => 0.0,
        PerformanceSignal::Measured(ratio) => margin_delta(ratio, goal),
    };
    (current + delta).clamp(MARGIN_MIN, MARGIN_MAX)
}
