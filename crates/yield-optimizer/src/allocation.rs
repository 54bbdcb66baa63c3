//! Allocation weights.
//!
//! A line's weight is the product of three factors:
//! - performance, squared so out-performers pull ahead super-linearly, with a
//!   floor of 0.1 on the ratio so a poor but measured line still gets a little;
//! - ceiling alignment (1 outside ceiling mode);
//! - a margin factor favouring lines already moving in the goal's direction.
//!
//! Lines without a KPI signal weigh nothing here; the reallocator treats them
//! separately.

use yield_core::enums::MarginGoal;

use crate::performance::PerformanceSignal;

const RATIO_FLOOR: f64 = 0.1;

#[must_use]
pub fn performance_score(signal: PerformanceSignal) -> f64 {
    match signal {
        PerformanceSignal::Missing => 0.0,
        PerformanceSignal::Measured(ratio) => ratio.max(RATIO_FLOOR).powi(2),
    }
}

#[must_use]
pub fn margin_factor(new_margin: f64, goal: MarginGoal) -> f64 {
    match goal {
        MarginGoal::Increase => 1.0 + new_margin / 100.0,
        MarginGoal::Decrease => 1.0 + (100.0 - new_margin) / 100.0,
    }
}

#[must_use]
pub fn allocation_score(
    signal: PerformanceSignal,
    new_margin: f64,
    cap_alignment_bonus: Option<f64>,
    goal: MarginGoal,
) -> f64 {
    if signal.is_missing() {
        return 0.0;
    }
    performance_score(signal) * cap_alignment_bonus.unwrap_or(1.0) * margin_factor(new_margin, goal)
}
