//! Property tests for the invariants every pass must hold.

use proptest::prelude::*;
use yield_core::entities::{LineItem, MARGIN_MAX, MARGIN_MIN, OptimizationParameters};
use yield_core::enums::{KpiType, MarginGoal};
use yield_optimizer::Optimizer;

fn arb_line(index: usize) -> impl Strategy<Value = LineItem> {
    (
        0.0f64..10_000.0,
        0.1f64..40.0,
        MARGIN_MIN..=MARGIN_MAX,
        prop_oneof![Just(0.0), 0.0f64..50.0],
    )
        .prop_map(move |(spend, cpm_revenue, margin_pct, kpi_actual)| LineItem {
            id: format!("li-{index}"),
            name: format!("Line {index}"),
            spend,
            cpm_revenue,
            margin_pct,
            kpi_actual,
        })
}

fn arb_lines() -> impl Strategy<Value = Vec<LineItem>> {
    (1usize..12).prop_flat_map(|n| (0..n).map(arb_line).collect::<Vec<_>>())
}

fn arb_kpi() -> impl Strategy<Value = KpiType> {
    prop_oneof![
        Just(KpiType::Cpa),
        Just(KpiType::Cpc),
        Just(KpiType::Cpcv),
        Just(KpiType::Ctr),
        Just(KpiType::Vcr),
    ]
}

fn arb_goal() -> impl Strategy<Value = MarginGoal> {
    prop_oneof![Just(MarginGoal::Increase), Just(MarginGoal::Decrease)]
}

fn arb_params(line_count: usize) -> impl Strategy<Value = OptimizationParameters> {
    (
        0.01f64..100.0,
        arb_kpi(),
        arb_goal(),
        proptest::option::of(0.5f64..50.0),
        proptest::collection::vec(any::<bool>(), line_count),
    )
        .prop_map(|(target, kpi, goal, ceiling, locks)| {
            let locked = locks
                .iter()
                .enumerate()
                .filter(|(_, locked)| **locked)
                .map(|(index, _)| format!("li-{index}"));
            let params = OptimizationParameters::new(target, kpi)
                .with_goal(goal)
                .with_locked(locked);
            match ceiling {
                Some(ceiling) => params.with_ceiling(ceiling),
                None => params,
            }
        })
}

fn arb_case() -> impl Strategy<Value = (Vec<LineItem>, OptimizationParameters)> {
    arb_lines().prop_flat_map(|lines| {
        let n = lines.len();
        (Just(lines), arb_params(n))
    })
}

proptest! {
    #[test]
    fn margins_stay_within_bounds((lines, params) in arb_case()) {
        let result = Optimizer::default().optimize(&lines, &params).unwrap();
        for scored in &result.scored {
            prop_assert!((MARGIN_MIN..=MARGIN_MAX).contains(&scored.new_margin));
        }
        for item in &result.line_items {
            prop_assert!((MARGIN_MIN..=MARGIN_MAX).contains(&item.margin_pct));
        }
    }

    #[test]
    fn ceiling_is_never_exceeded((lines, params) in arb_case()) {
        prop_assume!(params.respect_ceiling);
        let result = Optimizer::default().optimize(&lines, &params).unwrap();
        for scored in &result.scored {
            prop_assert!(scored.new_cpm_revenue <= params.cpm_ceiling);
            let bonus = scored.cap_alignment_bonus.unwrap();
            prop_assert!((0.5..=1.5).contains(&bonus));
        }
        for (scored, item) in result.scored.iter().zip(&result.line_items) {
            if !scored.locked {
                prop_assert!(item.cpm_revenue <= params.cpm_ceiling);
            }
        }
    }

    #[test]
    fn locked_spend_is_bit_identical((lines, params) in arb_case()) {
        let result = Optimizer::default().optimize(&lines, &params).unwrap();
        for (before, after) in lines.iter().zip(&result.line_items) {
            if params.is_locked(&before.id) {
                prop_assert_eq!(before.spend.to_bits(), after.spend.to_bits());
            }
        }
    }

    #[test]
    fn spend_is_never_negative((lines, params) in arb_case()) {
        let result = Optimizer::default().optimize(&lines, &params).unwrap();
        for item in &result.line_items {
            prop_assert!(item.spend >= 0.0);
        }
    }

    #[test]
    fn shape_is_preserved((lines, params) in arb_case()) {
        let result = Optimizer::default().optimize(&lines, &params).unwrap();
        prop_assert_eq!(result.line_items.len(), lines.len());
        for (before, after) in lines.iter().zip(&result.line_items) {
            prop_assert_eq!(&before.id, &after.id);
            prop_assert_eq!(before.kpi_actual.to_bits(), after.kpi_actual.to_bits());
        }
    }

    #[test]
    fn scored_pool_is_conserved_up_to_rounding((lines, params) in arb_case()) {
        let result = Optimizer::default().optimize(&lines, &params).unwrap();
        prop_assume!(result.totals.total_score > 0.0);

        let pooled: Vec<_> = result
            .scored
            .iter()
            .zip(&result.line_items)
            .filter(|(scored, _)| !scored.locked && !scored.signal.is_missing())
            .collect();
        let spend_before: f64 = pooled.iter().map(|(scored, _)| scored.item.spend).sum();
        let spend_after: f64 = pooled.iter().map(|(_, item)| item.spend).sum();
        let expected = 0.7 * result.totals.available_spend + 0.3 * spend_before;

        #[allow(clippy::cast_precision_loss)]
        let tolerance = 0.005 * pooled.len() as f64 + 1e-6 * expected.abs().max(1.0);
        prop_assert!(
            (spend_after - expected).abs() <= tolerance,
            "after {spend_after} expected {expected}"
        );
    }

    #[test]
    fn passes_are_deterministic((lines, params) in arb_case()) {
        let optimizer = Optimizer::default();
        let first = optimizer.optimize(&lines, &params).unwrap();
        let second = optimizer.optimize(&lines, &params).unwrap();
        prop_assert_eq!(first, second);
    }
}
