//! Property tests for the scoring core: bounds, zero propagation,
//! normalization, and the "weights invisible under perfection" rule.

use hct_core::{geometric_mean, HctEngine};
use hct_types::{Coefficients, RawMetrics, METRIC_TABLE};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// 20 values in [0, 1].
fn arb_metric_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..=1.0, METRIC_TABLE.len())
}

/// One strictly positive weight, from everyday governance values out to
/// magnitudes where a naive sum overflows or a naive scale blows up.
fn arb_weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => 0.01f64..10.0,
        1 => 1e-150f64..1e150,
        1 => Just(f64::MAX),
        1 => Just(1e-310),
    ]
}

/// Five weights that normalize: same magnitude class, so every ratio to
/// the largest stays representable.
fn arb_weights() -> impl Strategy<Value = [f64; 5]> {
    prop_oneof![
        prop::array::uniform5(0.01f64..10.0),
        prop::array::uniform5(1e-150f64..1e150),
        arb_weight().prop_map(|w| [w; 5]),
    ]
}

fn metrics_from(values: &[f64]) -> RawMetrics {
    let mut m = RawMetrics::uniform(0.0);
    let fields: [&mut f64; 20] = [
        &mut m.b_entropy,
        &mut m.b_fault_tolerance,
        &mut m.b_mutation_rate,
        &mut m.b_uptime,
        &mut m.h_replay_integrity,
        &mut m.h_fork_awareness,
        &mut m.h_anomaly_learning,
        &mut m.h_auditability,
        &mut m.g_geo_diversity,
        &mut m.g_hw_heterogeneity,
        &mut m.g_dependency_concentration,
        &mut m.g_physical_decentralization,
        &mut m.r_protocol_compliance,
        &mut m.r_safety_constraints,
        &mut m.r_non_violence,
        &mut m.r_permission_boundaries,
        &mut m.e_power_efficiency,
        &mut m.e_timing_accuracy,
        &mut m.e_latency_consistency,
        &mut m.e_signal_integrity,
    ];
    for (field, value) in fields.into_iter().zip(values) {
        *field = *value;
    }
    m
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn hct_stays_in_unit_interval(values in arb_metric_values(), weights in arb_weights()) {
        let engine = HctEngine::new();
        engine.update_coefficients(Coefficients::new(weights, "prop"), true).unwrap();
        let r = engine.compute(&metrics_from(&values)).unwrap();
        prop_assert!((0.0..=1.0).contains(&r.hct), "hct={}", r.hct);
        for c in r.components.to_array() {
            prop_assert!((0.0..=1.0).contains(&c));
        }
    }

    #[test]
    fn perfection_ignores_weights(weights in arb_weights()) {
        let engine = HctEngine::new();
        engine.update_coefficients(Coefficients::new(weights, "prop"), true).unwrap();
        let r = engine.compute(&RawMetrics::uniform(1.0)).unwrap();
        prop_assert!((r.hct - 1.0).abs() < 1e-9);
    }

    #[test]
    fn any_zero_zeroes_component_and_hct(
        values in arb_metric_values(),
        idx in 0usize..20,
        weights in arb_weights(),
    ) {
        let mut values = values;
        values[idx] = 0.0;
        let engine = HctEngine::new();
        engine.update_coefficients(Coefficients::new(weights, "prop"), true).unwrap();
        let r = engine.compute(&metrics_from(&values)).unwrap();
        let component = METRIC_TABLE[idx].1;
        prop_assert_eq!(r.components.get(component), 0.0);
        prop_assert_eq!(r.hct, 0.0);
    }

    #[test]
    fn nonzero_inputs_give_nonzero_hct(values in prop::collection::vec(0.05f64..=1.0, 20)) {
        let engine = HctEngine::new();
        let r = engine.compute(&metrics_from(&values)).unwrap();
        prop_assert!(r.hct > 0.0);
    }

    #[test]
    fn normalize_sums_to_five(weights in arb_weights()) {
        let n = Coefficients::new(weights, "prop").normalize().unwrap();
        prop_assert!((n.sum() - 5.0).abs() < 1e-9, "sum={}", n.sum());
    }

    #[test]
    fn normalize_never_yields_degenerate_exponents(
        weights in prop::array::uniform5(arb_weight()),
    ) {
        // Mixed extremes may be rejected, but an accepted set is always usable.
        if let Ok(n) = Coefficients::new(weights, "prop").normalize() {
            prop_assert!((n.sum() - 5.0).abs() < 1e-9, "sum={}", n.sum());
            for w in n.weights() {
                prop_assert!(w.is_finite() && w > 0.0, "w={}", w);
            }
        }
    }

    #[test]
    fn uniform_metrics_score_their_value(v in 0.01f64..=1.0) {
        let engine = HctEngine::new();
        let r = engine.compute(&RawMetrics::uniform(v)).unwrap();
        prop_assert!((r.hct - v).abs() < 1e-9, "v={} hct={}", v, r.hct);
    }

    #[test]
    fn geometric_mean_bounded_by_min_max(values in prop::collection::vec(0.001f64..=1.0, 1..32)) {
        let g = geometric_mean(&values);
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(g >= lo - 1e-12 && g <= hi + 1e-12);
    }

    #[test]
    fn out_of_range_never_recorded(
        bad in prop_oneof![1.0001f64..10.0, -10.0f64..-0.0001],
        idx in 0usize..20,
    ) {
        let mut values = vec![0.8; 20];
        values[idx] = bad;
        let engine = HctEngine::new();
        let err = engine.compute(&metrics_from(&values)).unwrap_err();
        prop_assert_eq!(err.violations().len(), 1);
        prop_assert_eq!(err.violations()[0].name, METRIC_TABLE[idx].0);
        prop_assert_eq!(engine.history_len(), 0);
    }
}
