//! Property tests for mode classification: for any valid threshold
//! ordering, a higher HCT never lands in a more severe mode.

use hct_types::{HctPolicy, SystemMode};
use proptest::prelude::*;

/// Strictly increasing (emergency, critical, degraded) in [0, 1].
fn arb_thresholds() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(0.0f64..=1.0).prop_filter_map("thresholds must differ", |mut t| {
        t.sort_by(f64::total_cmp);
        (t[0] < t[1] && t[1] < t[2]).then_some(t)
    })
}

fn policy_with(t: [f64; 3]) -> HctPolicy {
    HctPolicy {
        emergency_threshold: t[0],
        critical_threshold: t[1],
        degraded_threshold: t[2],
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn severity_never_increases_with_hct(t in arb_thresholds()) {
        let policy = policy_with(t);
        prop_assert!(policy.validate().is_ok());

        // Even grid plus each threshold and its lower neighbour.
        let mut sweep: Vec<f64> = (0..=1000).map(|i| i as f64 / 1000.0).collect();
        for x in t {
            sweep.push(x);
            sweep.push(f64::max(x - f64::EPSILON, 0.0));
        }
        sweep.sort_by(f64::total_cmp);

        let mut prev = policy.get_mode(sweep[0]);
        for hct in sweep {
            let mode = policy.get_mode(hct);
            prop_assert!(
                mode.severity() <= prev.severity(),
                "hct={} gave {} after {}", hct, mode, prev
            );
            prev = mode;
        }
        prop_assert_eq!(policy.get_mode(1.0), SystemMode::Normal);
    }

    #[test]
    fn thresholds_are_mode_boundaries(t in arb_thresholds()) {
        let policy = policy_with(t);
        prop_assert_eq!(policy.get_mode(t[0]), SystemMode::Critical);
        prop_assert_eq!(policy.get_mode(t[1]), SystemMode::Degraded);
        prop_assert_eq!(policy.get_mode(t[2]), SystemMode::Normal);
        if t[0] > 0.0 {
            prop_assert_eq!(policy.get_mode(0.0), SystemMode::Emergency);
        }
    }
}
