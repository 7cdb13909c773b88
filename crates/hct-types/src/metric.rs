// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — Metric Types
// ─────────────────────────────────────────────────────────────────────
//! Sub-metric types: the constrained [`UnitMetric`], the flat
//! [`RawMetrics`] wire record produced by collectors, and the
//! [`ValidatedMetrics`] grid the engine actually scores.
//!
//! Validation walks a static `(name, component, accessor)` table so that
//! every field is checked exactly once and reported by its wire name.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HctError, KernelResult, Violation};

/// Number of HCT components.
pub const N_COMPONENTS: usize = 5;

/// Sub-metrics per component.
pub const METRICS_PER_COMPONENT: usize = 4;

/// The five HCT components, keyed by their single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Component {
    /// System health and adaptability.
    #[serde(rename = "B")]
    SystemHealth,
    /// Auditability, memory and precedent.
    #[serde(rename = "H")]
    Auditability,
    /// Infrastructure diversity.
    #[serde(rename = "G")]
    Infrastructure,
    /// Policy compliance and safety constraints.
    #[serde(rename = "R")]
    Compliance,
    /// Signal, timing and energy quality.
    #[serde(rename = "E")]
    Signal,
}

impl Component {
    /// All components in canonical B, H, G, R, E order.
    pub const ALL: [Component; N_COMPONENTS] = [
        Component::SystemHealth,
        Component::Auditability,
        Component::Infrastructure,
        Component::Compliance,
        Component::Signal,
    ];

    pub fn letter(self) -> char {
        match self {
            Component::SystemHealth => 'B',
            Component::Auditability => 'H',
            Component::Infrastructure => 'G',
            Component::Compliance => 'R',
            Component::Signal => 'E',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Component::SystemHealth => "system health",
            Component::Auditability => "auditability",
            Component::Infrastructure => "infrastructure diversity",
            Component::Compliance => "policy compliance",
            Component::Signal => "signal/energy quality",
        }
    }

    /// Position in [`Component::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Static operator hint for a component in breach.
    pub fn remediation(self) -> &'static str {
        match self {
            Component::SystemHealth => "Spawn more immune cells, increase diversity",
            Component::Auditability => "Improve block storage, enable full replay",
            Component::Infrastructure => "Add nodes in different regions/datacenters",
            Component::Compliance => "Audit protocol compliance, tighten safety checks",
            Component::Signal => "Optimize power usage, sync clocks, reduce latency",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A value in [0, 1]. NaN and out-of-range values cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct UnitMetric(f64);

impl UnitMetric {
    pub const ZERO: UnitMetric = UnitMetric(0.0);
    pub const ONE: UnitMetric = UnitMetric(1.0);

    /// Returns `None` for NaN or anything outside [0, 1].
    pub fn new(value: f64) -> Option<Self> {
        (0.0..=1.0).contains(&value).then_some(Self(value))
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for UnitMetric {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        UnitMetric::new(value).ok_or_else(|| format!("{value} is outside [0, 1]"))
    }
}

impl From<UnitMetric> for f64 {
    fn from(metric: UnitMetric) -> f64 {
        metric.0
    }
}

/// Raw metrics for one collection cycle, as delivered by a collector.
///
/// Field names are the wire contract. Values are plain floats here; use
/// [`RawMetrics::validate`] or [`RawMetrics::validated`] before scoring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawMetrics {
    // B: system health & adaptability
    pub b_entropy: f64,
    pub b_fault_tolerance: f64,
    pub b_mutation_rate: f64,
    pub b_uptime: f64,

    // H: memory & precedent
    pub h_replay_integrity: f64,
    pub h_fork_awareness: f64,
    pub h_anomaly_learning: f64,
    pub h_auditability: f64,

    // G: infrastructure substrate
    pub g_geo_diversity: f64,
    pub g_hw_heterogeneity: f64,
    pub g_dependency_concentration: f64,
    pub g_physical_decentralization: f64,

    // R: norms & constraints
    pub r_protocol_compliance: f64,
    pub r_safety_constraints: f64,
    pub r_non_violence: f64,
    pub r_permission_boundaries: f64,

    // E: energy, time, signal
    pub e_power_efficiency: f64,
    pub e_timing_accuracy: f64,
    pub e_latency_consistency: f64,
    pub e_signal_integrity: f64,

    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

type Accessor = fn(&RawMetrics) -> f64;

/// Every sub-metric: wire name, owning component, accessor. Grouped in
/// canonical component order, four per component.
pub const METRIC_TABLE: [(&str, Component, Accessor); N_COMPONENTS * METRICS_PER_COMPONENT] = [
    ("b_entropy", Component::SystemHealth, |m| m.b_entropy),
    ("b_fault_tolerance", Component::SystemHealth, |m| m.b_fault_tolerance),
    ("b_mutation_rate", Component::SystemHealth, |m| m.b_mutation_rate),
    ("b_uptime", Component::SystemHealth, |m| m.b_uptime),
    ("h_replay_integrity", Component::Auditability, |m| m.h_replay_integrity),
    ("h_fork_awareness", Component::Auditability, |m| m.h_fork_awareness),
    ("h_anomaly_learning", Component::Auditability, |m| m.h_anomaly_learning),
    ("h_auditability", Component::Auditability, |m| m.h_auditability),
    ("g_geo_diversity", Component::Infrastructure, |m| m.g_geo_diversity),
    ("g_hw_heterogeneity", Component::Infrastructure, |m| m.g_hw_heterogeneity),
    ("g_dependency_concentration", Component::Infrastructure, |m| m.g_dependency_concentration),
    ("g_physical_decentralization", Component::Infrastructure, |m| m.g_physical_decentralization),
    ("r_protocol_compliance", Component::Compliance, |m| m.r_protocol_compliance),
    ("r_safety_constraints", Component::Compliance, |m| m.r_safety_constraints),
    ("r_non_violence", Component::Compliance, |m| m.r_non_violence),
    ("r_permission_boundaries", Component::Compliance, |m| m.r_permission_boundaries),
    ("e_power_efficiency", Component::Signal, |m| m.e_power_efficiency),
    ("e_timing_accuracy", Component::Signal, |m| m.e_timing_accuracy),
    ("e_latency_consistency", Component::Signal, |m| m.e_latency_consistency),
    ("e_signal_integrity", Component::Signal, |m| m.e_signal_integrity),
];

impl RawMetrics {
    /// Every sub-metric set to `value`, stamped now. Handy for scenarios
    /// and benchmarks.
    pub fn uniform(value: f64) -> Self {
        Self {
            b_entropy: value,
            b_fault_tolerance: value,
            b_mutation_rate: value,
            b_uptime: value,
            h_replay_integrity: value,
            h_fork_awareness: value,
            h_anomaly_learning: value,
            h_auditability: value,
            g_geo_diversity: value,
            g_hw_heterogeneity: value,
            g_dependency_concentration: value,
            g_physical_decentralization: value,
            r_protocol_compliance: value,
            r_safety_constraints: value,
            r_non_violence: value,
            r_permission_boundaries: value,
            e_power_efficiency: value,
            e_timing_accuracy: value,
            e_latency_consistency: value,
            e_signal_integrity: value,
            timestamp: Utc::now(),
        }
    }

    /// All `(name, value)` pairs outside [0, 1]. NaN counts as outside.
    pub fn validate(&self) -> Vec<Violation> {
        METRIC_TABLE
            .iter()
            .map(|(name, _, get)| (*name, get(self)))
            .filter(|(_, value)| UnitMetric::new(*value).is_none())
            .map(|(name, value)| Violation { name, value })
            .collect()
    }

    /// Validate and lift into the scoring grid. Fails with every violation.
    pub fn validated(&self) -> KernelResult<ValidatedMetrics> {
        let mut grid = [[UnitMetric::ZERO; METRICS_PER_COMPONENT]; N_COMPONENTS];
        let mut violations = Vec::new();

        for (i, (name, component, get)) in METRIC_TABLE.iter().enumerate() {
            let value = get(self);
            match UnitMetric::new(value) {
                Some(metric) => grid[component.index()][i % METRICS_PER_COMPONENT] = metric,
                None => violations.push(Violation { name: *name, value }),
            }
        }

        if !violations.is_empty() {
            return Err(HctError::Validation { violations });
        }
        Ok(ValidatedMetrics { grid })
    }

    /// Look up a sub-metric by wire name.
    pub fn get(&self, name: &str) -> Option<f64> {
        METRIC_TABLE
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, _, get)| get(self))
    }
}

/// Sub-metrics after validation: 5 components × 4 values, all in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedMetrics {
    grid: [[UnitMetric; METRICS_PER_COMPONENT]; N_COMPONENTS],
}

impl ValidatedMetrics {
    /// The four sub-metrics of `component`, in table order.
    pub fn component(&self, component: Component) -> &[UnitMetric; METRICS_PER_COMPONENT] {
        &self.grid[component.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_metric_bounds() {
        assert!(UnitMetric::new(0.0).is_some());
        assert!(UnitMetric::new(1.0).is_some());
        assert!(UnitMetric::new(-f64::EPSILON).is_none());
        assert!(UnitMetric::new(1.0 + f64::EPSILON).is_none());
        assert!(UnitMetric::new(f64::NAN).is_none());
        assert!(UnitMetric::new(f64::INFINITY).is_none());
    }

    #[test]
    fn test_unit_metric_serde_rejects_out_of_range() {
        let ok: UnitMetric = serde_json::from_str("0.25").unwrap();
        assert_eq!(ok.get(), 0.25);
        assert!(serde_json::from_str::<UnitMetric>("1.25").is_err());
    }

    #[test]
    fn test_table_is_grouped_by_component() {
        for (i, (_, component, _)) in METRIC_TABLE.iter().enumerate() {
            assert_eq!(component.index(), i / METRICS_PER_COMPONENT);
        }
    }

    #[test]
    fn test_table_names_match_wire_fields() {
        let json = serde_json::to_value(RawMetrics::uniform(0.5)).unwrap();
        let obj = json.as_object().unwrap();
        for (name, _, _) in METRIC_TABLE.iter() {
            assert!(obj.contains_key(*name), "missing field {name}");
        }
        assert_eq!(obj.len(), METRIC_TABLE.len() + 1);
    }

    #[test]
    fn test_validate_reports_all_violations() {
        let mut m = RawMetrics::uniform(0.8);
        m.b_uptime = 1.2;
        m.r_non_violence = -0.1;
        m.e_signal_integrity = f64::NAN;
        let violations = m.validate();
        let names: Vec<_> = violations.iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["b_uptime", "r_non_violence", "e_signal_integrity"]);
    }

    #[test]
    fn test_validated_fails_atomically() {
        let mut m = RawMetrics::uniform(0.8);
        m.g_geo_diversity = 2.0;
        let err = m.validated().unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].name, "g_geo_diversity");
    }

    #[test]
    fn test_validated_places_metrics_in_component_rows() {
        let mut m = RawMetrics::uniform(0.5);
        m.h_fork_awareness = 0.9;
        m.e_signal_integrity = 0.1;
        let v = m.validated().unwrap();
        assert_eq!(v.component(Component::Auditability)[1].get(), 0.9);
        assert_eq!(v.component(Component::Signal)[3].get(), 0.1);
        assert_eq!(v.component(Component::SystemHealth)[0].get(), 0.5);
    }

    #[test]
    fn test_get_by_name() {
        let mut m = RawMetrics::uniform(0.3);
        m.r_safety_constraints = 0.7;
        assert_eq!(m.get("r_safety_constraints"), Some(0.7));
        assert_eq!(m.get("nope"), None);
    }

    #[test]
    fn test_component_letters() {
        let letters: String = Component::ALL.iter().map(|c| c.letter()).collect();
        assert_eq!(letters, "BHGRE");
        assert_eq!(
            serde_json::to_string(&Component::Compliance).unwrap(),
            "\"R\""
        );
    }
}
