// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — Score Types
// ─────────────────────────────────────────────────────────────────────

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coefficients::Coefficients;
use crate::metric::{Component, RawMetrics, N_COMPONENTS};

/// Clamp a value to [lo, hi], mapping NaN to lo and Inf to nearest bound.
#[inline]
pub fn clamp_score(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_score: NaN detected, clamping to {lo:.4}");
        return lo;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { hi } else { lo };
        log::warn!("clamp_score: Inf detected, clamping to {boundary:.4}");
        return boundary;
    }
    value.clamp(lo, hi)
}

/// Per-component scores, serialized under their letter keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "H")]
    pub h: f64,
    #[serde(rename = "G")]
    pub g: f64,
    #[serde(rename = "R")]
    pub r: f64,
    #[serde(rename = "E")]
    pub e: f64,
}

impl ComponentScores {
    pub fn from_array(values: [f64; N_COMPONENTS]) -> Self {
        let [b, h, g, r, e] = values;
        Self { b, h, g, r, e }
    }

    pub fn to_array(&self) -> [f64; N_COMPONENTS] {
        [self.b, self.h, self.g, self.r, self.e]
    }

    pub fn get(&self, component: Component) -> f64 {
        self.to_array()[component.index()]
    }

    /// Lowest-scoring component. Ties go to the earlier letter in B, H, G, R, E.
    pub fn weakest(&self) -> (Component, f64) {
        Component::ALL
            .iter()
            .map(|c| (*c, self.get(*c)))
            .fold((Component::SystemHealth, f64::INFINITY), |best, cur| {
                if cur.1 < best.1 {
                    cur
                } else {
                    best
                }
            })
    }

    /// Components strictly below `threshold`, in canonical order.
    pub fn below(&self, threshold: f64) -> Vec<(Component, f64)> {
        Component::ALL
            .iter()
            .map(|c| (*c, self.get(*c)))
            .filter(|(_, v)| *v < threshold)
            .collect()
    }
}

/// Component scores after the coefficient exponent has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedComponents {
    #[serde(rename = "weighted_B")]
    pub b: f64,
    #[serde(rename = "weighted_H")]
    pub h: f64,
    #[serde(rename = "weighted_G")]
    pub g: f64,
    #[serde(rename = "weighted_R")]
    pub r: f64,
    #[serde(rename = "weighted_E")]
    pub e: f64,
}

impl WeightedComponents {
    pub fn from_array(values: [f64; N_COMPONENTS]) -> Self {
        let [b, h, g, r, e] = values;
        Self { b, h, g, r, e }
    }

    pub fn to_array(&self) -> [f64; N_COMPONENTS] {
        [self.b, self.h, self.g, self.r, self.e]
    }

    pub fn get(&self, component: Component) -> f64 {
        self.to_array()[component.index()]
    }
}

/// Complete output of one HCT computation. Immutable once created.
///
/// The raw metric snapshot stays in memory only; the serialized form is the
/// export/dashboard contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HctResult {
    pub components: ComponentScores,
    pub weighted_components: WeightedComponents,
    /// Final score in [0, 1].
    #[serde(rename = "HCT")]
    pub hct: f64,
    pub timestamp: DateTime<Utc>,
    /// Wall time spent in `compute`, diagnostic only.
    pub computation_time_ms: f64,
    pub coefficients: Coefficients,
    #[serde(skip_serializing, default)]
    pub raw_metrics: RawMetrics,
}

impl HctResult {
    pub fn weakest_component(&self) -> (Component, f64) {
        self.components.weakest()
    }

    pub fn components_below(&self, threshold: f64) -> Vec<(Component, f64)> {
        self.components.below(threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> HctResult {
        let components = ComponentScores::from_array([0.9, 0.8, 0.25, 0.95, 0.1]);
        HctResult {
            components,
            weighted_components: WeightedComponents::from_array(components.to_array()),
            hct: 0.42,
            timestamp: Utc::now(),
            computation_time_ms: 0.01,
            coefficients: Coefficients::default(),
            raw_metrics: RawMetrics::uniform(0.5),
        }
    }

    #[test]
    fn test_clamp_nan() {
        assert_eq!(clamp_score(f64::NAN, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_clamp_pos_inf() {
        assert_eq!(clamp_score(f64::INFINITY, 0.0, 100.0), 100.0);
    }

    #[test]
    fn test_clamp_neg_inf() {
        assert_eq!(clamp_score(f64::NEG_INFINITY, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_clamp_threat_range() {
        assert_eq!(clamp_score(144.0, 0.0, 100.0), 100.0);
        assert_eq!(clamp_score(-12.5, 0.0, 100.0), 0.0);
        assert_eq!(clamp_score(68.0, 0.0, 100.0), 68.0);
        assert_eq!(clamp_score(f64::NAN, 0.0, 100.0), 0.0);
        assert_eq!(clamp_score(f64::NEG_INFINITY, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_clamp_normal() {
        assert_eq!(clamp_score(0.75, 0.0, 1.0), 0.75);
        assert_eq!(clamp_score(1.5, 0.0, 1.0), 1.0);
        assert_eq!(clamp_score(-0.3, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_weakest_component() {
        let r = sample_result();
        assert_eq!(r.weakest_component(), (Component::Signal, 0.1));
    }

    #[test]
    fn test_weakest_tie_prefers_first() {
        let s = ComponentScores::from_array([0.5; 5]);
        assert_eq!(s.weakest(), (Component::SystemHealth, 0.5));
    }

    #[test]
    fn test_components_below() {
        let r = sample_result();
        let below = r.components_below(0.3);
        assert_eq!(
            below,
            vec![(Component::Infrastructure, 0.25), (Component::Signal, 0.1)]
        );
        assert!(r.components_below(0.1).is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample_result()).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "HCT",
                "coefficients",
                "components",
                "computation_time_ms",
                "timestamp",
                "weighted_components"
            ]
        );
        assert_eq!(json["components"]["G"], 0.25);
        assert_eq!(json["weighted_components"]["weighted_E"], 0.1);
        assert_eq!(json["coefficients"]["updated_by"], "system");
    }

    #[test]
    fn test_deserializes_without_raw_metrics() {
        let original = sample_result();
        let json = serde_json::to_string(&original).unwrap();
        let back: HctResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hct, original.hct);
        assert_eq!(back.components, original.components);
        assert_eq!(back.raw_metrics, RawMetrics::default());
    }
}
