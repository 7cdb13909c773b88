// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — Operational Policy Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{HctError, KernelResult};
use crate::mode::SystemMode;

/// HCT-based operational policy.
///
/// Thresholds are checked lowest first; a policy is only usable once
/// [`HctPolicy::validate`] has accepted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HctPolicy {
    /// HCT below this: EMERGENCY. Default: 0.3.
    pub emergency_threshold: f64,

    /// HCT below this: CRITICAL. Default: 0.5.
    pub critical_threshold: f64,

    /// HCT below this: DEGRADED. Default: 0.7.
    pub degraded_threshold: f64,

    /// Minimum HCT to take part in consensus at all.
    /// Default: 0.5.
    pub min_consensus_hct: f64,

    /// Slope of consensus weight around HCT = 0.5.
    /// Default: 2.0.
    pub consensus_weight_coef: f64,

    /// HCT at which staking rewards are neither penalized nor boosted.
    /// Default: 0.4.
    pub min_staking_hct: f64,

    /// Extra reward fraction granted at HCT = 1.0.
    /// Default: 1.5.
    pub staking_bonus_coef: f64,

    /// How strongly HCT amplifies or dampens threat scores.
    /// Default: 1.2.
    pub threat_sensitivity: f64,

    /// Any component below this is reported as a breach.
    /// Default: 0.3.
    pub component_breach_threshold: f64,

    /// Weakest component below this trips the circuit breaker.
    /// Default: 0.2.
    pub halt_component_floor: f64,
}

impl Default for HctPolicy {
    fn default() -> Self {
        Self {
            emergency_threshold: 0.3,
            critical_threshold: 0.5,
            degraded_threshold: 0.7,
            min_consensus_hct: 0.5,
            consensus_weight_coef: 2.0,
            min_staking_hct: 0.4,
            staking_bonus_coef: 1.5,
            threat_sensitivity: 1.2,
            component_breach_threshold: 0.3,
            halt_component_floor: 0.2,
        }
    }
}

impl HctPolicy {
    /// Validate configuration parameters.
    pub fn validate(&self) -> KernelResult<()> {
        for (name, value) in [
            ("emergency_threshold", self.emergency_threshold),
            ("critical_threshold", self.critical_threshold),
            ("degraded_threshold", self.degraded_threshold),
            ("min_consensus_hct", self.min_consensus_hct),
            ("component_breach_threshold", self.component_breach_threshold),
            ("halt_component_floor", self.halt_component_floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(HctError::Config(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        if !(self.emergency_threshold < self.critical_threshold
            && self.critical_threshold < self.degraded_threshold)
        {
            return Err(HctError::Config(format!(
                "thresholds must be strictly increasing (emergency < critical < degraded), \
                 got {} / {} / {}",
                self.emergency_threshold, self.critical_threshold, self.degraded_threshold
            )));
        }
        // Staking interpolates on both sides of the pivot.
        if !(self.min_staking_hct > 0.0 && self.min_staking_hct < 1.0) {
            return Err(HctError::Config(format!(
                "min_staking_hct must be in (0, 1), got {}",
                self.min_staking_hct
            )));
        }
        for (name, value) in [
            ("consensus_weight_coef", self.consensus_weight_coef),
            ("staking_bonus_coef", self.staking_bonus_coef),
            ("threat_sensitivity", self.threat_sensitivity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(HctError::Config(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> KernelResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| HctError::Config(format!("JSON parse error: {e}")))
    }

    /// Classify `hct`. The lowest threshold that `hct` falls under wins.
    pub fn get_mode(&self, hct: f64) -> SystemMode {
        if hct < self.emergency_threshold {
            SystemMode::Emergency
        } else if hct < self.critical_threshold {
            SystemMode::Critical
        } else if hct < self.degraded_threshold {
            SystemMode::Degraded
        } else {
            SystemMode::Normal
        }
    }
}
