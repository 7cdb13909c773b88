// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — Policy Layer (Modes, Circuit Breaker, Multipliers)
// ─────────────────────────────────────────────────────────────────────
//! Maps the latest HCT result onto operating decisions.
//!
//! The mode is re-derived from thresholds on every observation; there is
//! no transition table and no hysteresis, so a score hovering on a
//! boundary will flip modes cycle to cycle. The only state carried across
//! calls is the previous mode, used to detect a mode change.
//!
//! Every multiplier is a pure function of the latest result and the
//! policy. With no result observed yet they return neutral values
//! (1.0, the unchanged base, or no halt) instead of failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hct_core::HctEngine;
use hct_types::{
    clamp_score, Component, HctPolicy, HctResult, KernelResult, RawMetrics, SystemMode,
};

/// Trigger recorded on every threshold-driven mode change.
pub const TRIGGER_HCT_THRESHOLD: &str = "hct_threshold";

/// A transition between operating modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeChange {
    pub timestamp: DateTime<Utc>,
    pub old_mode: SystemMode,
    pub new_mode: SystemMode,
    pub hct: f64,
    pub trigger: String,
}

/// A component scoring under the breach threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breach {
    pub component: Component,
    pub value: f64,
    pub remediation: String,
}

impl Breach {
    /// Every component of `result` strictly below `threshold`, in
    /// canonical order.
    pub fn detect(result: &HctResult, threshold: f64) -> Vec<Breach> {
        result
            .components_below(threshold)
            .into_iter()
            .map(|(component, value)| Breach {
                component,
                value,
                remediation: component.remediation().to_string(),
            })
            .collect()
    }
}

/// What one observation changed.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyUpdate {
    pub mode: SystemMode,
    pub mode_change: Option<ModeChange>,
    pub breaches: Vec<Breach>,
    /// Halt reason, set only on the observation that trips the breaker.
    pub halt_tripped: Option<String>,
}

/// Stateful wrapper over the latest result and the active policy.
pub struct PolicyLayer {
    policy: HctPolicy,
    current: Option<HctResult>,
    current_mode: SystemMode,
    mode_changes: Vec<ModeChange>,
    halted: bool,
}

impl PolicyLayer {
    /// Rejects policies whose thresholds are not strictly increasing.
    pub fn new(policy: HctPolicy) -> KernelResult<Self> {
        policy.validate()?;
        Ok(Self {
            policy,
            current: None,
            current_mode: SystemMode::Normal,
            mode_changes: Vec::new(),
            halted: false,
        })
    }

    pub fn policy(&self) -> &HctPolicy {
        &self.policy
    }

    /// Replace the policy as a whole. The stored mode is left as is and
    /// re-derived on the next observation.
    pub fn set_policy(&mut self, policy: HctPolicy) -> KernelResult<()> {
        policy.validate()?;
        self.policy = policy;
        Ok(())
    }

    pub fn current(&self) -> Option<&HctResult> {
        self.current.as_ref()
    }

    pub fn mode(&self) -> SystemMode {
        self.current_mode
    }

    /// Every mode change seen so far, oldest first.
    pub fn mode_changes(&self) -> &[ModeChange] {
        &self.mode_changes
    }

    /// Compute HCT with `engine` and observe the result.
    ///
    /// Validation errors propagate and leave this layer untouched.
    pub fn evaluate(
        &mut self,
        engine: &HctEngine,
        metrics: &RawMetrics,
    ) -> KernelResult<PolicyUpdate> {
        let result = engine.compute(metrics)?;
        Ok(self.observe(result))
    }

    /// Record `result` as current and re-derive mode and breaches.
    pub fn observe(&mut self, result: HctResult) -> PolicyUpdate {
        let hct = result.hct;
        let new_mode = self.policy.get_mode(hct);

        let mode_change = (new_mode != self.current_mode).then(|| {
            let change = ModeChange {
                timestamp: Utc::now(),
                old_mode: self.current_mode,
                new_mode,
                hct,
                trigger: TRIGGER_HCT_THRESHOLD.to_string(),
            };
            if new_mode == SystemMode::Emergency {
                log::error!(
                    "MODE CHANGE: {} -> {} (HCT={hct:.4}). Action: {}",
                    change.old_mode,
                    new_mode,
                    new_mode.action()
                );
            } else {
                log::warn!(
                    "MODE CHANGE: {} -> {} (HCT={hct:.4}). Action: {}",
                    change.old_mode,
                    new_mode,
                    new_mode.action()
                );
            }
            self.mode_changes.push(change.clone());
            self.current_mode = new_mode;
            change
        });

        let breaches = Breach::detect(&result, self.policy.component_breach_threshold);

        if !breaches.is_empty() {
            let (weakest, value) = result.weakest_component();
            log::warn!(
                "COMPONENT BREACH: {} (threshold {:.2}). Weakest: {weakest}={value:.4}. \
                 Recommendation: {}",
                format_breaches(&breaches),
                self.policy.component_breach_threshold,
                weakest.remediation()
            );
        }

        self.current = Some(result);

        let (halt, reason) = self.should_halt();
        let halt_tripped = if halt && !self.halted { reason } else { None };
        if let Some(reason) = &halt_tripped {
            log::error!(">>> HCT CIRCUIT BREAKER: {reason} <<<");
        } else if !halt && self.halted {
            log::info!("HCT circuit breaker cleared (HCT={hct:.4})");
        }
        self.halted = halt;

        PolicyUpdate {
            mode: new_mode,
            mode_change,
            breaches,
            halt_tripped,
        }
    }

    fn hct(&self) -> Option<f64> {
        self.current.as_ref().map(|r| r.hct)
    }

    // ── Consensus ───────────────────────────────────────────────────

    /// Voting weight: 0 below `min_consensus_hct`, otherwise
    /// `base * (1 + (hct - 0.5) * consensus_weight_coef)`, floored at 0.
    pub fn consensus_weight(&self, base: f64) -> f64 {
        let Some(hct) = self.hct() else {
            return base;
        };
        if hct < self.policy.min_consensus_hct {
            return 0.0;
        }
        (base * (1.0 + (hct - 0.5) * self.policy.consensus_weight_coef)).max(0.0)
    }

    // ── Staking ─────────────────────────────────────────────────────

    /// Reward multiplier. Below `min_staking_hct` a linear penalty of up to
    /// 50%; above it a linear bonus reaching `1 + staking_bonus_coef` at 1.0.
    pub fn staking_multiplier(&self) -> f64 {
        let Some(hct) = self.hct() else {
            return 1.0;
        };
        let pivot = self.policy.min_staking_hct;
        if hct < pivot {
            let penalty = (pivot - hct) / pivot;
            return 1.0 - penalty * 0.5;
        }
        let bonus = (hct - pivot) / (1.0 - pivot);
        1.0 + bonus * self.policy.staking_bonus_coef
    }

    // ── Threat response ─────────────────────────────────────────────

    /// Scale a [0, 100] threat score: low HCT amplifies, high HCT dampens.
    pub fn adjust_threat_severity(&self, base: f64) -> f64 {
        let Some(hct) = self.hct() else {
            return base;
        };
        let adjustment = 1.0 + (0.5 - hct) * self.policy.threat_sensitivity;
        clamp_score(base * adjustment, 0.0, 100.0)
    }

    /// Immune cell spawn multiplier.
    ///
    /// Two segments meeting at HCT = 0.5: 2.0 → 1.0 over [0, 0.5), then
    /// 1.0 → 0.7 over [0.5, 1.0]. The slopes differ on purpose; keep them.
    pub fn immune_response_multiplier(&self) -> f64 {
        let Some(hct) = self.hct() else {
            return 1.0;
        };
        if hct < 0.5 {
            2.0 - hct * 2.0
        } else {
            1.0 - (hct - 0.5) * 0.6
        }
    }

    // ── Circuit breaker ─────────────────────────────────────────────

    /// `(true, reason)` in EMERGENCY mode or when the weakest component is
    /// under `halt_component_floor`; `(false, None)` otherwise.
    ///
    /// Side-effect free. The breaker is logged once, by `observe`, when it
    /// trips.
    pub fn should_halt(&self) -> (bool, Option<String>) {
        let Some(result) = self.current.as_ref() else {
            return (false, None);
        };

        if self.current_mode == SystemMode::Emergency {
            return (true, Some(format!("Emergency mode (HCT={:.4})", result.hct)));
        }

        let (weakest, value) = result.weakest_component();
        if value < self.policy.halt_component_floor {
            return (true, Some(format!("Critical {weakest} failure ({value:.4})")));
        }

        (false, None)
    }
}

fn format_breaches(breaches: &[Breach]) -> String {
    breaches
        .iter()
        .map(|b| format!("{}={:.3}", b.component, b.value))
        .collect::<Vec<_>>()
        .join(", ")
}
