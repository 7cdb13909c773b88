// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — Governance Coefficients
// ─────────────────────────────────────────────────────────────────────

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HctError, KernelResult};
use crate::metric::{Component, N_COMPONENTS};

/// Target sum of the five weights after normalization.
pub const COEFFICIENT_SUM: f64 = 5.0;

/// Governance-tunable per-component exponents (α, β, γ, δ, ε).
///
/// Each weight is applied as an exponent to its component score. With the
/// weights normalized to sum to 5.0, a system where every component scores
/// 1.0 still yields HCT = 1.0 whatever the distribution; the weights only
/// reshape sensitivity once components differ.
///
/// Instances are replaced, never edited in place: [`Coefficients::normalize`]
/// returns a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    /// System health (B).
    pub alpha: f64,
    /// Auditability (H).
    pub beta: f64,
    /// Infrastructure (G).
    pub gamma: f64,
    /// Compliance (R).
    pub delta: f64,
    /// Signal (E).
    pub epsilon: f64,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
    #[serde(default = "default_updated_by")]
    pub updated_by: String,
}

fn default_updated_by() -> String {
    "system".to_string()
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
            gamma: 1.0,
            delta: 1.0,
            epsilon: 1.0,
            last_updated: Utc::now(),
            updated_by: default_updated_by(),
        }
    }
}

impl Coefficients {
    /// Build a set from the five weights, attributed to `updated_by`.
    pub fn new(weights: [f64; N_COMPONENTS], updated_by: impl Into<String>) -> Self {
        let [alpha, beta, gamma, delta, epsilon] = weights;
        Self {
            alpha,
            beta,
            gamma,
            delta,
            epsilon,
            last_updated: Utc::now(),
            updated_by: updated_by.into(),
        }
    }

    /// Weights in canonical B, H, G, R, E order.
    pub fn weights(&self) -> [f64; N_COMPONENTS] {
        [self.alpha, self.beta, self.gamma, self.delta, self.epsilon]
    }

    /// Exponent applied to `component`.
    pub fn weight(&self, component: Component) -> f64 {
        self.weights()[component.index()]
    }

    pub fn sum(&self) -> f64 {
        self.weights().iter().sum()
    }

    /// Every weight must be finite and strictly positive.
    ///
    /// A zero exponent maps a zero component to 1.0 and would mask a
    /// critical failure.
    pub fn validate(&self) -> KernelResult<()> {
        for (component, w) in Component::ALL.iter().zip(self.weights()) {
            if !w.is_finite() || w <= 0.0 {
                return Err(HctError::Config(format!(
                    "coefficient for {component} must be finite and > 0, got {w}"
                )));
            }
        }
        Ok(())
    }

    /// Rescale so the five weights sum to 5.0. Stamps `last_updated`.
    ///
    /// Weights are first divided by the largest one so the sum cannot
    /// overflow (huge weights) or the scale blow up (subnormal weights).
    /// Fails if the ratio between weights is too extreme to represent.
    pub fn normalize(&self) -> KernelResult<Self> {
        self.validate()?;
        let max = self.weights().into_iter().fold(f64::MIN_POSITIVE, f64::max);
        let [alpha, beta, gamma, delta, epsilon] = self.weights().map(|w| w / max);
        let relative = Self {
            alpha,
            beta,
            gamma,
            delta,
            epsilon,
            last_updated: Utc::now(),
            updated_by: self.updated_by.clone(),
        };
        relative.validate()?;

        let scale = COEFFICIENT_SUM / relative.sum();
        let normalized = Self {
            alpha: relative.alpha * scale,
            beta: relative.beta * scale,
            gamma: relative.gamma * scale,
            delta: relative.delta * scale,
            epsilon: relative.epsilon * scale,
            ..relative
        };
        normalized.validate()?;
        if (normalized.sum() - COEFFICIENT_SUM).abs() > 1e-9 {
            return Err(HctError::Config(format!(
                "normalized coefficients sum to {}, expected {COEFFICIENT_SUM}",
                normalized.sum()
            )));
        }
        Ok(normalized)
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> KernelResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| HctError::Config(format!("JSON parse error: {e}")))
    }
}
