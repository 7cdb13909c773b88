// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — Composite Scoring Engine
// ─────────────────────────────────────────────────────────────────────
//! Nested geometric-mean scorer.
//!
//! ```text
//! X      = geomean(x1, x2, x3, x4)           for X in B, H, G, R, E
//! HCT    = geomean(B^α, H^β, G^γ, R^δ, E^ε)
//! ```
//!
//! Both means run in log space and short-circuit to 0 on any zero input,
//! so one failed sub-metric zeroes its component and the final score.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};

use hct_types::{
    Coefficients, Component, ComponentScores, HctResult, KernelResult, RawMetrics,
    ValidatedMetrics, WeightedComponents,
};

use crate::archive;
use crate::history::{self, HistoryStore, InMemoryHistory};

/// Geometric mean computed as `exp(mean(ln(v)))`.
///
/// Any value ≤ 0 short-circuits to 0 (never takes `ln(0)`). Empty input is 0.
pub fn geometric_mean(values: &[f64]) -> f64 {
    if values.is_empty() || values.iter().any(|v| *v <= 0.0) {
        return 0.0;
    }
    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    (log_sum / values.len() as f64).exp()
}

/// Score validated metrics under `coefficients`. Pure; touches no history.
///
/// Returns `(components, weighted, hct)`.
pub fn score(
    metrics: &ValidatedMetrics,
    coefficients: &Coefficients,
) -> (ComponentScores, WeightedComponents, f64) {
    let mut components = [0.0; 5];
    let mut weighted = [0.0; 5];

    for component in Component::ALL {
        let values = metrics.component(component).map(|m| m.get());
        let x = geometric_mean(&values);
        components[component.index()] = x;
        weighted[component.index()] = x.powf(coefficients.weight(component));
    }

    let hct = geometric_mean(&weighted);
    (
        ComponentScores::from_array(components),
        WeightedComponents::from_array(weighted),
        hct,
    )
}

/// HCT computation engine.
///
/// Thread-safe: coefficients sit behind a `parking_lot::RwLock` and history
/// appends are serialized by a `parking_lot::Mutex`.
pub struct HctEngine {
    coefficients: RwLock<Coefficients>,
    history: Mutex<Box<dyn HistoryStore>>,
}

impl Default for HctEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HctEngine {
    /// Default (unit) coefficients and unbounded in-memory history.
    pub fn new() -> Self {
        Self {
            coefficients: RwLock::new(Coefficients::default()),
            history: Mutex::new(Box::new(InMemoryHistory::new())),
        }
    }

    /// Start from `coefficients`, used as given (no normalization).
    pub fn with_coefficients(coefficients: Coefficients) -> KernelResult<Self> {
        coefficients.validate()?;
        Ok(Self {
            coefficients: RwLock::new(coefficients),
            history: Mutex::new(Box::new(InMemoryHistory::new())),
        })
    }

    /// Swap the history backend. Intended for construction time.
    pub fn with_history(self, store: impl HistoryStore + 'static) -> Self {
        Self {
            coefficients: self.coefficients,
            history: Mutex::new(Box::new(store)),
        }
    }

    /// Compute HCT from raw metrics and append the result to history.
    ///
    /// Fails with `HctError::Validation` listing every out-of-range metric;
    /// on failure nothing is recorded.
    pub fn compute(&self, metrics: &RawMetrics) -> KernelResult<HctResult> {
        let start = Instant::now();

        let validated = match metrics.validated() {
            Ok(v) => v,
            Err(e) => {
                log::error!("HCT compute rejected: {e}");
                return Err(e);
            }
        };

        let coefficients = self.coefficients.read().clone();
        let (components, weighted_components, hct) = score(&validated, &coefficients);

        let result = HctResult {
            components,
            weighted_components,
            hct,
            timestamp: Utc::now(),
            computation_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            coefficients,
            raw_metrics: metrics.clone(),
        };

        log::debug!(
            "HCT={hct:.4} (B={:.4} H={:.4} G={:.4} R={:.4} E={:.4})",
            components.b,
            components.h,
            components.g,
            components.r,
            components.e
        );

        self.history.lock().append(result.clone());
        Ok(result)
    }

    /// Snapshot of the active coefficients.
    pub fn coefficients(&self) -> Coefficients {
        self.coefficients.read().clone()
    }

    /// Governance mutation point: replace the coefficient set.
    ///
    /// With `normalize`, weights are rescaled to sum to 5.0 first. Invalid
    /// weights leave the current set untouched.
    pub fn update_coefficients(&self, new: Coefficients, normalize: bool) -> KernelResult<()> {
        let next = if normalize {
            new.normalize()?
        } else {
            new.validate()?;
            new
        };
        log::info!(
            "HCT coefficients updated by {}: α={:.4} β={:.4} γ={:.4} δ={:.4} ε={:.4}",
            next.updated_by,
            next.alpha,
            next.beta,
            next.gamma,
            next.delta,
            next.epsilon
        );
        *self.coefficients.write() = next;
        Ok(())
    }

    /// Regression slope of HCT over the last `window` results.
    pub fn get_trend(&self, window: usize) -> Option<f64> {
        history::trend(&self.recent_hct(window))
    }

    /// Coefficient of variation of HCT over the last `window` results.
    pub fn get_volatility(&self, window: usize) -> Option<f64> {
        history::volatility(&self.recent_hct(window))
    }

    fn recent_hct(&self, window: usize) -> Vec<f64> {
        self.history.lock().window(window).iter().map(|r| r.hct).collect()
    }

    pub fn latest(&self) -> Option<HctResult> {
        self.history.lock().latest().cloned()
    }

    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }

    /// Clone of the full history, oldest first.
    pub fn history(&self) -> Vec<HctResult> {
        let history = self.history.lock();
        history.window(history.len()).into_iter().cloned().collect()
    }

    /// Write coefficients and the full result history as pretty JSON.
    pub fn export_history(&self, path: impl AsRef<Path>) -> KernelResult<()> {
        let coefficients = self.coefficients();
        let history = self.history();
        archive::write(path.as_ref(), &coefficients, &history)?;
        log::info!(
            "Exported {} HCT results to {}",
            history.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Restore coefficients from an export. History is never restored.
    pub fn import_history(&self, path: impl AsRef<Path>) -> KernelResult<()> {
        let coefficients = archive::read_coefficients(path.as_ref())?;
        coefficients.validate()?;
        log::info!(
            "Imported HCT coefficients from {} (history not restored)",
            path.as_ref().display()
        );
        *self.coefficients.write() = coefficients;
        Ok(())
    }
}
