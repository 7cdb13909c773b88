// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — Health Report
// ─────────────────────────────────────────────────────────────────────
//! Serializable snapshot of the policy layer for dashboards.

use chrono::{DateTime, Utc};
use serde::Serialize;

use hct_core::{HctEngine, DEFAULT_WINDOW};
use hct_types::{Component, ComponentScores, SystemMode};

use crate::layer::{Breach, PolicyLayer};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeakestComponent {
    pub name: Component,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationalStatus {
    pub consensus_weight: f64,
    pub staking_multiplier: f64,
    pub immune_response_multiplier: f64,
    pub should_halt: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub timestamp: DateTime<Utc>,
    pub hct_score: f64,
    pub system_mode: SystemMode,
    pub components: ComponentScores,
    pub weakest_component: WeakestComponent,
    pub breaches: Vec<Breach>,
    pub operational_status: OperationalStatus,
    /// Slope over the last [`DEFAULT_WINDOW`] results, if at least two.
    pub trend: Option<f64>,
    pub volatility: Option<f64>,
}

impl PolicyLayer {
    /// `None` until a result has been observed.
    ///
    /// Trend and volatility come from `engine`; everything else from the
    /// result this layer last observed. Consensus weight is reported for a
    /// base of 1.0.
    pub fn health_report(&self, engine: &HctEngine) -> Option<HealthReport> {
        let result = self.current()?;
        let (weakest, value) = result.weakest_component();
        let threshold = self.policy().component_breach_threshold;

        Some(HealthReport {
            timestamp: result.timestamp,
            hct_score: result.hct,
            system_mode: self.mode(),
            components: result.components,
            weakest_component: WeakestComponent {
                name: weakest,
                value,
            },
            breaches: Breach::detect(result, threshold),
            operational_status: OperationalStatus {
                consensus_weight: self.consensus_weight(1.0),
                staking_multiplier: self.staking_multiplier(),
                immune_response_multiplier: self.immune_response_multiplier(),
                should_halt: self.should_halt().0,
            },
            trend: engine.get_trend(DEFAULT_WINDOW),
            volatility: engine.get_volatility(DEFAULT_WINDOW),
        })
    }
}
