// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the HCT
//! kernel: the composite health score and the policy gate built on it.

pub mod coefficients;
pub mod config;
pub mod error;
pub mod metric;
pub mod mode;
pub mod score;

pub use coefficients::{Coefficients, COEFFICIENT_SUM};
pub use config::HctPolicy;
pub use error::{HctError, KernelResult, Violation};
pub use metric::{Component, RawMetrics, UnitMetric, ValidatedMetrics, METRIC_TABLE};
pub use mode::SystemMode;
pub use score::{clamp_score, ComponentScores, HctResult, WeightedComponents};
