// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single sub-metric that fell outside [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub name: &'static str,
    pub value: f64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:.4} (out of range [0, 1])", self.name, self.value)
    }
}

/// Root error type for all HCT kernel failures.
#[derive(Error, Debug)]
pub enum HctError {
    /// One or more metrics outside [0, 1]. Always lists every offender.
    #[error("invalid metrics: {}", format_violations(.violations))]
    Validation { violations: Vec<Violation> },

    /// Policy thresholds, coefficients or config JSON rejected.
    #[error("config error: {0}")]
    Config(String),

    /// History export/import could not touch the filesystem.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// History export/import could not encode or decode JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HctError {
    /// Violations carried by a validation failure, empty otherwise.
    pub fn violations(&self) -> &[Violation] {
        match self {
            HctError::Validation { violations } => violations,
            _ => &[],
        }
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type KernelResult<T> = Result<T, HctError>;
