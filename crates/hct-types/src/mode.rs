// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — System Operating Mode
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating mode derived from HCT against the policy thresholds.
///
/// Declared from most to least severe, so `Ord` compares severity:
/// `Emergency < Critical < Degraded < Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemMode {
    Emergency,
    Critical,
    Degraded,
    Normal,
}

impl SystemMode {
    /// 3 for EMERGENCY down to 0 for NORMAL.
    pub fn severity(self) -> u8 {
        match self {
            SystemMode::Emergency => 3,
            SystemMode::Critical => 2,
            SystemMode::Degraded => 1,
            SystemMode::Normal => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SystemMode::Emergency => "emergency",
            SystemMode::Critical => "critical",
            SystemMode::Degraded => "degraded",
            SystemMode::Normal => "normal",
        }
    }

    /// Operator action for entering this mode.
    pub fn action(self) -> &'static str {
        match self {
            SystemMode::Normal => "All systems operational",
            SystemMode::Degraded => "Reduce non-critical operations, monitor closely",
            SystemMode::Critical => "Spawn additional immune cells, increase scanning",
            SystemMode::Emergency => "HALT new transactions, emergency recovery mode",
        }
    }
}

impl fmt::Display for SystemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}
