// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — Policy Layer
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Turns HCT scores into operating decisions.
//!
//! - Operating mode from fixed thresholds (EMERGENCY < CRITICAL < DEGRADED)
//! - Component breach detection with remediation hints
//! - Consensus, staking, threat and immune multipliers
//! - Circuit breaker (`should_halt`)
//! - Dashboard health report

pub mod layer;
pub mod report;

pub use hct_types::{HctPolicy, SystemMode};
pub use layer::{Breach, ModeChange, PolicyLayer, PolicyUpdate, TRIGGER_HCT_THRESHOLD};
pub use report::{HealthReport, OperationalStatus, WeakestComponent};
