// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Composite health scoring: 20 sub-metrics, 5 weighted components,
//! one HCT score in [0, 1].
//!
//! `compute()` sits on decision hot paths (validator admission, halt
//! checks) and must stay well under 10ms.
//!
//! # Invariants
//!
//! 1. **Strict inputs**: any metric outside [0, 1] (or NaN) fails the
//!    whole computation. No partial result is produced and history is
//!    untouched.
//!
//! 2. **Zero propagation**: a zero sub-metric zeroes its component, and a
//!    zero component zeroes HCT. Means are taken in log space and never
//!    evaluate `ln(0)`.
//!
//! 3. **Weights invisible under perfection**: coefficients are exponents
//!    normalized to sum 5.0, so all-1.0 components always give HCT = 1.0.
//!
//! 4. **Append-only history**: results are immutable once recorded.
//!    Import restores coefficients only.

mod archive;
pub mod engine;
pub mod history;
pub mod stats;

pub use engine::{geometric_mean, score, HctEngine};
pub use history::{HistoryStore, InMemoryHistory, RingHistory, DEFAULT_WINDOW};
