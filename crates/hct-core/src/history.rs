// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — Result History (Store Interface + Trend Analysis)
// ─────────────────────────────────────────────────────────────────────
//! Append-only storage for computed results, plus the trend and
//! volatility queries that run over it.
//!
//! `InMemoryHistory` grows without bound. Long-running deployments should
//! plug in `RingHistory` or an external store via the `HistoryStore` trait.

use std::collections::VecDeque;

use hct_types::HctResult;

use crate::stats::mean_and_std;

/// Default number of entries used by trend/volatility queries.
pub const DEFAULT_WINDOW: usize = 10;

/// Trait for result history backends.
pub trait HistoryStore: Send {
    /// Append one result. Entries are never edited afterwards.
    fn append(&mut self, result: HctResult);

    /// Up to the last `n` entries, oldest first.
    fn window(&self, n: usize) -> Vec<&HctResult>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn latest(&self) -> Option<&HctResult> {
        self.window(1).pop()
    }
}

/// Unbounded in-process history.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    entries: Vec<HctResult>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistory {
    fn append(&mut self, result: HctResult) {
        self.entries.push(result);
    }

    fn window(&self, n: usize) -> Vec<&HctResult> {
        let start = self.entries.len().saturating_sub(n);
        self.entries[start..].iter().collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn latest(&self) -> Option<&HctResult> {
        self.entries.last()
    }
}

/// Bounded history that evicts the oldest entry once `capacity` is reached.
#[derive(Debug)]
pub struct RingHistory {
    capacity: usize,
    entries: VecDeque<HctResult>,
}

impl RingHistory {
    /// `capacity` is raised to at least 2 so trend queries stay meaningful.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl HistoryStore for RingHistory {
    fn append(&mut self, result: HctResult) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(result);
    }

    fn window(&self, n: usize) -> Vec<&HctResult> {
        let start = self.entries.len().saturating_sub(n);
        self.entries.range(start..).collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn latest(&self) -> Option<&HctResult> {
        self.entries.back()
    }
}

/// Least-squares slope of `values` against their index.
///
/// `None` for fewer than 2 points. Positive = improving.
pub fn trend(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let x_mean = (nf - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / nf;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }
    Some(num / den)
}

/// Coefficient of variation (population std / mean).
///
/// `None` for fewer than 2 points, +inf when the mean is exactly 0.
pub fn volatility(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let (mean, std) = mean_and_std(values);
    if mean == 0.0 {
        return Some(f64::INFINITY);
    }
    Some(std / mean)
}
