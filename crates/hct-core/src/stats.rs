// ─────────────────────────────────────────────────────────────────────
// HCT Kernel — Normalization Helpers for Collectors
// ─────────────────────────────────────────────────────────────────────
//! Distribution statistics that map raw observations (cell type counts,
//! stake shares, latency samples) into [0, 1] sub-metrics.

use hct_types::clamp_score;

/// Shannon entropy of `distribution`, normalized by log2(n).
///
/// 1.0 = perfectly uniform, 0.0 = a single bucket holds everything.
/// Empty, all-zero, or single-bucket inputs score 0.
pub fn shannon_entropy(distribution: &[f64]) -> f64 {
    let total: f64 = distribution.iter().sum();
    if distribution.is_empty() || total == 0.0 {
        return 0.0;
    }
    let max_entropy = (distribution.len() as f64).log2();
    if max_entropy == 0.0 {
        return 0.0;
    }

    let entropy: f64 = distribution
        .iter()
        .map(|x| x / total)
        .filter(|p| *p > 0.0)
        .map(|p| -p * p.log2())
        .sum();

    clamp_score(entropy / max_entropy, 0.0, 1.0)
}

/// Gini coefficient: 0 = perfect equality, 1 = one holder has everything.
pub fn gini_coefficient(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let total: f64 = sorted.iter().sum();
    if total == 0.0 {
        return 0.0;
    }
    let ranked: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64 + 1.0) * v)
        .sum();

    let gini = (2.0 * ranked) / (n * total) - (n + 1.0) / n;
    clamp_score(gini, 0.0, 1.0)
}

/// Herfindahl-Hirschman index, rescaled from [1/n, 1] onto [0, 1].
///
/// Low = decentralized, high = concentrated. A single share is a monopoly.
pub fn herfindahl_index(shares: &[f64]) -> f64 {
    let total: f64 = shares.iter().sum();
    if shares.is_empty() || total == 0.0 {
        return 0.0;
    }
    if shares.len() == 1 {
        return 1.0;
    }
    let hhi: f64 = shares.iter().map(|s| (s / total).powi(2)).sum();
    let min_hhi = 1.0 / shares.len() as f64;
    clamp_score((hhi - min_hhi) / (1.0 - min_hhi), 0.0, 1.0)
}

/// Mean and population standard deviation. Callers guarantee a
/// non-empty slice.
pub(crate) fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// Population std / |mean|. Unbounded above; callers normalize.
///
/// Fewer than 2 values: 0. Zero mean: +inf if there is any spread, else 0.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let (mean, std) = mean_and_std(values);
    if mean == 0.0 {
        return if std > 0.0 { f64::INFINITY } else { 0.0 };
    }
    std / mean.abs()
}
