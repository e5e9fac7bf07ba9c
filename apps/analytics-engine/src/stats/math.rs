//! Core statistical helpers.
//!
//! Every function accepts an empty slice and returns `0.0` rather than NaN.
//! Inputs are never reordered; helpers that need ordering sort a copy.

use super::constants::{EPSILON, HUNDRED};

/// Arithmetic mean.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (mean of squared deviations).
#[must_use]
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
#[must_use]
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Coefficient of variation (`std_dev / mean`). Zero when the mean is not positive.
#[must_use]
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let avg = mean(values);
    if avg <= EPSILON {
        return 0.0;
    }
    std_dev(values) / avg
}

/// Percent change from the first to the last value.
///
/// Zero for fewer than two values or when the first value is zero.
#[must_use]
pub fn trend(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let first = values[0];
    let last = values[values.len() - 1];
    if first == 0.0 {
        return 0.0;
    }
    let change = (last - first) / first * HUNDRED;
    if change.is_finite() { change } else { 0.0 }
}

/// Ascending sorted copy.
#[must_use]
pub fn sorted_ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Descending sorted copy.
#[must_use]
pub fn sorted_descending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted
}

/// Median (mean of the two middle values for even lengths).
#[must_use]
pub fn median(values: &[f64]) -> f64 {
    let sorted = sorted_ascending(values);
    median_of_sorted(&sorted)
}

/// Median of an already ascending slice.
#[must_use]
pub fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Nearest-rank percentile of an ascending slice: `sorted[floor(n * q)]`,
/// clamped to the last element.
#[must_use]
pub fn percentile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    let idx = (n as f64 * q.clamp(0.0, 1.0)).floor() as usize;
    sorted[idx.min(n - 1)]
}

/// Percentile rank of `x` within `values` (0-100).
///
/// Uses the mid-rank convention: values below count fully, ties count half.
#[must_use]
pub fn percentile_rank(values: &[f64], x: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let below = values.iter().filter(|v| **v < x).count() as f64;
    let equal = values.iter().filter(|v| **v == x).count() as f64;
    (below + 0.5 * equal) / values.len() as f64 * HUNDRED
}

/// Ratio guarded against a zero denominator.
#[must_use]
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() <= EPSILON {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() { ratio } else { 0.0 }
}
