//! Inequality and concentration measures.
//!
//! Negative values are floored at zero before any share is computed so
//! that shares stay monotone as the percentile threshold widens.

use super::constants::{
    CONCENTRATION_FRACTIONS, EPSILON, HUNDRED, PARETO_FRACTION, TOP_DECILE_FRACTION,
    TOP_PERCENTILE_FRACTION,
};
use super::math::{safe_ratio, sorted_ascending, sorted_descending};
use super::types::{ConcentrationBand, InequalityMetrics, ParetoPoint};

/// Gini values this close to zero are reported as exactly zero.
const GINI_SNAP: f64 = 1e-9;

fn non_negative(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.max(0.0)).collect()
}

/// Gini coefficient in `[0, 1]`.
///
/// `G = 2 * sum(i * x_i) / (n * sum(x)) - (n + 1) / n` over an ascending copy
/// with 1-based ranks.
#[must_use]
pub fn gini(values: &[f64]) -> f64 {
    let sorted = sorted_ascending(&non_negative(values));
    let n = sorted.len();
    let total: f64 = sorted.iter().sum();
    if n == 0 || total <= EPSILON {
        return 0.0;
    }

    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, v)| (i + 1) as f64 * v)
        .sum();
    let n_f = n as f64;
    let g = 2.0 * weighted / (n_f * total) - (n_f + 1.0) / n_f;

    if g.abs() < GINI_SNAP {
        0.0
    } else {
        g.clamp(0.0, 1.0)
    }
}

/// Share of total value held by the top `fraction` of the population.
///
/// Takes the descending prefix of length `round(n * fraction)`.
#[must_use]
pub fn top_share(values: &[f64], fraction: f64) -> f64 {
    let sorted = sorted_descending(&non_negative(values));
    let n = sorted.len();
    let total: f64 = sorted.iter().sum();
    if n == 0 || total <= EPSILON {
        return 0.0;
    }

    let take = ((n as f64 * fraction.clamp(0.0, 1.0)).round() as usize).min(n);
    let top: f64 = sorted.iter().take(take).sum();
    safe_ratio(top, total).clamp(0.0, 1.0)
}

/// Gini plus the standard top-slice shares.
#[must_use]
pub fn inequality_metrics(values: &[f64]) -> InequalityMetrics {
    InequalityMetrics {
        gini: gini(values),
        pareto_ratio: top_share(values, PARETO_FRACTION),
        top10_share: top_share(values, TOP_DECILE_FRACTION),
        top1_share: top_share(values, TOP_PERCENTILE_FRACTION),
    }
}

/// Top 1/5/10/20% value shares as percentages.
#[must_use]
pub fn concentration_bands(values: &[f64]) -> Vec<ConcentrationBand> {
    CONCENTRATION_FRACTIONS
        .iter()
        .map(|&fraction| ConcentrationBand {
            fraction,
            label: format!("Top {}%", (fraction * HUNDRED).round()),
            share_pct: top_share(values, fraction) * HUNDRED,
        })
        .collect()
}

/// Cumulative value share by descending rank.
#[must_use]
pub fn pareto_curve(values: &[f64]) -> Vec<ParetoPoint> {
    let sorted = sorted_descending(&non_negative(values));
    let n = sorted.len() as f64;
    let total: f64 = sorted.iter().sum();

    let mut cumulative = 0.0;
    sorted
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            cumulative += value;
            ParetoPoint {
                population_pct: (i + 1) as f64 / n * HUNDRED,
                value,
                share_pct: safe_ratio(value, total) * HUNDRED,
                cumulative_pct: safe_ratio(cumulative, total) * HUNDRED,
            }
        })
        .collect()
}
