//! Result types for descriptive and concentration statistics.

use serde::{Deserialize, Serialize};

use crate::domain::Plan;

/// Summary statistics for a metric series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// First-to-last percent change.
    pub trend: f64,
}

/// Value concentration across the population.
///
/// All fields are ratios in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InequalityMetrics {
    /// Gini coefficient (0 = perfectly equal).
    pub gini: f64,
    /// Share of total value held by the top 20%.
    pub pareto_ratio: f64,
    /// Share of total value held by the top 10%.
    pub top10_share: f64,
    /// Share of total value held by the top 1%.
    pub top1_share: f64,
}

/// Share of value held by a top slice of the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationBand {
    /// Population fraction (e.g., 0.05 = top 5%).
    pub fraction: f64,
    /// Display label (e.g., "Top 5%").
    pub label: String,
    /// Value share as a percentage.
    pub share_pct: f64,
}

/// Point on the cumulative Pareto curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParetoPoint {
    /// Population percentile covered so far (0-100).
    pub population_pct: f64,
    /// Value of this entry.
    pub value: f64,
    /// This entry's share of total value (0-100).
    pub share_pct: f64,
    /// Cumulative share of total value (0-100).
    pub cumulative_pct: f64,
}

/// Equal-width histogram bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub start: f64,
    /// Upper edge (exclusive except for the last bin).
    pub end: f64,
    /// Observations in the bin.
    pub count: usize,
}

/// Ranked observation used for the Zipf fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZipfPoint {
    /// 1-based rank (largest value = 1).
    pub rank: usize,
    /// Observed value.
    pub value: f64,
    /// Ideal Zipf value: top value divided by rank.
    pub expected: f64,
    /// Natural log of the rank.
    pub log_rank: f64,
    /// Natural log of the value.
    pub log_value: f64,
}

/// Log-log rank/value regression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZipfFit {
    /// Fitted exponent (negated log-log slope; 1.0 is classic Zipf).
    pub exponent: f64,
    /// Coefficient of determination of the fit.
    pub r_squared: f64,
    /// Ranked points used in the fit.
    pub points: Vec<ZipfPoint>,
}

/// Revenue held by one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanShare {
    /// Plan.
    pub plan: Plan,
    /// Total CLV of customers on the plan.
    pub revenue: f64,
    /// Customers on the plan.
    pub count: usize,
    /// Share of total revenue (0-1).
    pub share: f64,
}

/// Revenue diversification across plans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntropyReport {
    /// Per-plan breakdown.
    pub shares: Vec<PlanShare>,
    /// Shannon entropy in bits.
    pub entropy: f64,
    /// Maximum entropy for the number of plans.
    pub max_entropy: f64,
    /// `entropy / max_entropy` (0-1).
    pub diversification_index: f64,
}
