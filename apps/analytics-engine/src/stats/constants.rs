//! Constants shared by the statistics helpers.

/// Percentage scale.
pub const HUNDRED: f64 = 100.0;

/// Population share counted as the Pareto "top 20%".
pub const PARETO_FRACTION: f64 = 0.20;

/// Population share for the top-decile share.
pub const TOP_DECILE_FRACTION: f64 = 0.10;

/// Population share for the top-percentile share.
pub const TOP_PERCENTILE_FRACTION: f64 = 0.01;

/// Concentration bands reported on the revenue page (top 1/5/10/20%).
pub const CONCENTRATION_FRACTIONS: [f64; 4] = [0.01, 0.05, 0.10, 0.20];

/// Tolerance for treating a denominator as zero.
pub const EPSILON: f64 = 1e-12;
