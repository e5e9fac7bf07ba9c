//! Descriptive and inequality statistics.
//!
//! One shared home for the dashboard's numeric helpers:
//! - Mean, population standard deviation, median, trend, percentile rank
//! - Gini coefficient, Pareto and top-N value shares, concentration bands
//! - Shannon entropy of plan revenue
//! - Zipf exponent fit
//! - Histogram binning
//!
//! Degenerate inputs (empty slices, zero totals) resolve to `0.0` or an
//! empty vector; nothing here returns NaN or infinity.

mod constants;
mod descriptive;
mod entropy;
mod histogram;
mod inequality;
mod math;
mod types;
mod zipf;

pub use constants::{HUNDRED, PARETO_FRACTION, TOP_DECILE_FRACTION, TOP_PERCENTILE_FRACTION};
pub use descriptive::describe;
pub use entropy::{plan_entropy, shannon_entropy};
pub use histogram::histogram;
pub use inequality::{concentration_bands, gini, inequality_metrics, pareto_curve, top_share};
pub use math::{
    coefficient_of_variation, mean, median, median_of_sorted, percentile_of_sorted,
    percentile_rank, safe_ratio, sorted_ascending, sorted_descending, std_dev, trend, variance,
};
pub use types::{
    ConcentrationBand, DescriptiveStats, EntropyReport, HistogramBin, InequalityMetrics,
    ParetoPoint, PlanShare, ZipfFit, ZipfPoint,
};
pub use zipf::{DEFAULT_ZIPF_TOP_N, zipf_fit};
