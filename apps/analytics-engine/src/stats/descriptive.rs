//! Summary statistics bundle.

use super::math::{mean, median_of_sorted, sorted_ascending, std_dev, trend};
use super::types::DescriptiveStats;

/// Describe a metric series. The trend follows input order.
#[must_use]
pub fn describe(values: &[f64]) -> DescriptiveStats {
    if values.is_empty() {
        return DescriptiveStats::default();
    }

    let sorted = sorted_ascending(values);

    DescriptiveStats {
        count: values.len(),
        mean: mean(values),
        median: median_of_sorted(&sorted),
        std_dev: std_dev(values),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        trend: trend(values),
    }
}
