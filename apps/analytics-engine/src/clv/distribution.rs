//! CLV value distribution paired with the fitted Gamma curve.

use serde::{Deserialize, Serialize};

use crate::stats::histogram;

use super::gamma::GammaFit;

/// One histogram bucket with empirical and fitted densities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionBucket {
    /// Lower edge.
    pub start: f64,
    /// Upper edge.
    pub end: f64,
    /// Bucket midpoint.
    pub midpoint: f64,
    /// Customers in the bucket.
    pub count: usize,
    /// Empirical density: `count / (n * width)`.
    pub density: f64,
    /// Fitted Gamma density at the midpoint.
    pub gamma_density: f64,
}

/// Histogram of CLV values spanning the observed min..max.
#[must_use]
pub fn value_distribution(values: &[f64], buckets: usize, fit: &GammaFit) -> Vec<DistributionBucket> {
    let bins = histogram(values, buckets);
    let n: usize = bins.iter().map(|b| b.count).sum();
    if n == 0 {
        return Vec::new();
    }

    bins.into_iter()
        .map(|bin| {
            let width = bin.end - bin.start;
            let midpoint = (bin.start + bin.end) / 2.0;
            DistributionBucket {
                start: bin.start,
                end: bin.end,
                midpoint,
                count: bin.count,
                density: bin.count as f64 / (n as f64 * width),
                gamma_density: fit.pdf(midpoint),
            }
        })
        .collect()
}
