//! Configuration for CLV model summaries.

use serde::{Deserialize, Serialize};

/// Tunables for the CLV model summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClvModelConfig {
    /// Number of buckets in the value-distribution histogram.
    pub histogram_buckets: usize,
    /// Cap on retention (as a fraction) used in the CLV formula.
    pub max_retention: f64,
    /// Discount rate for customer equity.
    pub discount_rate: f64,
    /// Number of periods in the CLV prediction band.
    pub prediction_periods: usize,
    /// Per-period growth of the predicted CLV.
    pub prediction_growth: f64,
    /// Base uncertainty as a fraction of the predicted value.
    pub prediction_uncertainty: f64,
    /// Customers per cohort (grouped in input order).
    pub cohort_size: usize,
    /// Number of top-ranked customers in the Zipf fit.
    pub zipf_top_n: usize,
}

impl Default for ClvModelConfig {
    fn default() -> Self {
        Self {
            histogram_buckets: 25,
            max_retention: 0.99,
            discount_rate: 0.10,
            prediction_periods: 24,
            prediction_growth: 0.03,
            prediction_uncertainty: 0.10,
            cohort_size: 10,
            zipf_top_n: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clv_model_config_default() {
        let config = ClvModelConfig::default();
        assert_eq!(config.histogram_buckets, 25);
        assert_eq!(config.prediction_periods, 24);
        assert!((config.max_retention - 0.99).abs() < f64::EPSILON);
    }
}
