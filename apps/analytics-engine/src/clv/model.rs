//! CLV model summary.
//!
//! Combines the parameter summaries, Gamma fit, heterogeneity, value
//! distribution, and the derived views into one snapshot.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{CustomerRecord, clv_values};
use crate::stats::{InequalityMetrics, coefficient_of_variation, inequality_metrics, mean};

use super::cohort::{CohortSummary, cohort_summary};
use super::config::ClvModelConfig;
use super::decomposition::{ClvDecomposition, CustomerEquity, customer_equity, decompose};
use super::distribution::{DistributionBucket, value_distribution};
use super::drivers::{ClvDrivers, clv_drivers};
use super::gamma::GammaFit;
use super::params::ModelParameters;
use super::prediction::{PredictionPoint, prediction_band};

/// Heterogeneity index above which the population is highly heterogeneous.
pub const HIGH_HETEROGENEITY: f64 = 0.7;

/// Heterogeneity index above which the population is moderately heterogeneous.
pub const MEDIUM_HETEROGENEITY: f64 = 0.4;

/// Coarse heterogeneity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeterogeneityLevel {
    /// Index above 0.7.
    High,
    /// Index above 0.4.
    Medium,
    /// Everything else.
    Low,
}

impl HeterogeneityLevel {
    /// Classify a heterogeneity index.
    #[must_use]
    pub fn from_index(index: f64) -> Self {
        if index > HIGH_HETEROGENEITY {
            Self::High
        } else if index > MEDIUM_HETEROGENEITY {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Suggested action for the level.
    #[must_use]
    pub const fn recommendation(&self) -> &'static str {
        match self {
            Self::High => "Implement personalized strategies for different customer segments",
            Self::Medium => "Consider segment-based approaches for key customer groups",
            Self::Low => "A uniform strategy may be effective across the customer base",
        }
    }
}

/// Heterogeneity index `cv / (1 + cv)` of the values.
///
/// Lies in `[0, 1)` and increases strictly with the coefficient of variation.
/// Zero when the mean is not positive.
#[must_use]
pub fn heterogeneity_index(values: &[f64]) -> f64 {
    let cv = coefficient_of_variation(values);
    if cv.is_finite() && cv > 0.0 {
        cv / (1.0 + cv)
    } else {
        0.0
    }
}

/// Snapshot of the CLV model for one population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClvModelSummary {
    /// Customers summarised.
    pub customers: usize,
    /// Mean CLV.
    pub mean_clv: f64,
    /// BG/NBD and Gamma-Gamma parameters.
    pub parameters: ModelParameters,
    /// Gamma fit of CLV.
    pub gamma_fit: GammaFit,
    /// `cv / (1 + cv)` of CLV.
    pub heterogeneity_index: f64,
    /// Classified heterogeneity.
    pub heterogeneity_level: HeterogeneityLevel,
    /// Suggested action for the heterogeneity level.
    pub recommendation: String,
    /// Classic CLV on population means.
    pub predicted_clv: f64,
    /// Histogram of CLV with the fitted Gamma density.
    pub value_distribution: Vec<DistributionBucket>,
    /// Gini and top shares of CLV.
    pub inequality: InequalityMetrics,
    /// CLV prediction with a widening 95% band.
    pub prediction: Vec<PredictionPoint>,
    /// Population averages behind the predicted CLV.
    pub decomposition: ClvDecomposition,
    /// Discounted value of the customer base.
    pub equity: CustomerEquity,
    /// Average CLV by plan and usage tier.
    pub drivers: ClvDrivers,
    /// Consecutive cohorts in input order.
    pub cohorts: Vec<CohortSummary>,
}

/// Summarise the CLV model for `customers`.
///
/// An empty population yields zeroed statistics with default (positive)
/// parameters.
#[must_use]
pub fn summarize_model(customers: &[CustomerRecord], config: &ClvModelConfig) -> ClvModelSummary {
    info!(customers = customers.len(), "Summarizing CLV model");

    if customers.is_empty() {
        warn!("Empty customer population, using default model parameters");
    }

    let clv = clv_values(customers);
    let mean_clv = mean(&clv);
    let parameters = ModelParameters::estimate(customers);
    let gamma_fit = GammaFit::from_values(&clv);
    let index = heterogeneity_index(&clv);
    let level = HeterogeneityLevel::from_index(index);

    debug!(
        shape = gamma_fit.shape,
        scale = gamma_fit.scale,
        heterogeneity = index,
        "Fitted CLV distribution"
    );

    let decomposition = decompose(customers, config.max_retention);
    let predicted_clv = decomposition.calculated_clv;

    ClvModelSummary {
        customers: customers.len(),
        mean_clv,
        parameters,
        gamma_fit,
        heterogeneity_index: index,
        heterogeneity_level: level,
        recommendation: level.recommendation().to_string(),
        predicted_clv,
        value_distribution: value_distribution(&clv, config.histogram_buckets, &gamma_fit),
        inequality: inequality_metrics(&clv),
        prediction: if customers.is_empty() {
            Vec::new()
        } else {
            prediction_band(
                mean_clv,
                config.prediction_periods,
                config.prediction_growth,
                config.prediction_uncertainty,
            )
        },
        decomposition,
        equity: customer_equity(customers, config.discount_rate, config.max_retention),
        drivers: clv_drivers(customers),
        cohorts: cohort_summary(customers, config.cohort_size),
    }
}
