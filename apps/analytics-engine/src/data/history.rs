//! Subscription period history: seeded generation and JSON loading.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::SubscriptionPeriod;
use crate::error::DatasetError;

/// Where subscription history comes from and how synthetic periods are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// JSON file of subscription periods. Generated when unset.
    pub path: Option<String>,
    /// Number of generated periods.
    pub periods: usize,
    /// Active customers in the first period.
    pub base_customers: u64,
    /// Revenue in the first period.
    pub base_revenue: f64,
    /// Linear growth of every count per period (0.02 = 2%).
    pub trend_growth: f64,
    /// Generator seed.
    pub seed: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            periods: 12,
            base_customers: 140_000,
            base_revenue: 450_000.0,
            trend_growth: 0.02,
            seed: 99,
        }
    }
}

/// Generate `config.periods` periods of subscription activity.
///
/// Counts scale with a linear trend plus uniform noise; the same seed always
/// yields the same history.
#[must_use]
pub fn generate_history(config: &HistoryConfig) -> Vec<SubscriptionPeriod> {
    info!(
        periods = config.periods,
        seed = config.seed,
        "Generating subscription history"
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    (0..config.periods)
        .map(|index| {
            let trend = 1.0 + index as f64 * config.trend_growth;
            let active_customers = (config.base_customers as f64 * trend
                + rng.random::<f64>() * 5000.0)
                .max(0.0)
                .floor() as u64;

            let mut count = |base: f64, spread: f64| -> u64 {
                ((base + rng.random::<f64>() * spread) * trend).max(0.0).floor() as u64
            };
            let enrollments = count(15_000.0, 5_000.0);
            let opportunities = count(8_000.0, 3_000.0);
            let cancels = count(1_200.0, 400.0);
            let trial_expires = count(800.0, 300.0);
            let conversions = count(6_500.0, 2_000.0);
            let renewals = count(11_000.0, 4_000.0);
            let revenue = (config.base_revenue + rng.random::<f64>() * config.base_revenue / 3.0)
                * trend;

            SubscriptionPeriod {
                period: index + 1,
                active_customers,
                enrollments,
                opportunities,
                cancels,
                trial_expires,
                conversions,
                renewals,
                revenue: revenue.max(0.0),
            }
        })
        .collect()
}

/// Load and validate subscription periods from a JSON array file.
///
/// # Errors
///
/// Returns a `DatasetError` if the file cannot be read, is not a JSON array
/// of periods, or contains an invalid period.
pub fn load_history(path: impl AsRef<Path>) -> Result<Vec<SubscriptionPeriod>, DatasetError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| DatasetError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let history = parse_history(&contents)?;
    info!(
        periods = history.len(),
        path = %path.display(),
        "Loaded subscription history"
    );
    Ok(history)
}

/// Parse and validate subscription periods from a JSON string.
///
/// # Errors
///
/// Returns a `DatasetError` if the JSON is malformed or a period is invalid.
pub fn parse_history(json: &str) -> Result<Vec<SubscriptionPeriod>, DatasetError> {
    let history: Vec<SubscriptionPeriod> = serde_json::from_str(json)?;
    validate_history(&history)?;
    Ok(history)
}

/// Check every period: finite, non-negative revenue.
///
/// # Errors
///
/// Returns `DatasetError::InvalidPeriod` for the first offending period.
pub fn validate_history(history: &[SubscriptionPeriod]) -> Result<(), DatasetError> {
    for (index, period) in history.iter().enumerate() {
        if !period.revenue.is_finite() || period.revenue < 0.0 {
            return Err(DatasetError::InvalidPeriod {
                index,
                reason: format!("revenue must be a non-negative number, got {}", period.revenue),
            });
        }
    }
    Ok(())
}
