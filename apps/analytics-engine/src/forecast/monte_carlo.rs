//! Monte Carlo revenue forecast.
//!
//! Simulates compounding revenue paths with a noisy growth rate and reports
//! per-period percentile bands:
//! - Growth factor per step: `1 + growth_rate * (1 + (u - 0.5) * volatility)`
//! - Percentiles taken as `sorted[floor(n * q)]` across simulations
//! - Reproducible: every path draws from its own RNG seeded from
//!   `(seed, path index)`, so the result does not depend on scheduling
//! - Paths run on rayon once the simulation count reaches the parallel threshold
//! - Runaway paths saturate at `±f64::MAX`, so every band stays finite

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::stats::percentile_of_sorted;

/// Configuration for the Monte Carlo forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Starting value (e.g. current MRR).
    pub base_value: f64,
    /// Expected growth per period (0.08 = 8%).
    pub growth_rate: f64,
    /// Relative noise applied to the growth rate.
    pub volatility: f64,
    /// Number of forecast periods.
    pub periods: usize,
    /// Number of simulated paths.
    pub simulations: usize,
    /// Seed for reproducibility (None = random).
    pub seed: Option<u64>,
    /// Simulation count at which paths run in parallel.
    pub parallel_threshold: usize,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            base_value: 450_000.0,
            growth_rate: 0.08,
            volatility: 0.15,
            periods: 12,
            simulations: 1000,
            seed: None,
            parallel_threshold: 2048,
        }
    }
}

impl MonteCarloConfig {
    fn has_finite_inputs(&self) -> bool {
        self.base_value.is_finite() && self.growth_rate.is_finite() && self.volatility.is_finite()
    }
}

/// Percentile band for one forecast period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 1-based period.
    pub period: usize,
    /// 10th percentile.
    pub p10: f64,
    /// Median.
    pub p50: f64,
    /// 90th percentile.
    pub p90: f64,
    /// Smallest simulated value.
    pub min: f64,
    /// Largest simulated value.
    pub max: f64,
}

/// Forecast output with the seed that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloForecast {
    /// Seed the paths were derived from.
    pub seed: u64,
    /// Simulated paths.
    pub simulations: usize,
    /// One band per period.
    pub points: Vec<ForecastPoint>,
}

/// Run the forecast sequentially with a caller-supplied RNG.
///
/// All paths draw from `rng` in order. Returns an empty series for zero
/// simulations, zero periods, or non-finite inputs.
pub fn forecast_with_rng<R: Rng + ?Sized>(
    config: &MonteCarloConfig,
    rng: &mut R,
) -> Vec<ForecastPoint> {
    if !can_simulate(config) {
        return Vec::new();
    }

    let paths: Vec<Vec<f64>> = (0..config.simulations)
        .map(|_| simulate_path(config, rng))
        .collect();

    summarize_paths(&paths, config.periods)
}

/// Seeded, optionally parallel Monte Carlo forecaster.
#[derive(Debug, Clone)]
pub struct MonteCarloForecaster {
    config: MonteCarloConfig,
}

impl MonteCarloForecaster {
    /// Create a new forecaster.
    #[must_use]
    pub const fn new(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Run the forecast.
    ///
    /// Output is identical for a given seed whether paths run sequentially or
    /// in parallel.
    #[must_use]
    pub fn run(&self) -> MonteCarloForecast {
        let seed = self.config.seed.unwrap_or_else(|| {
            let seed = rand::rng().random::<u64>();
            info!(seed, "No forecast seed configured, drew one from the thread RNG");
            seed
        });

        if !can_simulate(&self.config) {
            return MonteCarloForecast {
                seed,
                simulations: 0,
                points: Vec::new(),
            };
        }

        let parallel = self.config.simulations >= self.config.parallel_threshold;
        info!(
            simulations = self.config.simulations,
            periods = self.config.periods,
            seed,
            parallel,
            "Running Monte Carlo forecast"
        );

        let run_path = |index: usize| {
            let mut rng = StdRng::seed_from_u64(path_seed(seed, index));
            let path = simulate_path(&self.config, &mut rng);
            if (index + 1) % 1000 == 0 {
                debug!(simulation = index + 1, "Monte Carlo progress");
            }
            path
        };

        let paths: Vec<Vec<f64>> = if parallel {
            (0..self.config.simulations).into_par_iter().map(run_path).collect()
        } else {
            (0..self.config.simulations).map(run_path).collect()
        };

        MonteCarloForecast {
            seed,
            simulations: paths.len(),
            points: summarize_paths(&paths, self.config.periods),
        }
    }
}

fn can_simulate(config: &MonteCarloConfig) -> bool {
    if config.simulations == 0 || config.periods == 0 {
        return false;
    }
    if !config.has_finite_inputs() {
        warn!(
            base_value = config.base_value,
            growth_rate = config.growth_rate,
            volatility = config.volatility,
            "Non-finite forecast inputs, returning empty series"
        );
        return false;
    }
    true
}

/// Mix the run seed with the path index (splitmix64 finalizer).
const fn path_seed(seed: u64, index: usize) -> u64 {
    let mut z = seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn simulate_path<R: Rng + ?Sized>(config: &MonteCarloConfig, rng: &mut R) -> Vec<f64> {
    let mut value = config.base_value;
    (0..config.periods)
        .map(|_| {
            let noise = 1.0 + (rng.random::<f64>() - 0.5) * config.volatility;
            value = (value * (1.0 + config.growth_rate * noise)).clamp(-f64::MAX, f64::MAX);
            value
        })
        .collect()
}

fn summarize_paths(paths: &[Vec<f64>], periods: usize) -> Vec<ForecastPoint> {
    if paths.is_empty() {
        return Vec::new();
    }

    (0..periods)
        .map(|period| {
            let mut values: Vec<f64> = paths.iter().map(|path| path[period]).collect();
            values.sort_by(f64::total_cmp);
            ForecastPoint {
                period: period + 1,
                p10: percentile_of_sorted(&values, 0.10),
                p50: percentile_of_sorted(&values, 0.50),
                p90: percentile_of_sorted(&values, 0.90),
                min: values[0],
                max: values[values.len() - 1],
            }
        })
        .collect()
}

/// Builder for the Monte Carlo forecaster.
#[derive(Debug, Default)]
pub struct MonteCarloBuilder {
    config: MonteCarloConfig,
}

impl MonteCarloBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting value.
    #[must_use]
    pub const fn base_value(mut self, value: f64) -> Self {
        self.config.base_value = value;
        self
    }

    /// Set the expected growth per period.
    #[must_use]
    pub const fn growth_rate(mut self, rate: f64) -> Self {
        self.config.growth_rate = rate;
        self
    }

    /// Set the growth-rate volatility.
    #[must_use]
    pub const fn volatility(mut self, volatility: f64) -> Self {
        self.config.volatility = volatility;
        self
    }

    /// Set the number of periods.
    #[must_use]
    pub const fn periods(mut self, n: usize) -> Self {
        self.config.periods = n;
        self
    }

    /// Set the number of simulated paths.
    #[must_use]
    pub const fn simulations(mut self, n: usize) -> Self {
        self.config.simulations = n;
        self
    }

    /// Set random seed for reproducibility.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the simulation count at which paths run in parallel.
    #[must_use]
    pub const fn parallel_threshold(mut self, n: usize) -> Self {
        self.config.parallel_threshold = n;
        self
    }

    /// Build the forecaster.
    #[must_use]
    pub fn build(self) -> MonteCarloForecaster {
        MonteCarloForecaster::new(self.config)
    }
}
