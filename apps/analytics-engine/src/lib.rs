// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::field_reassign_with_default
    )
)]

//! Analytics Engine - Rust Core Library
//!
//! Statistical computation core for the customer analytics dashboard.
//! Every computation is a pure function over borrowed customer records and
//! returns freshly allocated results.
//!
//! # Modules
//!
//! - `stats`: mean, standard deviation, median, trend, percentile rank,
//!   Gini, Pareto and top-N shares, Shannon entropy, Zipf fit, histograms
//! - `clv`: BG/NBD and Gamma-Gamma parameter summaries, Gamma fit,
//!   heterogeneity, value distribution, decomposition, equity, drivers,
//!   cohorts, prediction band
//! - `forecast`: Monte Carlo revenue forecast, Bass diffusion, Weibull
//!   revenue survival
//! - `subscription`: churn, conversion, NRR, GRR, and CLV KPIs
//! - `segmentation`: frequency/monetary matrix, CLV quartile tiers
//! - `data`: seeded synthetic customers and subscription history, JSON loading
//! - `report`: the full dashboard snapshot
//!
//! Degenerate input (empty populations, zero totals) resolves to zeros and
//! empty series; no computation emits NaN or infinity. Only configuration,
//! dataset loading, and report output return errors.
//!
//! # Example
//!
//! ```ignore
//! use analytics_engine::config::Config;
//! use analytics_engine::data::{generate_customers, generate_history};
//! use analytics_engine::report::build_report;
//!
//! let config = Config::default();
//! let customers = generate_customers(&config.dataset);
//! let history = generate_history(&config.subscription.history);
//! let report = build_report(&customers, &history, &config);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Customer record types.
pub mod domain;

/// Descriptive and inequality statistics.
pub mod stats;

/// Customer lifetime value modeling.
pub mod clv;

/// Revenue forecasting.
pub mod forecast;

/// Customer segmentation.
pub mod segmentation;

/// Subscription KPIs.
pub mod subscription;

/// Customer record sources.
pub mod data;

/// Dashboard report aggregation.
pub mod report;

/// Configuration loading and validation.
pub mod config;

/// Error types.
pub mod error;

/// Structured logging.
pub mod observability;

pub use clv::{ClvModelConfig, ClvModelSummary, ModelParameters, summarize_model};
pub use config::{Config, ConfigError};
pub use domain::{CustomerRecord, Plan, SubscriptionPeriod};
pub use error::{AnalyticsError, DatasetError};
pub use forecast::{
    ForecastPoint, MonteCarloConfig, MonteCarloForecaster, SurvivalCurve, forecast_with_rng,
    survival_curve,
};
pub use report::{DashboardReport, build_report};
pub use segmentation::{SegmentBucket, SegmentThresholds, SegmentationMatrix, segment_customers};
pub use stats::{InequalityMetrics, gini, inequality_metrics, mean, median, std_dev, trend};
pub use subscription::{SubscriptionKpis, subscription_kpis};
