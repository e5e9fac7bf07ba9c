//! Configuration module for the analytics engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for the dataset source, the CLV model, forecasting, revenue
//! survival, subscription KPIs, segmentation, logging, and report output.
//!
//! # Usage
//!
//! ```rust,ignore
//! use analytics_engine::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! // Access configuration values
//! println!("simulations: {}", config.forecast.simulations);
//! ```

mod observability;
mod output;
mod segmentation;
mod subscription;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clv::ClvModelConfig;
use crate::data::DatasetConfig;
use crate::forecast::{BassConfig, MonteCarloConfig, SurvivalConfig};

pub use observability::{LOG_FORMATS, LOG_LEVELS, LoggingConfig, ObservabilityConfig};
pub use output::OutputConfig;
pub use segmentation::SegmentationConfig;
pub use subscription::SubscriptionConfig;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Customer record source.
    #[serde(default)]
    pub dataset: DatasetConfig,
    /// CLV model summary.
    #[serde(default)]
    pub model: ClvModelConfig,
    /// Monte Carlo revenue forecast.
    #[serde(default)]
    pub forecast: MonteCarloConfig,
    /// Bass diffusion curve.
    #[serde(default)]
    pub bass: BassConfig,
    /// Weibull revenue survival.
    #[serde(default)]
    pub survival: SurvivalConfig,
    /// Subscription history and KPIs.
    #[serde(default)]
    pub subscription: SubscriptionConfig,
    /// Segmentation matrix thresholds.
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Report output.
    #[serde(default)]
    pub output: OutputConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    // Read the config file
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration, falling back to defaults when no path is given and
/// the default file does not exist.
///
/// An explicit path must exist.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config_or_default(path: Option<&str>) -> Result<Config, ConfigError> {
    if path.is_none() && !Path::new(DEFAULT_CONFIG_PATH).exists() {
        let config = Config::default();
        validate_config(&config)?;
        return Ok(config);
    }
    load_config(path)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

fn check_range(name: &str, (min, max): (f64, f64)) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(invalid(format!(
            "{name} must be a finite [min, max] pair with min <= max"
        )));
    }
    Ok(())
}

/// Validate configuration values.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` naming the first invalid field.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_dataset(&config.dataset)?;
    validate_model(&config.model)?;
    validate_forecast(&config.forecast)?;
    validate_bass(&config.bass)?;
    validate_survival(&config.survival)?;
    validate_subscription(&config.subscription)?;
    validate_segmentation(&config.segmentation)?;
    validate_observability(&config.observability)?;
    Ok(())
}

fn validate_dataset(dataset: &DatasetConfig) -> Result<(), ConfigError> {
    if dataset.path.is_none() && dataset.customer_count == 0 {
        return Err(invalid(
            "dataset.customer_count must be positive when dataset.path is not set",
        ));
    }

    check_range("dataset.frequency_range", dataset.frequency_range)?;
    check_range("dataset.monetary_range", dataset.monetary_range)?;
    check_range("dataset.retention_range", dataset.retention_range)?;

    if dataset.frequency_range.0 < 0.0 || dataset.monetary_range.0 < 0.0 {
        return Err(invalid(
            "dataset.frequency_range and dataset.monetary_range must be non-negative",
        ));
    }

    if dataset.retention_range.0 < 0.0 || dataset.retention_range.1 > 100.0 {
        return Err(invalid("dataset.retention_range must be within 0-100"));
    }

    let shares = [dataset.pro_share, dataset.enterprise_share];
    if shares.iter().any(|s| !(0.0..=1.0).contains(s)) || shares.iter().sum::<f64>() > 1.0 {
        return Err(invalid(
            "dataset.pro_share and dataset.enterprise_share must be within 0.0-1.0 and sum to at most 1.0",
        ));
    }

    Ok(())
}

fn validate_model(model: &ClvModelConfig) -> Result<(), ConfigError> {
    if model.histogram_buckets == 0 {
        return Err(invalid("model.histogram_buckets must be positive"));
    }

    if !(model.max_retention > 0.0 && model.max_retention < 1.0) {
        return Err(invalid("model.max_retention must be between 0.0 and 1.0 (exclusive)"));
    }

    if !(0.0..=1.0).contains(&model.discount_rate) {
        return Err(invalid("model.discount_rate must be between 0.0 and 1.0"));
    }

    if !model.prediction_growth.is_finite() || model.prediction_uncertainty < 0.0 {
        return Err(invalid(
            "model.prediction_growth must be finite and model.prediction_uncertainty non-negative",
        ));
    }

    if model.cohort_size == 0 {
        return Err(invalid("model.cohort_size must be positive"));
    }

    Ok(())
}

fn validate_forecast(forecast: &MonteCarloConfig) -> Result<(), ConfigError> {
    if !forecast.base_value.is_finite() || forecast.base_value < 0.0 {
        return Err(invalid("forecast.base_value must be a non-negative number"));
    }

    if !forecast.growth_rate.is_finite() || forecast.growth_rate <= -1.0 {
        return Err(invalid("forecast.growth_rate must be greater than -1.0"));
    }

    if !forecast.volatility.is_finite() || forecast.volatility < 0.0 {
        return Err(invalid("forecast.volatility must be non-negative"));
    }

    if forecast.periods == 0 || forecast.simulations == 0 {
        return Err(invalid("forecast.periods and forecast.simulations must be positive"));
    }

    // Largest per-period growth factor any path can draw
    let max_factor = 1.0 + forecast.growth_rate.abs() * (1.0 + forecast.volatility / 2.0);
    let log_peak =
        forecast.base_value.max(1.0).ln() + forecast.periods as f64 * max_factor.ln();
    if log_peak >= f64::MAX.ln() {
        return Err(invalid(
            "forecast.growth_rate compounded over forecast.periods exceeds the representable range",
        ));
    }

    Ok(())
}

fn validate_bass(bass: &BassConfig) -> Result<(), ConfigError> {
    if !(bass.innovation > 0.0 && bass.innovation.is_finite()) {
        return Err(invalid("bass.innovation must be positive"));
    }

    if !(bass.imitation >= 0.0 && bass.imitation.is_finite()) {
        return Err(invalid("bass.imitation must be non-negative"));
    }

    if !(bass.market_size > 0.0 && bass.market_size.is_finite()) {
        return Err(invalid("bass.market_size must be positive"));
    }

    Ok(())
}

fn validate_survival(survival: &SurvivalConfig) -> Result<(), ConfigError> {
    if !(survival.shape > 0.0 && survival.shape.is_finite())
        || !(survival.scale > 0.0 && survival.scale.is_finite())
    {
        return Err(invalid("survival.shape and survival.scale must be positive"));
    }

    if !survival.base_revenue.is_finite() || survival.base_revenue < 0.0 {
        return Err(invalid("survival.base_revenue must be a non-negative number"));
    }

    if !survival.revenue_growth.is_finite() {
        return Err(invalid("survival.revenue_growth must be finite"));
    }

    Ok(())
}

fn validate_subscription(subscription: &SubscriptionConfig) -> Result<(), ConfigError> {
    let history = &subscription.history;
    if history.path.is_none() && history.periods == 0 {
        return Err(invalid(
            "subscription.history.periods must be positive when subscription.history.path is not set",
        ));
    }

    if !history.base_revenue.is_finite() || history.base_revenue < 0.0 {
        return Err(invalid("subscription.history.base_revenue must be a non-negative number"));
    }

    if !history.trend_growth.is_finite() || history.trend_growth <= -1.0 {
        return Err(invalid("subscription.history.trend_growth must be greater than -1.0"));
    }

    let kpis = &subscription.kpis;
    if !(0.0..=1.0).contains(&kpis.expansion_rate) {
        return Err(invalid("subscription.kpis.expansion_rate must be between 0.0 and 1.0"));
    }

    if !kpis.lifespan_months.is_finite() || kpis.lifespan_months <= 0.0 {
        return Err(invalid("subscription.kpis.lifespan_months must be positive"));
    }

    Ok(())
}

fn validate_segmentation(segmentation: &SegmentationConfig) -> Result<(), ConfigError> {
    match (segmentation.frequency_threshold, segmentation.monetary_threshold) {
        (None, None) => Ok(()),
        (Some(frequency), Some(monetary)) => {
            if [frequency, monetary].iter().any(|t| !t.is_finite() || *t < 0.0) {
                return Err(invalid("segmentation thresholds must be non-negative numbers"));
            }
            Ok(())
        }
        _ => Err(invalid(
            "segmentation.frequency_threshold and segmentation.monetary_threshold must be set together",
        )),
    }
}

fn validate_observability(observability: &ObservabilityConfig) -> Result<(), ConfigError> {
    let logging = &observability.logging;

    if !LOG_LEVELS.contains(&logging.level.as_str()) {
        return Err(invalid(format!(
            "observability.logging.level must be one of: {LOG_LEVELS:?}"
        )));
    }

    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        return Err(invalid(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.dataset.customer_count, 500);
        assert!(config.dataset.path.is_none());
        assert_eq!(config.model.histogram_buckets, 25);
        assert!((config.forecast.base_value - 450_000.0).abs() < f64::EPSILON);
        assert_eq!(config.forecast.simulations, 1000);
        assert_eq!(config.bass.periods, 24);
        assert_eq!(config.observability.logging.format, "json");
        assert!(config.output.pretty);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let config = match load_config_from_string("{}") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config.forecast.periods, 12);
        assert!(config.segmentation.thresholds().is_none());
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        // Use a variable name unlikely to exist
        let input = "format: ${ANALYTICS_CONFIG_TEST_NONEXISTENT_VAR:-pretty}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "format: pretty");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        // PATH should always exist
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "path: ${ANALYTICS_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "path: ");
    }

    #[test]
    fn test_interpolation_in_loaded_config() {
        let yaml = r"
forecast:
  simulations: ${ANALYTICS_CONFIG_TEST_SIMS_UNSET:-250}
";
        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load config: {e}"),
        };
        assert_eq!(config.forecast.simulations, 250);
    }

    #[test]
    fn test_validation_zero_simulations() {
        let yaml = r"
forecast:
  simulations: 0
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero simulations");
        };
        assert!(err.to_string().contains("forecast.simulations"));
    }

    #[test]
    fn test_validation_rejects_overflowing_forecast() {
        let yaml = "forecast: {base_value: 450000, growth_rate: 5.0, periods: 400, simulations: 20, seed: 1}";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for a forecast that overflows");
        };
        assert!(err.to_string().contains("forecast.growth_rate"));

        let yaml = "forecast: {base_value: 450000, growth_rate: 5.0, periods: 40, seed: 1}";
        assert!(load_config_from_string(yaml).is_ok());
    }

    #[test]
    fn test_validation_invalid_max_retention() {
        let yaml = r"
model:
  max_retention: 1.0
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for max_retention");
        };
        assert!(err.to_string().contains("max_retention"));
    }

    #[test]
    fn test_validation_half_specified_thresholds() {
        let yaml = r"
segmentation:
  frequency_threshold: 5.0
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for a single threshold");
        };
        assert!(err.to_string().contains("set together"));

        let yaml = r"
segmentation:
  frequency_threshold: 5.0
  monetary_threshold: -1.0
";
        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn test_validation_survival_and_subscription() {
        let Err(err) = load_config_from_string("survival:\n  scale: 0.0\n") else {
            panic!("expected error for survival scale");
        };
        assert!(err.to_string().contains("survival.shape"));

        let yaml = r"
subscription:
  kpis:
    lifespan_months: 0
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for lifespan");
        };
        assert!(err.to_string().contains("lifespan_months"));

        let yaml = r"
subscription:
  history:
    periods: 0
";
        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn test_validation_invalid_log_format() {
        let yaml = r"
observability:
  logging:
    format: xml
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for log format");
        };
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_validation_plan_shares() {
        let yaml = r"
dataset:
  pro_share: 0.7
  enterprise_share: 0.5
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for plan shares");
        };
        assert!(err.to_string().contains("share"));
    }

    #[test]
    fn test_validation_inverted_range() {
        let yaml = r"
dataset:
  retention_range: [90.0, 60.0]
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for inverted range");
        };
        assert!(err.to_string().contains("retention_range"));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let result = load_config_or_default(Some("/nonexistent/analytics.yaml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
dataset:
  customer_count: 120
  seed: 7
  frequency_range: [2.0, 8.0]

model:
  histogram_buckets: 30
  discount_rate: 0.08
  cohort_size: 20

forecast:
  base_value: 250000
  growth_rate: 0.05
  volatility: 0.2
  periods: 6
  simulations: 400
  seed: 99

bass:
  innovation: 0.02
  imitation: 0.4
  market_size: 5000

survival:
  shape: 1.5
  scale: 18

subscription:
  history:
    periods: 6
    seed: 3
  kpis:
    lifespan_months: 24
    goals:
      nrr: 105

segmentation:
  frequency_threshold: 5.0
  monetary_threshold: 200.0

observability:
  logging:
    level: "debug"
    format: "pretty"

output:
  path: "report.json"
  pretty: false
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(config.dataset.customer_count, 120);
        assert_eq!(config.dataset.seed, 7);
        assert!((config.dataset.frequency_range.1 - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.model.histogram_buckets, 30);
        assert!((config.model.discount_rate - 0.08).abs() < f64::EPSILON);
        assert_eq!(config.forecast.seed, Some(99));
        assert!((config.forecast.base_value - 250_000.0).abs() < 1e-10);
        assert!((config.bass.market_size - 5000.0).abs() < 1e-10);
        assert!((config.survival.shape - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.survival.periods, 36);
        assert_eq!(config.subscription.history.periods, 6);
        assert!((config.subscription.kpis.goals.nrr - 105.0).abs() < f64::EPSILON);
        assert!((config.subscription.kpis.goals.grr - 92.0).abs() < f64::EPSILON);
        assert!(config.segmentation.thresholds().is_some());
        assert_eq!(config.observability.logging.level, "debug");
        assert_eq!(config.output.path.as_deref(), Some("report.json"));
        assert!(!config.output.pretty);
    }
}
