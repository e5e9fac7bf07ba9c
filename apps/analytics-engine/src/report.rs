//! Dashboard report: every analysis over one customer snapshot and its
//! subscription history.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::clv::{ClvModelSummary, summarize_model};
use crate::config::{Config, OutputConfig, load_config_or_default};
use crate::data::{load_or_generate, load_or_generate_history};
use crate::domain::{CustomerRecord, SubscriptionPeriod, clv_values};
use crate::error::AnalyticsError;
use crate::forecast::{
    BassPoint, MonteCarloForecast, MonteCarloForecaster, SurvivalCurve, bass_diffusion,
    survival_curve,
};
use crate::segmentation::{SegmentationMatrix, ValueTiers, segment_customers, value_tiers};
use crate::stats::{
    ConcentrationBand, DescriptiveStats, EntropyReport, InequalityMetrics, ParetoPoint, ZipfFit,
    concentration_bands, describe, inequality_metrics, pareto_curve, plan_entropy, zipf_fit,
};
use crate::subscription::{SubscriptionKpis, subscription_kpis};

/// Complete dashboard snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Report id.
    pub id: Uuid,
    /// Generation time.
    pub generated_at: DateTime<Utc>,
    /// Customers analysed.
    pub customers: usize,
    /// Descriptive statistics of CLV.
    pub clv_stats: DescriptiveStats,
    /// Gini and top shares of CLV.
    pub inequality: InequalityMetrics,
    /// Top 1/5/10/20% CLV shares.
    pub concentration: Vec<ConcentrationBand>,
    /// Cumulative CLV share by rank.
    pub pareto_curve: Vec<ParetoPoint>,
    /// Revenue diversification across plans.
    pub revenue_entropy: EntropyReport,
    /// Zipf fit of the top-ranked CLV values.
    pub zipf: ZipfFit,
    /// CLV model summary.
    pub model: ClvModelSummary,
    /// Frequency/monetary segmentation.
    pub segmentation: SegmentationMatrix,
    /// CLV quartile tiers.
    pub value_tiers: ValueTiers,
    /// Monte Carlo revenue forecast.
    pub forecast: MonteCarloForecast,
    /// Bass diffusion curve.
    pub bass: Vec<BassPoint>,
    /// Weibull revenue survival.
    pub survival: SurvivalCurve,
    /// Subscription KPIs.
    pub subscription: SubscriptionKpis,
}

/// Run every analysis over `customers` and `history`.
#[must_use]
pub fn build_report(
    customers: &[CustomerRecord],
    history: &[SubscriptionPeriod],
    config: &Config,
) -> DashboardReport {
    info!(
        customers = customers.len(),
        periods = history.len(),
        "Building dashboard report"
    );

    let clv = clv_values(customers);

    DashboardReport {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        customers: customers.len(),
        clv_stats: describe(&clv),
        inequality: inequality_metrics(&clv),
        concentration: concentration_bands(&clv),
        pareto_curve: pareto_curve(&clv),
        revenue_entropy: plan_entropy(customers),
        zipf: zipf_fit(&clv, config.model.zipf_top_n),
        model: summarize_model(customers, &config.model),
        segmentation: segment_customers(customers, config.segmentation.thresholds()),
        value_tiers: value_tiers(customers),
        forecast: MonteCarloForecaster::new(config.forecast.clone()).run(),
        bass: bass_diffusion(&config.bass),
        survival: survival_curve(&config.survival),
        subscription: subscription_kpis(history, &config.subscription.kpis),
    }
}

/// Load the configured customers and subscription history, then build the report.
///
/// # Errors
///
/// Returns `AnalyticsError::Dataset` if either source cannot be loaded.
pub fn generate_report(config: &Config) -> Result<DashboardReport, AnalyticsError> {
    let customers = load_or_generate(&config.dataset)?;
    let history = load_or_generate_history(&config.subscription.history)?;
    Ok(build_report(&customers, &history, config))
}

/// Load the config at `path` (defaults when unset and `config.yaml` is
/// absent), then build the report.
///
/// # Errors
///
/// Returns `AnalyticsError::Config` if the config cannot be loaded and
/// `AnalyticsError::Dataset` if the records cannot.
pub fn generate_report_from_path(path: Option<&str>) -> Result<DashboardReport, AnalyticsError> {
    let config = load_config_or_default(path)?;
    generate_report(&config)
}

/// Serialize the report as configured.
///
/// # Errors
///
/// Returns `AnalyticsError::Serialize` if serialization fails.
pub fn render_report(report: &DashboardReport, output: &OutputConfig) -> Result<String, AnalyticsError> {
    let json = if output.pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

/// Write the report to `output.path`, or stdout when unset.
///
/// # Errors
///
/// Returns an `AnalyticsError` if serialization or writing fails.
pub fn write_report(report: &DashboardReport, output: &OutputConfig) -> Result<(), AnalyticsError> {
    let json = render_report(report, output)?;

    match &output.path {
        Some(path) => {
            std::fs::write(path, json).map_err(|e| AnalyticsError::Output {
                path: path.clone(),
                source: e,
            })?;
            info!(path = %path, "Report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").map_err(|e| AnalyticsError::Output {
                path: "<stdout>".to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DatasetConfig, HistoryConfig, generate_customers, generate_history};
    use std::io::Write;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.dataset = DatasetConfig {
            customer_count: 60,
            ..Default::default()
        };
        config.forecast.simulations = 100;
        config.forecast.seed = Some(5);
        config
    }

    #[test]
    fn test_build_report() {
        let config = small_config();
        let customers = generate_customers(&config.dataset);
        let history = generate_history(&config.subscription.history);
        let report = build_report(&customers, &history, &config);

        assert_eq!(report.customers, 60);
        assert_eq!(report.clv_stats.count, 60);
        assert_eq!(report.concentration.len(), 4);
        assert_eq!(report.pareto_curve.len(), 60);
        assert_eq!(report.segmentation.assignments.len(), 60);
        assert_eq!(report.forecast.points.len(), config.forecast.periods);
        assert_eq!(report.bass.len(), config.bass.periods);
        assert_eq!(report.model.customers, 60);
        assert!(report.zipf.points.len() <= config.model.zipf_top_n);
        assert_eq!(report.survival.points.len(), config.survival.periods);
        assert_eq!(report.subscription.periods, config.subscription.history.periods);
        assert!(report.subscription.grr.value > 0.0);
    }

    #[test]
    fn test_report_without_history() {
        let config = small_config();
        let customers = generate_customers(&config.dataset);
        let report = build_report(&customers, &[], &config);

        assert_eq!(report.subscription, SubscriptionKpis::default());
        assert!(!report.survival.points.is_empty());
    }

    #[test]
    fn test_generate_report_from_invalid_config_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"forecast:\n  simulations: 0\n").unwrap();

        let Err(err) = generate_report_from_path(file.path().to_str()) else {
            panic!("expected config error");
        };
        assert!(matches!(err, AnalyticsError::Config(_)));
        assert!(err.to_string().contains("forecast.simulations"));
    }

    #[test]
    fn test_generate_report_from_missing_history() {
        let mut config = small_config();
        config.subscription.history = HistoryConfig {
            path: Some("/nonexistent/history.json".to_string()),
            ..Default::default()
        };
        assert!(matches!(generate_report(&config), Err(AnalyticsError::Dataset(_))));
    }

    #[test]
    fn test_report_for_empty_population() {
        let report = build_report(&[], &[], &small_config());

        assert_eq!(report.customers, 0);
        assert!(report.pareto_curve.is_empty());
        assert!(report.segmentation.assignments.is_empty());
        // The forecast does not depend on customer records
        assert!(!report.forecast.points.is_empty());
    }

    #[test]
    fn test_write_report_to_file() {
        let config = small_config();
        let report = generate_report(&config).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let output = OutputConfig {
            path: Some(path.display().to_string()),
            pretty: false,
        };

        write_report(&report, &output).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["customers"], 60);
        assert!(value["model"]["parameters"]["bgnbd"]["r"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_write_report_to_missing_dir_fails() {
        let report = build_report(&[], &[], &small_config());
        let output = OutputConfig {
            path: Some("/nonexistent/dir/report.json".to_string()),
            pretty: true,
        };
        assert!(matches!(
            write_report(&report, &output),
            Err(AnalyticsError::Output { .. })
        ));
    }
}
