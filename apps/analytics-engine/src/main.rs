//! Analytics Engine Binary
//!
//! Builds a dashboard report and writes it as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin analytics-engine
//! ```
//!
//! # Environment Variables
//!
//! - `ANALYTICS_CONFIG`: Path to the YAML config (default: config.yaml; built-in
//!   defaults when that file does not exist)
//! - `RUST_LOG`: Log filter (overrides `observability.logging.level`)
//!
//! The config file may reference other variables with `${VAR}` or
//! `${VAR:-default}`.

use anyhow::Context;

use analytics_engine::config::load_config_or_default;
use analytics_engine::observability::init_tracing;
use analytics_engine::report::{generate_report, write_report};

/// Environment variable naming the config file.
const CONFIG_ENV_VAR: &str = "ANALYTICS_CONFIG";

fn main() -> anyhow::Result<()> {
    let config_path = std::env::var(CONFIG_ENV_VAR).ok();
    let config = load_config_or_default(config_path.as_deref())
        .context("failed to load configuration")?;

    init_tracing(&config.observability.logging).context("failed to initialize logging")?;

    tracing::info!(
        config = config_path.as_deref().unwrap_or("default"),
        "Starting Analytics Engine"
    );

    let report = generate_report(&config).context("failed to build dashboard report")?;
    write_report(&report, &config.output).context("failed to write dashboard report")?;

    tracing::info!(
        report_id = %report.id,
        customers = report.customers,
        "Dashboard report complete"
    );
    Ok(())
}
