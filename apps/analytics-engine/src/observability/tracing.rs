//! Structured logging for the analytics engine.
//!
//! # Example
//!
//! ```ignore
//! use analytics_engine::config::LoggingConfig;
//! use analytics_engine::observability::init_tracing;
//!
//! init_tracing(&LoggingConfig::default())?;
//! ```
//!
//! Logs are written to stderr so the report can go to stdout. `RUST_LOG`
//! overrides the configured level when set.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Filter target for this crate.
pub const LOG_TARGET: &str = "analytics_engine";

/// Error type for tracing operations.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    /// The log filter could not be built.
    #[error("invalid log filter: {0}")]
    FilterError(String),
    /// Failed to initialize tracing subscriber.
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Build the log filter: `RUST_LOG` when set, otherwise `analytics_engine=<level>`.
///
/// # Errors
///
/// Returns `TracingError::FilterError` if the configured level is not a valid directive.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TracingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(format!("{LOG_TARGET}={}", config.level))
        .map_err(|e| TracingError::FilterError(e.to_string()))
}

/// Initialize the global tracing subscriber.
///
/// Uses JSON lines for `format: json` and human-readable output for
/// `format: pretty`.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TracingError> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if config.is_pretty() {
        builder.pretty().try_init()
    } else {
        builder
            .json()
            .with_current_span(config.include_spans)
            .with_span_list(config.include_spans)
            .try_init()
    };
    result.map_err(|e| TracingError::SubscriberError(e.to_string()))?;

    tracing::debug!(
        level = %config.level,
        format = %config.format,
        "Tracing initialized"
    );
    Ok(())
}
