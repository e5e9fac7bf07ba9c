//! Logging settings for report runs.
//!
//! Log lines go to stderr so the JSON report can own stdout.

use serde::{Deserialize, Serialize};

/// Accepted `observability.logging.level` values.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Accepted `observability.logging.format` values.
pub const LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// The `observability` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log output for the engine.
    pub logging: LoggingConfig,
}

/// The `observability.logging` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for `analytics_engine` targets when `RUST_LOG` is unset.
    pub level: String,
    /// `json` lines for log collectors, `pretty` for a terminal.
    pub format: String,
    /// Attach the current span and span list to JSON lines.
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
            include_spans: true,
        }
    }
}

impl LoggingConfig {
    /// Whether human-readable output was requested.
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.format == "pretty"
    }
}
