//! Report output configuration.

use serde::{Deserialize, Serialize};

/// Where and how the dashboard report is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination file. Stdout when unset.
    #[serde(default)]
    pub path: Option<String>,
    /// Pretty-print the JSON.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            pretty: default_pretty(),
        }
    }
}

const fn default_pretty() -> bool {
    true
}
