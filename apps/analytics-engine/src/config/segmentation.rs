//! Segmentation configuration.

use serde::{Deserialize, Serialize};

use crate::segmentation::SegmentThresholds;

/// Fixed matrix thresholds, set as a pair.
///
/// Population medians are used when neither is set. Validation rejects a
/// config that sets only one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Purchase-frequency threshold.
    #[serde(default)]
    pub frequency_threshold: Option<f64>,
    /// Monetary threshold.
    #[serde(default)]
    pub monetary_threshold: Option<f64>,
}

impl SegmentationConfig {
    /// Thresholds when both are configured.
    #[must_use]
    pub fn thresholds(&self) -> Option<SegmentThresholds> {
        Some(SegmentThresholds {
            frequency: self.frequency_threshold?,
            monetary: self.monetary_threshold?,
        })
    }
}
