//! Subscription history and KPI configuration.

use serde::{Deserialize, Serialize};

use crate::data::HistoryConfig;
use crate::subscription::KpiConfig;

/// The `subscription` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionConfig {
    /// Period history source.
    pub history: HistoryConfig,
    /// KPI assumptions and goals.
    pub kpis: KpiConfig,
}
