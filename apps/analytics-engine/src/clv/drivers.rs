//! CLV drivers: average value by plan and by product-usage tier.

use serde::{Deserialize, Serialize};

use crate::domain::{CustomerRecord, Plan};
use crate::stats::mean;

/// Usage score below which a customer is a low user.
pub const LOW_USAGE_CEILING: f64 = 33.0;

/// Usage score below which a customer is a medium user.
pub const MEDIUM_USAGE_CEILING: f64 = 66.0;

/// Product-usage tier derived from the usage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageTier {
    /// Score below 33.
    Low,
    /// Score in `[33, 66)`.
    Medium,
    /// Score of 66 or more.
    High,
}

impl UsageTier {
    /// All tiers in display order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Tier for a usage score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < LOW_USAGE_CEILING {
            Self::Low
        } else if score < MEDIUM_USAGE_CEILING {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Get the tier label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low Usage",
            Self::Medium => "Medium Usage",
            Self::High => "High Usage",
        }
    }
}

/// Aggregate for one driver group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverGroup {
    /// Group label.
    pub label: String,
    /// Customers in the group.
    pub customers: usize,
    /// Average CLV of the group (0 when empty).
    pub avg_clv: f64,
}

/// CLV broken down by plan and by usage tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClvDrivers {
    /// One group per plan, in plan order.
    pub by_plan: Vec<DriverGroup>,
    /// One group per usage tier, low to high.
    pub by_usage: Vec<DriverGroup>,
}

/// Group customers by plan and usage tier. Every group is reported, even when empty.
#[must_use]
pub fn clv_drivers(customers: &[CustomerRecord]) -> ClvDrivers {
    let by_plan = Plan::ALL
        .iter()
        .map(|plan| group(plan.as_str(), customers, |c| c.plan == *plan))
        .collect();

    let by_usage = UsageTier::ALL
        .iter()
        .map(|tier| {
            group(tier.as_str(), customers, |c| {
                UsageTier::from_score(c.usage_score) == *tier
            })
        })
        .collect();

    ClvDrivers { by_plan, by_usage }
}

fn group<F>(label: &str, customers: &[CustomerRecord], predicate: F) -> DriverGroup
where
    F: Fn(&CustomerRecord) -> bool,
{
    let values: Vec<f64> = customers
        .iter()
        .filter(|c| predicate(c))
        .map(|c| c.clv)
        .collect();

    DriverGroup {
        label: label.to_string(),
        customers: values.len(),
        avg_clv: mean(&values),
    }
}
