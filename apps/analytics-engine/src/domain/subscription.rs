//! Per-period subscription activity.

use serde::{Deserialize, Serialize};

use crate::stats::{HUNDRED, safe_ratio};

/// Subscription funnel counts and revenue for one reporting period.
///
/// Serializes in camelCase like [`super::CustomerRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPeriod {
    /// 1-based period index.
    pub period: usize,
    /// Paying customers at the end of the period.
    pub active_customers: u64,
    /// New trial or plan enrollments.
    pub enrollments: u64,
    /// Open sales opportunities.
    pub opportunities: u64,
    /// Voluntary cancellations.
    pub cancels: u64,
    /// Trials that lapsed without converting.
    pub trial_expires: u64,
    /// Enrollments converted to paid.
    pub conversions: u64,
    /// Subscriptions renewed.
    pub renewals: u64,
    /// Revenue booked in the period.
    pub revenue: f64,
}

impl SubscriptionPeriod {
    /// Cancellations plus lapsed trials.
    #[must_use]
    pub const fn losses(&self) -> u64 {
        self.cancels + self.trial_expires
    }

    /// Conversions as a percentage of enrollments; 0 without enrollments.
    #[must_use]
    pub fn conversion_rate(&self) -> f64 {
        safe_ratio(self.conversions as f64, self.enrollments as f64) * HUNDRED
    }

    /// Losses as a percentage of active customers; 0 without customers.
    #[must_use]
    pub fn churn_rate(&self) -> f64 {
        safe_ratio(self.losses() as f64, self.active_customers as f64) * HUNDRED
    }

    /// Revenue per active customer; 0 without customers.
    #[must_use]
    pub fn arpu(&self) -> f64 {
        safe_ratio(self.revenue, self.active_customers as f64)
    }
}
