//! Customer record shape shared by every analysis.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    /// Entry tier.
    Basic,
    /// Mid tier.
    Pro,
    /// Top tier.
    Enterprise,
}

impl Plan {
    /// All plans in display order.
    pub const ALL: [Self; 3] = [Self::Basic, Self::Pro, Self::Enterprise];

    /// Get the plan name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Pro => "Pro",
            Self::Enterprise => "Enterprise",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single customer as supplied by the data source.
///
/// Read-only to the analytics core. Field names serialize in camelCase to
/// match the dashboard's record contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    /// Customer identifier.
    pub id: Uuid,
    /// Customer lifetime value (currency).
    pub clv: f64,
    /// Purchases per period.
    pub frequency: f64,
    /// Average spend per transaction (currency).
    pub monetary: f64,
    /// Retention rate as a percentage (0-100).
    pub retention: f64,
    /// Subscription plan.
    pub plan: Plan,
    /// Product usage score (0-100).
    pub usage_score: f64,
}

impl CustomerRecord {
    /// Retention as a fraction (0.0-1.0).
    #[must_use]
    pub fn retention_rate(&self) -> f64 {
        self.retention / 100.0
    }
}

/// Extract CLV values in input order.
#[must_use]
pub fn clv_values(customers: &[CustomerRecord]) -> Vec<f64> {
    customers.iter().map(|c| c.clv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_camel_case() {
        let record = CustomerRecord {
            id: Uuid::nil(),
            clv: 1200.0,
            frequency: 4.0,
            monetary: 75.0,
            retention: 88.0,
            plan: Plan::Pro,
            usage_score: 61.5,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["usageScore"], 61.5);
        assert_eq!(json["plan"], "Pro");
    }

    #[test]
    fn test_retention_rate() {
        let record = CustomerRecord {
            id: Uuid::nil(),
            clv: 0.0,
            frequency: 0.0,
            monetary: 0.0,
            retention: 85.0,
            plan: Plan::Basic,
            usage_score: 0.0,
        };
        assert!((record.retention_rate() - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_plan_display() {
        assert_eq!(Plan::Enterprise.to_string(), "Enterprise");
        assert_eq!(Plan::ALL.len(), 3);
    }
}
