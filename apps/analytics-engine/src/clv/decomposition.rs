//! Classic CLV formula, its decomposition, and customer equity.

use serde::{Deserialize, Serialize};

use crate::domain::CustomerRecord;
use crate::stats::{mean, safe_ratio};

/// `frequency * monetary * r / (1 - r)`.
///
/// `retention_rate` is a fraction and is capped at `max_retention` so the
/// result stays finite. Non-positive retention yields zero.
#[must_use]
pub fn classic_clv(frequency: f64, monetary: f64, retention_rate: f64, max_retention: f64) -> f64 {
    let cap = max_retention.clamp(0.0, 0.999_999);
    let r = retention_rate.clamp(0.0, cap);
    if r <= 0.0 {
        return 0.0;
    }
    let clv = frequency * monetary * r / (1.0 - r);
    if clv.is_finite() { clv } else { 0.0 }
}

/// Population averages feeding the classic CLV formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClvDecomposition {
    /// Mean purchase frequency.
    pub frequency: f64,
    /// Mean spend per transaction.
    pub monetary: f64,
    /// Mean retention (percent).
    pub retention: f64,
    /// CLV implied by the averages.
    pub calculated_clv: f64,
}

/// Decompose the population CLV into its frequency, monetary, and retention drivers.
#[must_use]
pub fn decompose(customers: &[CustomerRecord], max_retention: f64) -> ClvDecomposition {
    if customers.is_empty() {
        return ClvDecomposition::default();
    }

    let frequency = mean(&customers.iter().map(|c| c.frequency).collect::<Vec<_>>());
    let monetary = mean(&customers.iter().map(|c| c.monetary).collect::<Vec<_>>());
    let retention = mean(&customers.iter().map(|c| c.retention).collect::<Vec<_>>());
    let retention_rate = mean(
        &customers
            .iter()
            .map(CustomerRecord::retention_rate)
            .collect::<Vec<_>>(),
    );

    ClvDecomposition {
        frequency,
        monetary,
        retention,
        calculated_clv: classic_clv(frequency, monetary, retention_rate, max_retention),
    }
}

/// Discounted value of the whole customer base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerEquity {
    /// Sum of customer CLV.
    pub total_clv: f64,
    /// Mean retention (percent).
    pub avg_retention: f64,
    /// Discount rate applied.
    pub discount_rate: f64,
    /// `total_clv * r / (1 + d - r)`.
    pub equity: f64,
}

/// Customer equity with retention capped at `max_retention`.
#[must_use]
pub fn customer_equity(
    customers: &[CustomerRecord],
    discount_rate: f64,
    max_retention: f64,
) -> CustomerEquity {
    let total_clv: f64 = customers.iter().map(|c| c.clv).sum();
    let avg_retention = mean(&customers.iter().map(|c| c.retention).collect::<Vec<_>>());
    let retention_rate = mean(
        &customers
            .iter()
            .map(CustomerRecord::retention_rate)
            .collect::<Vec<_>>(),
    );
    let r = retention_rate.clamp(0.0, max_retention.clamp(0.0, 1.0));
    let d = discount_rate.max(0.0);

    CustomerEquity {
        total_clv,
        avg_retention,
        discount_rate: d,
        equity: safe_ratio(total_clv * r, 1.0 + d - r),
    }
}
