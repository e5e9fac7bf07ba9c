//! Fixed-size cohorts over the input order.

use serde::{Deserialize, Serialize};

use crate::domain::CustomerRecord;
use crate::stats::mean;

/// Averages for one cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    /// Cohort label (`Cohort 1`, `Cohort 2`, ...).
    pub name: String,
    /// Customers in the cohort.
    pub customers: usize,
    /// Average CLV.
    pub avg_clv: f64,
    /// Average retention (percent).
    pub avg_retention: f64,
}

/// Split customers into consecutive cohorts of `size` records.
///
/// The last cohort may be smaller. A size of zero yields no cohorts.
#[must_use]
pub fn cohort_summary(customers: &[CustomerRecord], size: usize) -> Vec<CohortSummary> {
    if size == 0 {
        return Vec::new();
    }

    customers
        .chunks(size)
        .enumerate()
        .map(|(i, chunk)| {
            let clv: Vec<f64> = chunk.iter().map(|c| c.clv).collect();
            let retention: Vec<f64> = chunk.iter().map(|c| c.retention).collect();
            CohortSummary {
                name: format!("Cohort {}", i + 1),
                customers: chunk.len(),
                avg_clv: mean(&clv),
                avg_retention: mean(&retention),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Plan;
    use uuid::Uuid;

    fn customers(n: usize) -> Vec<CustomerRecord> {
        (0..n)
            .map(|i| CustomerRecord {
                id: Uuid::new_v4(),
                clv: (i + 1) as f64 * 100.0,
                frequency: 1.0,
                monetary: 1.0,
                retention: 80.0,
                plan: Plan::Pro,
                usage_score: 50.0,
            })
            .collect()
    }

    #[test]
    fn test_cohorts_follow_input_order() {
        let cohorts = cohort_summary(&customers(25), 10);

        assert_eq!(cohorts.len(), 3);
        assert_eq!(cohorts[0].name, "Cohort 1");
        assert_eq!(cohorts[0].customers, 10);
        assert_eq!(cohorts[0].avg_clv, 550.0);
        assert_eq!(cohorts[2].customers, 5);
        assert_eq!(cohorts[2].avg_clv, 2300.0);
        assert_eq!(cohorts[1].avg_retention, 80.0);
    }

    #[test]
    fn test_zero_size_and_empty() {
        assert!(cohort_summary(&customers(5), 0).is_empty());
        assert!(cohort_summary(&[], 10).is_empty());
    }
}
