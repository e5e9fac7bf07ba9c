//! Shannon entropy of revenue shares.

use crate::domain::{CustomerRecord, Plan};

use super::constants::EPSILON;
use super::math::safe_ratio;
use super::types::{EntropyReport, PlanShare};

/// Shannon entropy (bits) of a set of non-negative weights.
///
/// Weights are normalised to shares; non-positive weights contribute nothing.
#[must_use]
pub fn shannon_entropy(weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= EPSILON {
        return 0.0;
    }

    let entropy = -weights
        .iter()
        .filter(|w| **w > 0.0)
        .map(|w| {
            let p = w / total;
            p * p.log2()
        })
        .sum::<f64>();

    entropy.max(0.0)
}

/// Revenue diversification across subscription plans.
#[must_use]
pub fn plan_entropy(customers: &[CustomerRecord]) -> EntropyReport {
    let revenue_by_plan: Vec<(Plan, f64, usize)> = Plan::ALL
        .iter()
        .map(|&plan| {
            let on_plan = customers.iter().filter(|c| c.plan == plan);
            let (revenue, count) =
                on_plan.fold((0.0, 0usize), |(sum, n), c| (sum + c.clv.max(0.0), n + 1));
            (plan, revenue, count)
        })
        .collect();

    let total: f64 = revenue_by_plan.iter().map(|(_, r, _)| r).sum();
    let weights: Vec<f64> = revenue_by_plan.iter().map(|(_, r, _)| *r).collect();
    let entropy = shannon_entropy(&weights);
    let max_entropy = (Plan::ALL.len() as f64).log2();

    EntropyReport {
        shares: revenue_by_plan
            .into_iter()
            .map(|(plan, revenue, count)| PlanShare {
                plan,
                revenue,
                count,
                share: safe_ratio(revenue, total),
            })
            .collect(),
        entropy,
        max_entropy,
        diversification_index: safe_ratio(entropy, max_entropy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn customer(plan: Plan, clv: f64) -> CustomerRecord {
        CustomerRecord {
            id: Uuid::new_v4(),
            clv,
            frequency: 1.0,
            monetary: 1.0,
            retention: 80.0,
            plan,
            usage_score: 50.0,
        }
    }

    #[test]
    fn test_shannon_entropy_uniform() {
        let h = shannon_entropy(&[1.0, 1.0, 1.0, 1.0]);
        assert!((h - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_shannon_entropy_degenerate() {
        assert_eq!(shannon_entropy(&[]), 0.0);
        assert_eq!(shannon_entropy(&[0.0, 0.0]), 0.0);
        assert_eq!(shannon_entropy(&[5.0]), 0.0);
    }

    #[test]
    fn test_plan_entropy_even_split_is_fully_diversified() {
        let customers = vec![
            customer(Plan::Basic, 100.0),
            customer(Plan::Pro, 100.0),
            customer(Plan::Enterprise, 100.0),
        ];
        let report = plan_entropy(&customers);

        assert!((report.diversification_index - 1.0).abs() < 1e-12);
        assert_eq!(report.shares.len(), 3);
        assert!(report.shares.iter().all(|s| s.count == 1));
    }

    #[test]
    fn test_plan_entropy_single_plan() {
        let customers = vec![customer(Plan::Pro, 100.0), customer(Plan::Pro, 50.0)];
        let report = plan_entropy(&customers);

        assert_eq!(report.entropy, 0.0);
        assert_eq!(report.diversification_index, 0.0);
        assert_eq!(report.shares[1].share, 1.0);
    }

    #[test]
    fn test_plan_entropy_empty() {
        let report = plan_entropy(&[]);
        assert_eq!(report.entropy, 0.0);
        assert!(report.shares.iter().all(|s| s.share == 0.0));
    }
}
