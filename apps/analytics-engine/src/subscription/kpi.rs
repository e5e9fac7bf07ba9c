//! Executive subscription KPIs derived from period history.
//!
//! For the latest period against the one before it:
//! - Churn: losses / active customers
//! - GRR: `100 - churn`, floored at 0
//! - NRR: `(starting + expansion - churned) / starting`
//! - CLV: ARPU × expected lifespan

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::SubscriptionPeriod;
use crate::stats::{HUNDRED, safe_ratio};

/// Goal values the KPIs are measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiGoals {
    /// Net revenue retention goal (percent).
    pub nrr: f64,
    /// Gross revenue retention goal (percent).
    pub grr: f64,
    /// Customer lifetime value goal.
    pub clv: f64,
}

impl Default for KpiGoals {
    fn default() -> Self {
        Self {
            nrr: 110.0,
            grr: 92.0,
            clv: 1200.0,
        }
    }
}

/// Assumptions behind the KPI derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiConfig {
    /// Expansion revenue as a fraction of current revenue.
    pub expansion_rate: f64,
    /// Expected customer lifespan in periods.
    pub lifespan_months: f64,
    /// Goals.
    pub goals: KpiGoals,
}

impl Default for KpiConfig {
    fn default() -> Self {
        Self {
            expansion_rate: 0.15,
            lifespan_months: 30.0,
            goals: KpiGoals::default(),
        }
    }
}

/// A KPI value next to its goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiValue {
    /// Measured value.
    pub value: f64,
    /// Goal.
    pub goal: f64,
    /// Change against the previous period.
    pub trend: f64,
    /// Whether the goal is reached.
    pub met: bool,
}

impl KpiValue {
    fn new(value: f64, previous: f64, goal: f64) -> Self {
        Self {
            value,
            goal,
            trend: value - previous,
            met: value >= goal,
        }
    }
}

/// Derived rates for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    /// 1-based period.
    pub period: usize,
    /// Cancellations plus lapsed trials.
    pub losses: u64,
    /// Conversions per enrollment (percent).
    pub conversion_rate: f64,
    /// Losses per active customer (percent).
    pub churn_rate: f64,
    /// Revenue per active customer.
    pub arpu: f64,
}

impl From<&SubscriptionPeriod> for PeriodMetrics {
    fn from(period: &SubscriptionPeriod) -> Self {
        Self {
            period: period.period,
            losses: period.losses(),
            conversion_rate: period.conversion_rate(),
            churn_rate: period.churn_rate(),
            arpu: period.arpu(),
        }
    }
}

/// KPI summary of a subscription history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionKpis {
    /// Periods in the history.
    pub periods: usize,
    /// Active customers in the latest period.
    pub active_customers: u64,
    /// Latest churn rate (percent).
    pub churn_rate: f64,
    /// Latest conversion rate (percent).
    pub conversion_rate: f64,
    /// Expansion revenue assumed for the latest period.
    pub expansion_revenue: f64,
    /// Revenue lost to churn in the latest period.
    pub churned_revenue: f64,
    /// Net revenue retention (percent).
    pub nrr: KpiValue,
    /// Gross revenue retention (percent).
    pub grr: KpiValue,
    /// ARPU × lifespan.
    pub clv: KpiValue,
    /// Derived rates per period, in input order.
    pub series: Vec<PeriodMetrics>,
}

fn gross_retention(period: &SubscriptionPeriod) -> f64 {
    (HUNDRED - period.churn_rate()).max(0.0)
}

fn net_retention(current: &SubscriptionPeriod, starting_revenue: f64, expansion_rate: f64) -> f64 {
    let expansion = current.revenue * expansion_rate;
    let churned = current.revenue * current.churn_rate() / HUNDRED;
    safe_ratio(starting_revenue + expansion - churned, starting_revenue) * HUNDRED
}

/// Summarise `history` into executive KPIs.
///
/// The latest period is compared against the one before it; a single period
/// is compared against itself. An empty history yields zeroed KPIs.
#[must_use]
pub fn subscription_kpis(history: &[SubscriptionPeriod], config: &KpiConfig) -> SubscriptionKpis {
    let Some(current) = history.last() else {
        warn!("Empty subscription history, returning zeroed KPIs");
        return SubscriptionKpis::default();
    };
    let previous = history.len().checked_sub(2).map_or(current, |i| &history[i]);
    let before_previous = history.len().checked_sub(3).map_or(previous, |i| &history[i]);

    let nrr = net_retention(current, previous.revenue, config.expansion_rate);
    let previous_nrr = net_retention(previous, before_previous.revenue, config.expansion_rate);
    let clv = current.arpu() * config.lifespan_months;
    let previous_clv = previous.arpu() * config.lifespan_months;

    debug!(
        periods = history.len(),
        churn_rate = current.churn_rate(),
        nrr,
        clv,
        "Derived subscription KPIs"
    );

    SubscriptionKpis {
        periods: history.len(),
        active_customers: current.active_customers,
        churn_rate: current.churn_rate(),
        conversion_rate: current.conversion_rate(),
        expansion_revenue: current.revenue * config.expansion_rate,
        churned_revenue: current.revenue * current.churn_rate() / HUNDRED,
        nrr: KpiValue::new(nrr, previous_nrr, config.goals.nrr),
        grr: KpiValue::new(
            gross_retention(current),
            gross_retention(previous),
            config.goals.grr,
        ),
        clv: KpiValue::new(clv, previous_clv, config.goals.clv),
        series: history.iter().map(PeriodMetrics::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(index: usize, active: u64, losses: u64, revenue: f64) -> SubscriptionPeriod {
        SubscriptionPeriod {
            period: index,
            active_customers: active,
            enrollments: 1000,
            opportunities: 500,
            cancels: losses,
            trial_expires: 0,
            conversions: 400,
            renewals: 900,
            revenue,
        }
    }

    #[test]
    fn test_kpis_from_two_periods() {
        let history = vec![
            period(1, 10_000, 200, 100_000.0),
            period(2, 10_000, 500, 110_000.0),
        ];
        let kpis = subscription_kpis(&history, &KpiConfig::default());

        assert_eq!(kpis.periods, 2);
        assert!((kpis.churn_rate - 5.0).abs() < 1e-12);
        assert!((kpis.conversion_rate - 40.0).abs() < 1e-12);
        // GRR = 100 - churn, trend against 98%
        assert!((kpis.grr.value - 95.0).abs() < 1e-12);
        assert!((kpis.grr.trend + 3.0).abs() < 1e-12);
        assert!(kpis.grr.met);
        // NRR = (100k + 16.5k - 5.5k) / 100k
        assert!((kpis.nrr.value - 111.0).abs() < 1e-9);
        assert!(kpis.nrr.met);
        // CLV = 11 ARPU * 30 periods
        assert!((kpis.clv.value - 330.0).abs() < 1e-9);
        assert!(!kpis.clv.met);
        assert_eq!(kpis.series.len(), 2);
        assert_eq!(kpis.series[0].losses, 200);
    }

    #[test]
    fn test_single_period_compares_against_itself() {
        let history = vec![period(1, 1000, 0, 5000.0)];
        let kpis = subscription_kpis(&history, &KpiConfig::default());

        assert_eq!(kpis.grr.value, 100.0);
        assert_eq!(kpis.grr.trend, 0.0);
        assert!((kpis.nrr.value - 115.0).abs() < 1e-9);
        assert_eq!(kpis.nrr.trend, 0.0);
    }

    #[test]
    fn test_zero_customer_guards() {
        let history = vec![period(1, 0, 10, 0.0), period(2, 0, 10, 0.0)];
        let kpis = subscription_kpis(&history, &KpiConfig::default());

        assert_eq!(kpis.churn_rate, 0.0);
        assert_eq!(kpis.nrr.value, 0.0);
        assert_eq!(kpis.clv.value, 0.0);
        assert_eq!(kpis.grr.value, 100.0);
    }

    #[test]
    fn test_grr_floored_when_losses_exceed_customers() {
        let history = vec![period(1, 100, 250, 1000.0)];
        let kpis = subscription_kpis(&history, &KpiConfig::default());
        assert_eq!(kpis.grr.value, 0.0);
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(
            subscription_kpis(&[], &KpiConfig::default()),
            SubscriptionKpis::default()
        );
    }
}
