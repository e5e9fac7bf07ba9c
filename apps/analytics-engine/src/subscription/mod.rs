//! Subscription metrics.
//!
//! Funnel rates per period and the executive KPIs (churn, conversion, NRR,
//! GRR, CLV) derived from a [`crate::domain::SubscriptionPeriod`] history.

mod kpi;

pub use kpi::{KpiConfig, KpiGoals, KpiValue, PeriodMetrics, SubscriptionKpis, subscription_kpis};
