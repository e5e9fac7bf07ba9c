//! Weibull revenue survival.
//!
//! The share of revenue still retained after `t` periods follows
//! `S(t) = exp(-(t/scale)^shape)` with hazard
//! `h(t) = (shape/scale) * (t/scale)^(shape-1)`. Shape above 1 means churn
//! risk rises with tenure, below 1 that it falls.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::stats::HUNDRED;

/// Parameters of the revenue survival curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalConfig {
    /// Weibull shape (k).
    pub shape: f64,
    /// Weibull scale (lambda), in periods.
    pub scale: f64,
    /// Number of periods to project.
    pub periods: usize,
    /// Revenue of the starting cohort per period.
    pub base_revenue: f64,
    /// Linear expansion of cohort revenue per period (0.03 = 3%).
    pub revenue_growth: f64,
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            shape: 1.8,
            scale: 24.0,
            periods: 36,
            base_revenue: 50_000.0,
            revenue_growth: 0.03,
        }
    }
}

/// Survival and revenue exposure for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalPoint {
    /// 1-based period.
    pub period: usize,
    /// Surviving share of revenue (percent).
    pub survival: f64,
    /// Instantaneous churn hazard (percent per period).
    pub hazard: f64,
    /// Expanded revenue still retained and exposed to churn.
    pub revenue_at_risk: f64,
    /// Expanded revenue lost to churn so far.
    pub cumulative_revenue_lost: f64,
}

/// Projected revenue survival.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurvivalCurve {
    /// Period at which half the revenue has churned.
    pub median_lifetime: f64,
    /// One point per period.
    pub points: Vec<SurvivalPoint>,
}

fn valid_parameters(shape: f64, scale: f64) -> bool {
    shape > 0.0 && scale > 0.0 && shape.is_finite() && scale.is_finite()
}

/// Weibull survival function `S(t)` as a fraction.
///
/// Returns 1 for `t <= 0` and 0 for invalid parameters.
#[must_use]
pub fn weibull_survival(shape: f64, scale: f64, t: f64) -> f64 {
    if !valid_parameters(shape, scale) {
        return 0.0;
    }
    if t <= 0.0 {
        return 1.0;
    }
    (-(t / scale).powf(shape)).exp()
}

/// Weibull hazard `h(t)`.
///
/// At `t <= 0` the hazard is `1/scale` for shape 1 and 0 otherwise; for
/// shape below 1 the true value diverges and 0 is the sentinel. Invalid
/// parameters give 0.
#[must_use]
pub fn weibull_hazard(shape: f64, scale: f64, t: f64) -> f64 {
    if !valid_parameters(shape, scale) {
        return 0.0;
    }
    if t <= 0.0 {
        return if shape == 1.0 { 1.0 / scale } else { 0.0 };
    }
    let hazard = (shape / scale) * (t / scale).powf(shape - 1.0);
    if hazard.is_finite() { hazard } else { 0.0 }
}

/// Period at which `S(t) = 0.5`: `scale * ln(2)^(1/shape)`.
#[must_use]
pub fn median_lifetime(shape: f64, scale: f64) -> f64 {
    if !valid_parameters(shape, scale) {
        return 0.0;
    }
    scale * std::f64::consts::LN_2.powf(1.0 / shape)
}

/// Project revenue survival for `config.periods` periods.
///
/// Invalid parameters yield an empty curve.
#[must_use]
pub fn survival_curve(config: &SurvivalConfig) -> SurvivalCurve {
    let valid = valid_parameters(config.shape, config.scale)
        && config.base_revenue.is_finite()
        && config.revenue_growth.is_finite();
    if !valid {
        warn!(
            shape = config.shape,
            scale = config.scale,
            base_revenue = config.base_revenue,
            "Invalid survival parameters, returning empty curve"
        );
        return SurvivalCurve::default();
    }

    let points = (1..=config.periods)
        .map(|period| {
            let t = period as f64;
            let survival = weibull_survival(config.shape, config.scale, t);
            let expanded = config.base_revenue * (1.0 + t * config.revenue_growth);
            SurvivalPoint {
                period,
                survival: survival * HUNDRED,
                hazard: weibull_hazard(config.shape, config.scale, t) * HUNDRED,
                revenue_at_risk: survival * expanded,
                cumulative_revenue_lost: (1.0 - survival) * expanded,
            }
        })
        .collect();

    SurvivalCurve {
        median_lifetime: median_lifetime(config.shape, config.scale),
        points,
    }
}
