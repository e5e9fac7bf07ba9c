//! Bass diffusion adoption curve.
//!
//! Cumulative adopters follow the closed-form Bass solution
//! `N(t) = m * (1 - e^{-(p+q)t}) / (1 + (q/p) e^{-(p+q)t})`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::stats::{HUNDRED, safe_ratio};

/// Parameters of the Bass model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BassConfig {
    /// Coefficient of innovation (p).
    pub innovation: f64,
    /// Coefficient of imitation (q).
    pub imitation: f64,
    /// Market potential (m), in adopters.
    pub market_size: f64,
    /// Number of periods to project.
    pub periods: usize,
    /// Revenue attributed to each adopter.
    pub revenue_per_adopter: f64,
}

impl Default for BassConfig {
    fn default() -> Self {
        Self {
            innovation: 0.03,
            imitation: 0.38,
            market_size: 10_000.0,
            periods: 24,
            revenue_per_adopter: 150.0,
        }
    }
}

/// Projected adoption for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BassPoint {
    /// 1-based period.
    pub period: usize,
    /// Cumulative adopters at the end of the period.
    pub cumulative_adopters: f64,
    /// Cumulative adopters as a percentage of the market.
    pub adoption_rate: f64,
    /// Revenue from all adopters so far.
    pub cumulative_revenue: f64,
    /// Revenue from adopters gained this period.
    pub period_revenue: f64,
    /// New adopters as a percentage of cumulative adopters (0 in period 1).
    pub growth_rate: f64,
    /// Cumulative adopters driven by innovation.
    pub innovators: f64,
    /// Cumulative adopters driven by imitation.
    pub imitators: f64,
}

/// Cumulative adopters at time `t`.
#[must_use]
pub fn bass_adopters(config: &BassConfig, t: f64) -> f64 {
    let p = config.innovation;
    let q = config.imitation;
    let decay = (-(p + q) * t).exp();
    config.market_size * (1.0 - decay) / (1.0 + (q / p) * decay)
}

/// Project the adoption curve.
///
/// New adopters in each period are split between innovators and imitators in
/// proportion to `p` and `q * F`, where `F` is the adopted fraction at the
/// start of the period. Invalid parameters yield an empty curve.
#[must_use]
pub fn bass_diffusion(config: &BassConfig) -> Vec<BassPoint> {
    let valid = config.innovation > 0.0
        && config.imitation >= 0.0
        && config.market_size > 0.0
        && config.innovation.is_finite()
        && config.imitation.is_finite()
        && config.market_size.is_finite()
        && config.revenue_per_adopter.is_finite();
    if !valid {
        warn!(
            innovation = config.innovation,
            imitation = config.imitation,
            market_size = config.market_size,
            "Invalid Bass parameters, returning empty curve"
        );
        return Vec::new();
    }

    let mut innovators = 0.0;
    let mut imitators = 0.0;

    (1..=config.periods)
        .map(|period| {
            let t = period as f64;
            let previous = bass_adopters(config, t - 1.0);
            let cumulative = bass_adopters(config, t);
            let new_adopters = cumulative - previous;

            let adopted_fraction = previous / config.market_size;
            let innovation_weight = config.innovation;
            let imitation_weight = config.imitation * adopted_fraction;
            let innovator_share =
                innovation_weight / (innovation_weight + imitation_weight);
            innovators += new_adopters * innovator_share;
            imitators += new_adopters * (1.0 - innovator_share);

            BassPoint {
                period,
                cumulative_adopters: cumulative,
                adoption_rate: cumulative / config.market_size * HUNDRED,
                cumulative_revenue: cumulative * config.revenue_per_adopter,
                period_revenue: new_adopters * config.revenue_per_adopter,
                growth_rate: if period == 1 {
                    0.0
                } else {
                    safe_ratio(new_adopters, cumulative) * HUNDRED
                },
                innovators,
                imitators,
            }
        })
        .collect()
}
