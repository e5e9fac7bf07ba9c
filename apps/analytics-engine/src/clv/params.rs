//! BG/NBD and Gamma-Gamma parameter summaries.
//!
//! These are method-of-moments summaries for display, not maximum-likelihood
//! estimates from transaction logs. Every parameter is strictly positive.

use serde::{Deserialize, Serialize};

use crate::domain::CustomerRecord;
use crate::stats::{mean, variance};

use super::gamma::moment_shape;

/// Beta concentration (`a + b`) used when dropout variance is degenerate.
pub const DEFAULT_BETA_CONCENTRATION: f64 = 10.0;

/// Upper bound on the Beta concentration.
const MAX_BETA_CONCENTRATION: f64 = 10_000.0;

/// Dropout probabilities are clamped into `[MIN_DROPOUT, 1 - MIN_DROPOUT]`.
const MIN_DROPOUT: f64 = 0.001;

/// BG/NBD purchase-frequency and dropout heterogeneity.
///
/// Purchase rates follow Gamma(`r`, `alpha`) (alpha is a rate); the per-period
/// dropout probability follows Beta(`a`, `b`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BgNbdParams {
    /// Shape of the purchase-rate Gamma.
    pub r: f64,
    /// Rate of the purchase-rate Gamma.
    pub alpha: f64,
    /// Beta dropout parameter a.
    pub a: f64,
    /// Beta dropout parameter b.
    pub b: f64,
}

impl Default for BgNbdParams {
    fn default() -> Self {
        Self {
            r: 1.0,
            alpha: 4.0,
            a: 0.75,
            b: 3.0,
        }
    }
}

impl BgNbdParams {
    /// Summarise purchase frequencies and retention percentages.
    #[must_use]
    pub fn estimate(frequencies: &[f64], retention_pct: &[f64]) -> Self {
        let defaults = Self::default();

        let freq_mean = mean(frequencies);
        let (r, alpha) = match moment_shape(freq_mean, variance(frequencies)) {
            Some(r) => (r, r / freq_mean),
            None => (defaults.r, defaults.alpha),
        };

        let (a, b) = if retention_pct.is_empty() {
            (defaults.a, defaults.b)
        } else {
            let dropouts: Vec<f64> = retention_pct
                .iter()
                .map(|pct| 1.0 - (pct / 100.0).clamp(0.0, 1.0))
                .collect();
            beta_moments(mean(&dropouts), variance(&dropouts))
        };

        Self { r, alpha, a, b }
    }

    /// Population mean purchase rate (`r / alpha`).
    #[must_use]
    pub fn mean_purchase_rate(&self) -> f64 {
        self.r / self.alpha
    }

    /// Population mean dropout probability (`a / (a + b)`).
    #[must_use]
    pub fn mean_dropout_probability(&self) -> f64 {
        self.a / (self.a + self.b)
    }
}

fn beta_moments(m: f64, v: f64) -> (f64, f64) {
    let m = m.clamp(MIN_DROPOUT, 1.0 - MIN_DROPOUT);
    let concentration = if v > 0.0 {
        let k = m * (1.0 - m) / v - 1.0;
        if k.is_finite() && k > 0.0 {
            k.min(MAX_BETA_CONCENTRATION)
        } else {
            DEFAULT_BETA_CONCENTRATION
        }
    } else {
        DEFAULT_BETA_CONCENTRATION
    };
    (m * concentration, (1.0 - m) * concentration)
}

/// Gamma-Gamma monetary-value heterogeneity.
///
/// Spend per transaction is Gamma(`p`, nu) with nu ~ Gamma(`q`, `gamma`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GammaGammaParams {
    /// Individual-level spend shape.
    pub p: f64,
    /// Population shape of the spend rate.
    pub q: f64,
    /// Population scale of the spend rate.
    pub gamma: f64,
}

impl Default for GammaGammaParams {
    fn default() -> Self {
        Self {
            p: 6.0,
            q: 4.4,
            gamma: 18.0,
        }
    }
}

impl GammaGammaParams {
    /// Summarise average spend per transaction.
    ///
    /// `p = mean²/var`, `q = p + 2`, and `gamma` is chosen so the implied
    /// expected spend equals the observed mean.
    #[must_use]
    pub fn estimate(monetary: &[f64]) -> Self {
        let avg = mean(monetary);
        match moment_shape(avg, variance(monetary)) {
            Some(p) => {
                let q = p + 2.0;
                Self {
                    p,
                    q,
                    gamma: avg * (q - 1.0) / p,
                }
            }
            None => Self::default(),
        }
    }

    /// Expected spend per transaction implied by the parameters.
    #[must_use]
    pub fn expected_spend(&self) -> f64 {
        self.p * self.gamma / (self.q - 1.0)
    }
}

/// Both model parameter sets for one dataset snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Purchase frequency and dropout.
    pub bgnbd: BgNbdParams,
    /// Monetary value.
    pub gamma_gamma: GammaGammaParams,
}

impl ModelParameters {
    /// Estimate both parameter sets from customer records.
    #[must_use]
    pub fn estimate(customers: &[CustomerRecord]) -> Self {
        let frequencies: Vec<f64> = customers.iter().map(|c| c.frequency).collect();
        let retention: Vec<f64> = customers.iter().map(|c| c.retention).collect();
        let monetary: Vec<f64> = customers.iter().map(|c| c.monetary).collect();

        Self {
            bgnbd: BgNbdParams::estimate(&frequencies, &retention),
            gamma_gamma: GammaGammaParams::estimate(&monetary),
        }
    }

    /// Whether every parameter is a strictly positive finite number.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [
            self.bgnbd.r,
            self.bgnbd.alpha,
            self.bgnbd.a,
            self.bgnbd.b,
            self.gamma_gamma.p,
            self.gamma_gamma.q,
            self.gamma_gamma.gamma,
        ]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0)
    }
}
