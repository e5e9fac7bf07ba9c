//! Forward CLV prediction band.

use serde::{Deserialize, Serialize};

/// z-score of a two-sided 95% interval.
const Z_95: f64 = 1.96;

/// Predicted CLV for one future period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    /// 1-based period.
    pub period: usize,
    /// Central prediction.
    pub predicted: f64,
    /// Upper 95% bound.
    pub upper: f64,
    /// Lower 95% bound (never negative).
    pub lower: f64,
}

/// Linear-growth prediction whose uncertainty widens with `sqrt(period)`.
#[must_use]
pub fn prediction_band(
    base_clv: f64,
    periods: usize,
    growth: f64,
    uncertainty: f64,
) -> Vec<PredictionPoint> {
    if !base_clv.is_finite() || !growth.is_finite() || !uncertainty.is_finite() {
        return Vec::new();
    }

    (0..periods)
        .map(|i| {
            let step = i as f64;
            let predicted = base_clv * (1.0 + step * growth);
            let spread = uncertainty.abs() * predicted.abs() * (step + 1.0).sqrt();
            PredictionPoint {
                period: i + 1,
                predicted,
                upper: predicted + Z_95 * spread,
                lower: (predicted - Z_95 * spread).max(0.0),
            }
        })
        .collect()
}
