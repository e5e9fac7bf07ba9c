//! Zipf (power-law) fit of ranked values.

use super::constants::EPSILON;
use super::math::sorted_descending;
use super::types::{ZipfFit, ZipfPoint};

/// Default number of top-ranked values used in the fit.
pub const DEFAULT_ZIPF_TOP_N: usize = 100;

/// Fit `ln(value) = c - s * ln(rank)` over the `top_n` largest positive values.
///
/// Returns `exponent = s` and the squared Pearson correlation of the log-log
/// points. Fewer than two points, or a flat axis, yields a zero fit.
#[must_use]
pub fn zipf_fit(values: &[f64], top_n: usize) -> ZipfFit {
    let positive: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    let ranked = sorted_descending(&positive);

    let Some(&top) = ranked.first() else {
        return ZipfFit::default();
    };

    let points: Vec<ZipfPoint> = ranked
        .iter()
        .take(top_n)
        .enumerate()
        .map(|(i, &value)| {
            let rank = i + 1;
            ZipfPoint {
                rank,
                value,
                expected: top / rank as f64,
                log_rank: (rank as f64).ln(),
                log_value: value.ln(),
            }
        })
        .collect();

    let (exponent, r_squared) = log_log_regression(&points);

    ZipfFit {
        exponent,
        r_squared,
        points,
    }
}

fn log_log_regression(points: &[ZipfPoint]) -> (f64, f64) {
    if points.len() < 2 {
        return (0.0, 0.0);
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.log_rank).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.log_value).sum::<f64>() / n;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for p in points {
        let dx = p.log_rank - mean_x;
        let dy = p.log_value - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx <= EPSILON {
        return (0.0, 0.0);
    }

    let slope = sxy / sxx;
    let r_squared = if syy <= EPSILON {
        0.0
    } else {
        let r = sxy / (sxx * syy).sqrt();
        (r * r).clamp(0.0, 1.0)
    };

    (-slope, r_squared)
}
