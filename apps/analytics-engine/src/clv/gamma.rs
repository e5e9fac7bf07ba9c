//! Gamma distribution fit and density.

use serde::{Deserialize, Serialize};

use crate::stats::{mean, variance};

/// Smallest coefficient of variation assumed when fitting by moments.
///
/// Keeps shape parameters finite for near-constant populations.
pub const MIN_CV: f64 = 0.05;

/// Lower bound for a fitted shape parameter.
pub const MIN_SHAPE: f64 = 0.05;

/// Upper bound for a fitted shape parameter.
pub const MAX_SHAPE: f64 = 1_000.0;

/// Shape used when the population has no positive mean.
pub const DEFAULT_SHAPE: f64 = 2.5;

/// Method-of-moments shape `mean² / var`.
///
/// `None` when the mean is not positive. The variance is floored at
/// `(mean * MIN_CV)²` and the result is clamped to `[MIN_SHAPE, MAX_SHAPE]`.
#[must_use]
pub fn moment_shape(mean: f64, variance: f64) -> Option<f64> {
    if !mean.is_finite() || !variance.is_finite() || mean <= 0.0 {
        return None;
    }
    let floor = (mean * MIN_CV).powi(2);
    let var = variance.max(floor);
    Some((mean * mean / var).clamp(MIN_SHAPE, MAX_SHAPE))
}

/// Gamma(shape, scale) fit of a value distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GammaFit {
    /// Shape parameter (k).
    pub shape: f64,
    /// Scale parameter (theta).
    pub scale: f64,
}

impl Default for GammaFit {
    fn default() -> Self {
        Self {
            shape: DEFAULT_SHAPE,
            scale: 1.0,
        }
    }
}

impl GammaFit {
    /// Fit by moments. Both parameters are strictly positive.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        let avg = mean(values);
        match moment_shape(avg, variance(values)) {
            Some(shape) => Self {
                shape,
                scale: avg / shape,
            },
            None => Self::default(),
        }
    }

    /// Distribution mean (`shape * scale`).
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.shape * self.scale
    }

    /// Density at `x`.
    #[must_use]
    pub fn pdf(&self, x: f64) -> f64 {
        gamma_pdf(x, self.shape, self.scale)
    }
}

/// Gamma probability density with shape `k` and scale `theta`.
///
/// Evaluated in log space via `lgamma`. Zero outside the support or for
/// non-positive parameters.
#[must_use]
pub fn gamma_pdf(x: f64, shape: f64, scale: f64) -> f64 {
    if shape <= 0.0 || scale <= 0.0 || !x.is_finite() || x < 0.0 {
        return 0.0;
    }
    if x == 0.0 {
        // Exact for shape >= 1; the density diverges for shape < 1 and 0 stands in
        return if shape == 1.0 { 1.0 / scale } else { 0.0 };
    }

    let log_pdf =
        (shape - 1.0) * x.ln() - x / scale - shape * scale.ln() - libm::lgamma(shape);
    let pdf = log_pdf.exp();
    if pdf.is_finite() { pdf } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_at_origin() {
        assert_eq!(gamma_pdf(0.0, 2.5, 3.0), 0.0);
        // Diverges for shape < 1; reported as 0
        assert_eq!(gamma_pdf(0.0, 0.5, 3.0), 0.0);
        assert!(gamma_pdf(1e-6, 0.5, 3.0) > gamma_pdf(1e-3, 0.5, 3.0));
    }

    #[test]
    fn test_exponential_special_case() {
        // shape 1 is the exponential distribution: f(x) = exp(-x/theta)/theta
        let pdf = gamma_pdf(2.0, 1.0, 4.0);
        assert!((pdf - (-0.5_f64).exp() / 4.0).abs() < 1e-12);
        assert_eq!(gamma_pdf(0.0, 1.0, 4.0), 0.25);
    }

    #[test]
    fn test_pdf_integrates_to_one() {
        let fit = GammaFit {
            shape: 3.0,
            scale: 500.0,
        };
        let step = 1.0;
        let area: f64 = (0..20_000).map(|i| fit.pdf(f64::from(i) * step + 0.5) * step).sum();
        assert!((area - 1.0).abs() < 1e-3, "area {area}");
    }

    #[test]
    fn test_invalid_inputs_are_zero() {
        assert_eq!(gamma_pdf(-1.0, 2.0, 1.0), 0.0);
        assert_eq!(gamma_pdf(1.0, 0.0, 1.0), 0.0);
        assert_eq!(gamma_pdf(1.0, 2.0, -1.0), 0.0);
        assert_eq!(gamma_pdf(f64::NAN, 2.0, 1.0), 0.0);
    }

    #[test]
    fn test_fit_recovers_moments() {
        let values = [1000.0, 2000.0, 3000.0, 4000.0];
        let fit = GammaFit::from_values(&values);
        assert!((fit.mean() - 2500.0).abs() < 1e-9);
        assert!(fit.shape > 0.0 && fit.scale > 0.0);
    }

    #[test]
    fn test_fit_degenerate_population() {
        assert_eq!(GammaFit::from_values(&[]), GammaFit::default());
        assert_eq!(GammaFit::from_values(&[0.0, 0.0]), GammaFit::default());

        let constant = GammaFit::from_values(&[50.0; 10]);
        assert!((constant.shape - 1.0 / (MIN_CV * MIN_CV)).abs() < 1e-9);
        assert!(constant.scale > 0.0);
    }
}
