//! Equal-width histogram binning.

use super::types::HistogramBin;

/// Bin `values` into `bins` equal-width buckets spanning the observed range.
///
/// The last bin is closed on the right. When every value is equal the bins
/// get unit width and all values land in the first one.
#[must_use]
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (min, max) = finite
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    let width = if range > 0.0 { range / bins as f64 } else { 1.0 };

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = bin_index(v, min, width, bins);
        result[idx].count += 1;
    }

    result
}

/// Index of the bin holding `value`, clamped into `0..bins`.
fn bin_index(value: f64, min: f64, width: f64, bins: usize) -> usize {
    let raw = ((value - min) / width).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(bins - 1)
    }
}
