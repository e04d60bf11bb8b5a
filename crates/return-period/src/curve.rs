//! Per-unit value → return period interpolation curves.

use serde::{Deserialize, Serialize};

/// Return period assigned to values strictly below a curve's smallest sample.
pub const LOWER_FILL_RP: f64 = 1.0;

/// Sorted `(value, RP)` samples of one unit.
///
/// Values are strictly increasing. When the source sample contains tied
/// values, only the smallest of their return periods is kept.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RpCurve {
    values: Vec<f64>,
    return_periods: Vec<f64>,
}

impl RpCurve {
    /// Builds a curve from aligned `values` and `return_periods` in any
    /// order. Pairs with a `NaN` value are skipped.
    pub fn from_pairs(values: &[f64], return_periods: &[f64]) -> Self {
        let mut pairs: Vec<(f64, f64)> = values
            .iter()
            .copied()
            .zip(return_periods.iter().copied())
            .filter(|(v, _)| !v.is_nan())
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        pairs.dedup_by(|later, kept| later.0 == kept.0);

        let (values, return_periods) = pairs.into_iter().unzip();
        Self {
            values,
            return_periods,
        }
    }

    /// Sample values, strictly increasing.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Return periods aligned with [`values`](Self::values).
    pub fn return_periods(&self) -> &[f64] {
        &self.return_periods
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` if the curve has no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Return period of `x` on `curve` by linear interpolation between samples.
///
/// - `x` below the smallest sample: [`LOWER_FILL_RP`]
/// - `x` above the largest sample: `NaN` (no extrapolation)
/// - `x` equal to a sample: that sample's RP
/// - `x` `NaN` or an empty curve: `NaN`
pub fn interpolate(curve: &RpCurve, x: f64) -> f64 {
    let (xs, ys) = (&curve.values, &curve.return_periods);
    let (Some(&lo), Some(&hi)) = (xs.first(), xs.last()) else {
        return f64::NAN;
    };
    if x.is_nan() || x > hi {
        return f64::NAN;
    }
    if x < lo {
        return LOWER_FILL_RP;
    }

    let i = xs.partition_point(|&v| v < x);
    if xs[i] == x {
        return ys[i];
    }
    // lo < x < xs[i], so i >= 1.
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}
