//! Wilson–Hilferty transform between Pearson III frequency factors and
//! standard normal quantiles.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::ReturnPeriodError;
use crate::lp3::pearson3::NORMAL_SKEW_THRESHOLD;

/// Standard normal quantile `q` of frequency factor `k` under skew `g`.
///
/// Uses the real cube root, so factors below `-2/g` (positive skew) still
/// map to a finite quantile.
pub(crate) fn normal_quantile(k: f64, g: f64) -> f64 {
    if g.abs() < NORMAL_SKEW_THRESHOLD {
        return k;
    }
    g / 6.0 + ((k * g / 2.0 + 1.0).cbrt() - 1.0) * 6.0 / g
}

/// Frequency factor `k` of standard normal quantile `q` under skew `g`.
pub(crate) fn frequency_factor(q: f64, g: f64) -> f64 {
    if g.abs() < NORMAL_SKEW_THRESHOLD {
        return q;
    }
    (2.0 / g) * (((q - g / 6.0) * g / 6.0 + 1.0).powi(3) - 1.0)
}

pub(crate) fn standard_normal() -> Result<Normal, ReturnPeriodError> {
    Normal::new(0.0, 1.0).map_err(|e| ReturnPeriodError::Distribution {
        message: e.to_string(),
    })
}

/// CDF of log-value `y` for `(mean, sd, skew)` parameters.
pub(crate) fn cdf(normal: &Normal, y: f64, mean: f64, sd: f64, skew: f64) -> f64 {
    if y.is_nan() {
        return f64::NAN;
    }
    let q = normal_quantile((y - mean) / sd, skew);
    if q.is_nan() {
        f64::NAN
    } else if q == f64::NEG_INFINITY {
        0.0
    } else if q == f64::INFINITY {
        1.0
    } else {
        normal.cdf(q)
    }
}

/// Log-value at non-exceedance probability `p`.
pub(crate) fn ppf(normal: &Normal, p: f64, mean: f64, sd: f64, skew: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    let q = if p == 0.0 {
        f64::NEG_INFINITY
    } else if p == 1.0 {
        f64::INFINITY
    } else {
        normal.inverse_cdf(p)
    };
    mean + frequency_factor(q, skew) * sd
}
