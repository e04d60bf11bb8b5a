//! Fitting LP3 parameters to samples of annual maxima.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use floodstat_series::{AnnualMaxima, UnitKey};
use floodstat_stats::{mean, population_sd, sample_lmoments, sd, skewness};
use rayon::prelude::*;
use statrs::function::gamma::ln_gamma;
use tracing::{debug, warn};

use crate::error::ReturnPeriodError;
use crate::lp3::method::Lp3Method;
use crate::lp3::params::Lp3Params;
use crate::lp3::pearson3::PearsonIII;

/// Smallest sample that can be fitted.
pub const MIN_FIT_SAMPLE: usize = 3;

// Rational approximations of the PE3 shape from L-skewness (Hosking & Wallis
// 1997, routine PELPE3).
const SMALL_T3: f64 = 1e-6;
const C1: f64 = 0.2906;
const C2: f64 = 0.1882;
const C3: f64 = 0.0442;
const D1: f64 = 0.36067;
const D2: f64 = -0.59567;
const D3: f64 = 0.25361;
const D4: f64 = -2.78861;
const D5: f64 = 2.56096;
const D6: f64 = -0.77045;

/// Fits LP3 parameters to `values` with `method`.
///
/// Zeros are replaced by the smallest non-zero value before taking log10.
///
/// # Errors
///
/// - [`ReturnPeriodError::InsufficientData`] for fewer than
///   [`MIN_FIT_SAMPLE`] values
/// - [`ReturnPeriodError::InvalidInput`] for negative, non-finite or
///   all-zero samples
/// - [`ReturnPeriodError::DegenerateSample`] when the log values have no
///   spread or cannot be matched by a Pearson III
pub fn fit(values: &[f64], method: Lp3Method) -> Result<Lp3Params, ReturnPeriodError> {
    let logs = log_sample(values)?;
    fit_logs(&logs, method)
}

/// Fits every method to the same sample.
///
/// # Errors
///
/// Same as [`fit`]; the first failing method aborts.
pub fn fit_all_methods(
    values: &[f64],
) -> Result<BTreeMap<Lp3Method, Lp3Params>, ReturnPeriodError> {
    let logs = log_sample(values)?;
    Lp3Method::ALL
        .into_iter()
        .map(|m| Ok((m, fit_logs(&logs, m)?)))
        .collect()
}

fn fit_logs(logs: &[f64], method: Lp3Method) -> Result<Lp3Params, ReturnPeriodError> {
    match method {
        Lp3Method::Lmoments => Ok(Lp3Params::Lmoments(fit_lmoments(logs)?)),
        Lp3Method::ScipyMoments => {
            let skew = skew_of(logs)?;
            Ok(Lp3Params::ScipyMoments(PearsonIII::new(
                mean(logs),
                population_sd(logs),
                skew,
            )?))
        }
        Lp3Method::UsgsMoments => Ok(Lp3Params::UsgsMoments {
            mean: mean(logs),
            sd: sd(logs),
            skew: skew_of(logs)?,
        }),
    }
}

/// Sorted log10 values with zeros lifted to the smallest positive value.
fn log_sample(values: &[f64]) -> Result<Vec<f64>, ReturnPeriodError> {
    if values.len() < MIN_FIT_SAMPLE {
        return Err(ReturnPeriodError::InsufficientData {
            n: values.len(),
            min: MIN_FIT_SAMPLE,
        });
    }
    if let Some(&bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(ReturnPeriodError::InvalidInput {
            reason: format!("LP3 values must be finite and non-negative, got {bad}"),
        });
    }
    let floor = values
        .iter()
        .copied()
        .filter(|&v| v > 0.0)
        .fold(f64::INFINITY, f64::min);
    if !floor.is_finite() {
        return Err(ReturnPeriodError::InvalidInput {
            reason: "all LP3 values are zero".to_string(),
        });
    }

    let mut logs: Vec<f64> = values
        .iter()
        .map(|&v| (if v == 0.0 { floor } else { v }).log10())
        .collect();
    logs.sort_by(f64::total_cmp);

    if logs[0] == logs[logs.len() - 1] {
        return Err(ReturnPeriodError::DegenerateSample {
            reason: "all values are equal".to_string(),
        });
    }
    Ok(logs)
}

fn skew_of(logs: &[f64]) -> Result<f64, ReturnPeriodError> {
    skewness(logs).ok_or_else(|| ReturnPeriodError::DegenerateSample {
        reason: "skewness is undefined".to_string(),
    })
}

/// Pearson III by L-moment matching. Expects sorted input.
fn fit_lmoments(sorted: &[f64]) -> Result<PearsonIII, ReturnPeriodError> {
    let lm = sample_lmoments(sorted).ok_or_else(|| ReturnPeriodError::DegenerateSample {
        reason: "L-scale is not positive".to_string(),
    })?;
    let t3 = lm.t3.abs();
    if t3 >= 1.0 {
        return Err(ReturnPeriodError::DegenerateSample {
            reason: format!("L-skewness {} is outside (-1, 1)", lm.t3),
        });
    }

    if t3 <= SMALL_T3 {
        return PearsonIII::new(lm.l1, lm.l2 * PI.sqrt(), 0.0);
    }

    let alpha = if t3 >= 1.0 / 3.0 {
        let t = 1.0 - t3;
        t * (D1 + t * (D2 + t * D3)) / (1.0 + t * (D4 + t * (D5 + t * D6)))
    } else {
        let t = 3.0 * PI * t3 * t3;
        (1.0 + C1 * t) / (t * (1.0 + t * (C2 + t * C3)))
    };
    let rt_alpha = alpha.sqrt();
    let beta = PI.sqrt() * lm.l2 * (ln_gamma(alpha) - ln_gamma(alpha + 0.5)).exp();
    let skew = (2.0 / rt_alpha).copysign(lm.t3);
    PearsonIII::new(lm.l1, beta * rt_alpha, skew)
}

/// Per-unit LP3 fits produced by [`fit_by_group`].
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFits {
    method: Lp3Method,
    params: BTreeMap<UnitKey, Lp3Params>,
    skipped: BTreeMap<UnitKey, ReturnPeriodError>,
}

impl GroupFits {
    /// The method every fit used.
    pub fn method(&self) -> Lp3Method {
        self.method
    }

    /// Parameters of one unit.
    pub fn get(&self, key: &UnitKey) -> Option<&Lp3Params> {
        self.params.get(key)
    }

    /// `(key, params)` pairs in key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&UnitKey, &Lp3Params)> {
        self.params.iter()
    }

    /// Units that could not be fitted, with the reason.
    pub fn skipped(&self) -> &BTreeMap<UnitKey, ReturnPeriodError> {
        &self.skipped
    }

    /// Number of fitted units.
    pub fn n_fitted(&self) -> usize {
        self.params.len()
    }
}

/// Fits every unit's annual maxima with `method`, in parallel.
///
/// Missing maxima are dropped before fitting. Units that still cannot be
/// fitted are reported in [`GroupFits::skipped`] rather than failing the
/// whole batch.
#[tracing::instrument(skip_all, fields(n_units = maxima.n_units(), method = %method))]
pub fn fit_by_group(maxima: &AnnualMaxima, method: Lp3Method) -> GroupFits {
    let units: Vec<_> = maxima.iter().collect();
    let results: Vec<(UnitKey, Result<Lp3Params, ReturnPeriodError>)> = units
        .par_iter()
        .map(|(key, sample)| {
            let present: Vec<f64> = sample
                .values()
                .iter()
                .copied()
                .filter(|v| !v.is_nan())
                .collect();
            ((*key).clone(), fit(&present, method))
        })
        .collect();

    let mut params = BTreeMap::new();
    let mut skipped = BTreeMap::new();
    for (key, result) in results {
        match result {
            Ok(p) => {
                params.insert(key, p);
            }
            Err(e) => {
                debug!(unit = %key, error = %e, "LP3 fit skipped");
                skipped.insert(key, e);
            }
        }
    }
    if !skipped.is_empty() {
        warn!(skipped = skipped.len(), fitted = params.len(), "some units could not be fitted");
    }

    GroupFits {
        method,
        params,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: [f64; 8] = [0.12, 0.31, 0.05, 0.22, 0.47, 0.18, 0.09, 0.27];

    #[test]
    fn rejects_short_sample() {
        assert_eq!(
            fit(&[1.0, 2.0], Lp3Method::Lmoments).unwrap_err(),
            ReturnPeriodError::InsufficientData { n: 2, min: 3 }
        );
    }

    #[test]
    fn rejects_negative_and_missing() {
        assert!(matches!(
            fit(&[1.0, -2.0, 3.0], Lp3Method::UsgsMoments),
            Err(ReturnPeriodError::InvalidInput { .. })
        ));
        assert!(matches!(
            fit(&[1.0, f64::NAN, 3.0], Lp3Method::UsgsMoments),
            Err(ReturnPeriodError::InvalidInput { .. })
        ));
    }

    #[test]
    fn rejects_all_zero_and_constant() {
        assert_eq!(
            fit(&[0.0, 0.0, 0.0], Lp3Method::Lmoments).unwrap_err(),
            ReturnPeriodError::InvalidInput {
                reason: "all LP3 values are zero".into()
            }
        );
        // A zero is lifted to the only other value: no spread remains.
        assert!(matches!(
            fit(&[0.0, 0.2, 0.2], Lp3Method::ScipyMoments),
            Err(ReturnPeriodError::DegenerateSample { .. })
        ));
    }

    #[test]
    fn zeros_take_the_smallest_positive_value() {
        let with_zero = fit(&[0.0, 0.1, 0.4, 0.9], Lp3Method::UsgsMoments).unwrap();
        let lifted = fit(&[0.1, 0.1, 0.4, 0.9], Lp3Method::UsgsMoments).unwrap();
        assert_eq!(with_zero, lifted);
    }

    #[test]
    fn usgs_uses_sample_sd() {
        let params = fit(&[1.0, 10.0, 100.0], Lp3Method::UsgsMoments).unwrap();
        let Lp3Params::UsgsMoments { mean, sd, skew } = params else {
            panic!("wrong variant");
        };
        // log10 values 0, 1, 2.
        assert_relative_eq!(mean, 1.0, epsilon = 1e-12);
        assert_relative_eq!(sd, 1.0, epsilon = 1e-12);
        assert_relative_eq!(skew, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn scipy_uses_population_moments() {
        let params = fit(&[1.0, 10.0, 100.0], Lp3Method::ScipyMoments).unwrap();
        let Lp3Params::ScipyMoments(p) = params else {
            panic!("wrong variant");
        };
        assert_relative_eq!(p.loc(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.scale(), (2.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn lmoments_symmetric_sample_has_zero_skew() {
        let params = fit(&[1.0, 10.0, 100.0], Lp3Method::Lmoments).unwrap();
        let Lp3Params::Lmoments(p) = params else {
            panic!("wrong variant");
        };
        // l1 = 1, l2 = 2/3 for log values 0, 1, 2.
        assert_relative_eq!(p.loc(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.scale(), 2.0 / 3.0 * PI.sqrt(), epsilon = 1e-12);
        assert_eq!(p.skew(), 0.0);
    }

    #[test]
    fn lmoments_skew_sign_follows_sample() {
        let Lp3Params::Lmoments(right) = fit(&SAMPLE, Lp3Method::Lmoments).unwrap() else {
            panic!("wrong variant");
        };
        let mirrored: Vec<f64> = SAMPLE.iter().map(|v| 1.0 / v).collect();
        let Lp3Params::Lmoments(left) = fit(&mirrored, Lp3Method::Lmoments).unwrap() else {
            panic!("wrong variant");
        };
        assert_relative_eq!(right.skew(), -left.skew(), epsilon = 1e-9);
        assert_relative_eq!(right.scale(), left.scale(), epsilon = 1e-9);
    }

    #[test]
    fn fit_all_methods_has_every_method() {
        let all = fit_all_methods(&SAMPLE).unwrap();
        assert_eq!(all.len(), 3);
        for (m, p) in &all {
            assert_eq!(p.method(), *m);
        }
    }
}
