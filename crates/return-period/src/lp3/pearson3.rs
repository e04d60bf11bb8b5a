//! Pearson type III distribution on top of statrs.

use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, ContinuousCDF, Gamma, Normal};

use crate::error::ReturnPeriodError;

/// Below this absolute skew the distribution is treated as normal.
pub(crate) const NORMAL_SKEW_THRESHOLD: f64 = 1.6e-5;

const MAX_QUANTILE_ITER: usize = 200;
const QUANTILE_REL_TOL: f64 = 1e-14;

/// Pearson III parameters in the (location, scale, skew) convention: mean,
/// standard deviation and skewness of the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PearsonIII {
    loc: f64,
    scale: f64,
    skew: f64,
}

impl PearsonIII {
    /// Creates parameters after checking that all three are finite and
    /// `scale` is positive.
    ///
    /// # Errors
    ///
    /// Returns [`ReturnPeriodError::Distribution`] otherwise.
    pub fn new(loc: f64, scale: f64, skew: f64) -> Result<Self, ReturnPeriodError> {
        if !loc.is_finite() || !skew.is_finite() || !scale.is_finite() || scale <= 0.0 {
            return Err(ReturnPeriodError::Distribution {
                message: format!(
                    "invalid Pearson III parameters (loc={loc}, scale={scale}, skew={skew})"
                ),
            });
        }
        Ok(Self { loc, scale, skew })
    }

    /// Location (mean).
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Scale (standard deviation).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Skewness.
    pub fn skew(&self) -> f64 {
        self.skew
    }

    /// Builds the statrs-backed evaluator for these parameters.
    pub(crate) fn kernel(&self) -> Result<Pe3Kernel, ReturnPeriodError> {
        if self.skew.abs() < NORMAL_SKEW_THRESHOLD {
            let normal = Normal::new(self.loc, self.scale).map_err(|e| {
                ReturnPeriodError::Distribution {
                    message: e.to_string(),
                }
            })?;
            return Ok(Pe3Kernel::Normal(normal));
        }

        let g = self.skew;
        let alpha = 4.0 / (g * g);
        let beta = 0.5 * self.scale * g.abs();
        let origin = self.loc - 2.0 * self.scale / g;
        let gamma = Gamma::new(alpha, 1.0).map_err(|e| ReturnPeriodError::Distribution {
            message: e.to_string(),
        })?;
        Ok(Pe3Kernel::Gamma {
            gamma,
            origin,
            beta,
            positive: g > 0.0,
        })
    }
}

/// A Pearson III ready for repeated evaluation.
///
/// With positive skew the distribution is a shifted, scaled standard gamma
/// bounded below at `origin`; with negative skew it is mirrored and bounded
/// above.
#[derive(Debug, Clone)]
pub(crate) enum Pe3Kernel {
    Normal(Normal),
    Gamma {
        gamma: Gamma,
        origin: f64,
        beta: f64,
        positive: bool,
    },
}

impl Pe3Kernel {
    pub(crate) fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        match self {
            Pe3Kernel::Normal(n) => {
                if x.is_infinite() {
                    if x > 0.0 { 1.0 } else { 0.0 }
                } else {
                    n.cdf(x)
                }
            }
            Pe3Kernel::Gamma {
                gamma,
                origin,
                beta,
                positive,
            } => {
                if *positive {
                    standard_gamma_cdf(gamma, (x - origin) / beta)
                } else {
                    1.0 - standard_gamma_cdf(gamma, (origin - x) / beta)
                }
            }
        }
    }

    pub(crate) fn ppf(&self, p: f64) -> f64 {
        if p.is_nan() || !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        match self {
            Pe3Kernel::Normal(n) => {
                if p == 0.0 {
                    f64::NEG_INFINITY
                } else if p == 1.0 {
                    f64::INFINITY
                } else {
                    n.inverse_cdf(p)
                }
            }
            Pe3Kernel::Gamma {
                gamma,
                origin,
                beta,
                positive,
            } => {
                if *positive {
                    origin + beta * standard_gamma_quantile(gamma, p)
                } else {
                    origin - beta * standard_gamma_quantile(gamma, 1.0 - p)
                }
            }
        }
    }
}

fn standard_gamma_cdf(gamma: &Gamma, z: f64) -> f64 {
    if z <= 0.0 {
        0.0
    } else if z.is_infinite() {
        1.0
    } else {
        gamma.cdf(z)
    }
}

/// Inverse of the unit-rate gamma CDF by Newton's method, falling back to
/// bisection whenever a step leaves the current bracket.
fn standard_gamma_quantile(gamma: &Gamma, p: f64) -> f64 {
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let mut lo = 0.0;
    let mut hi = gamma.shape().max(1.0);
    while gamma.cdf(hi) < p {
        lo = hi;
        hi *= 2.0;
        if !hi.is_finite() {
            return f64::INFINITY;
        }
    }

    let mut x = 0.5 * (lo + hi);
    for _ in 0..MAX_QUANTILE_ITER {
        let f = gamma.cdf(x) - p;
        if f == 0.0 {
            return x;
        }
        if f < 0.0 {
            lo = x;
        } else {
            hi = x;
        }
        let d = gamma.pdf(x);
        let newton = if d > 0.0 { x - f / d } else { f64::NAN };
        let next = if newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };
        if (next - x).abs() <= QUANTILE_REL_TOL * next.abs().max(f64::MIN_POSITIVE) {
            return next;
        }
        x = next;
    }
    x
}
