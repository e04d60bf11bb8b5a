//! Rank-based empirical return periods.

use std::collections::BTreeMap;

use floodstat_series::{AnnualMaxima, MaximaSample, UnitKey};
use rayon::prelude::*;

use crate::curve::RpCurve;
use crate::error::ReturnPeriodError;

/// Empirical return periods of one sample, aligned with the input order.
///
/// Values are ranked in descending order (rank 1 is the largest) and given
/// `RP = (n + 1) / rank`. Tied values are ranked in order of appearance, so
/// the earlier one gets the smaller rank and the larger RP.
///
/// # Errors
///
/// Returns [`ReturnPeriodError::InvalidInput`] if any value is `NaN`.
pub fn empirical_return_periods(values: &[f64]) -> Result<Vec<f64>, ReturnPeriodError> {
    if let Some(i) = values.iter().position(|v| v.is_nan()) {
        return Err(ReturnPeriodError::InvalidInput {
            reason: format!("cannot rank missing value at position {i}"),
        });
    }

    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    // Stable: equal values keep their input order.
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut rps = vec![0.0; n];
    let np1 = (n + 1) as f64;
    for (rank0, &idx) in order.iter().enumerate() {
        rps[idx] = np1 / (rank0 + 1) as f64;
    }
    Ok(rps)
}

/// One unit's annual maxima with their empirical return periods.
#[derive(Debug, Clone, PartialEq)]
pub struct RpSample {
    years: Vec<i32>,
    values: Vec<f64>,
    return_periods: Vec<f64>,
}

impl RpSample {
    /// Years of the maxima.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Annual maximum values, aligned with [`years`](Self::years).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Empirical return period of each maximum.
    pub fn return_periods(&self) -> &[f64] {
        &self.return_periods
    }

    /// The interpolation curve through this sample's `(value, RP)` pairs.
    pub fn curve(&self) -> RpCurve {
        RpCurve::from_pairs(&self.values, &self.return_periods)
    }
}

/// Empirical return periods for many units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RpTable {
    units: BTreeMap<UnitKey, RpSample>,
}

impl RpTable {
    /// The sample of one unit.
    pub fn get(&self, key: &UnitKey) -> Option<&RpSample> {
        self.units.get(key)
    }

    /// `(key, sample)` pairs in key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&UnitKey, &RpSample)> {
        self.units.iter()
    }

    /// Long-format `(key, year, value, rp)` rows in (key, year) order.
    pub fn rows(&self) -> impl Iterator<Item = (&UnitKey, i32, f64, f64)> {
        self.units.iter().flat_map(|(k, s)| {
            s.years
                .iter()
                .zip(s.values.iter())
                .zip(s.return_periods.iter())
                .map(move |((&y, &v), &rp)| (k, y, v, rp))
        })
    }

    /// One interpolation curve per unit.
    pub fn curves(&self) -> BTreeMap<UnitKey, RpCurve> {
        self.units
            .iter()
            .map(|(k, s)| (k.clone(), s.curve()))
            .collect()
    }

    /// Number of units.
    pub fn n_units(&self) -> usize {
        self.units.len()
    }

    /// `true` if there are no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Empirical return periods of every unit's annual maxima.
///
/// # Errors
///
/// Returns [`ReturnPeriodError::InvalidInput`] if any unit has a missing
/// maximum. Drop all-missing units first with
/// [`extract_nan_strata`](crate::extract_nan_strata).
#[tracing::instrument(skip_all, fields(n_units = maxima.n_units()))]
pub fn estimate_empirical_rp(maxima: &AnnualMaxima) -> Result<RpTable, ReturnPeriodError> {
    rank_groups(maxima.iter().collect())
}

pub(crate) fn rank_groups(
    groups: Vec<(&UnitKey, &MaximaSample)>,
) -> Result<RpTable, ReturnPeriodError> {
    let units = groups
        .par_iter()
        .map(|(key, sample)| {
            if let Some(i) = sample.values().iter().position(|v| v.is_nan()) {
                return Err(ReturnPeriodError::InvalidInput {
                    reason: format!(
                        "unit {key} has a missing annual maximum in {}",
                        sample.years()[i]
                    ),
                });
            }
            let return_periods = empirical_return_periods(sample.values())?;
            let rp = RpSample {
                years: sample.years().to_vec(),
                values: sample.values().to_vec(),
                return_periods,
            };
            Ok(((*key).clone(), rp))
        })
        .collect::<Result<BTreeMap<_, _>, ReturnPeriodError>>()?;
    Ok(RpTable { units })
}
