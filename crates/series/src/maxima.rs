//! Annual maxima samples.

use std::collections::BTreeMap;

use crate::error::SeriesError;
use crate::key::UnitKey;

/// One unit's annual maxima: at most one value per calendar year, in year
/// order. Absent years are simply not listed.
///
/// Values may be `NaN` when the sample comes from an external source that
/// reports a year with no valid observation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaximaSample {
    years: Vec<i32>,
    values: Vec<f64>,
}

impl MaximaSample {
    /// Years, strictly increasing.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Maximum per year, aligned with [`years`](Self::years).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of years.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// `true` if no years are present.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Annual maxima for many units, keyed by [`UnitKey`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnualMaxima {
    units: BTreeMap<UnitKey, MaximaSample>,
}

impl AnnualMaxima {
    /// Builds maxima from `(unit, year, value)` records in any order.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::DuplicateYear`] if a (unit, year) pair occurs
    /// more than once.
    pub fn from_records<I>(records: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = (UnitKey, i32, f64)>,
    {
        let mut grouped: BTreeMap<UnitKey, BTreeMap<i32, f64>> = BTreeMap::new();
        for (key, year, value) in records {
            if grouped.get(&key).is_some_and(|y| y.contains_key(&year)) {
                return Err(SeriesError::DuplicateYear {
                    unit: key.to_string(),
                    year,
                });
            }
            grouped.entry(key).or_default().insert(year, value);
        }
        let units = grouped
            .into_iter()
            .map(|(k, years)| (k, years.into_iter().collect()))
            .collect();
        Ok(Self::from_sorted(units))
    }

    /// Builds maxima from per-unit `(year, value)` lists already sorted by
    /// year with no repeats.
    pub(crate) fn from_sorted(units: BTreeMap<UnitKey, Vec<(i32, f64)>>) -> Self {
        let units = units
            .into_iter()
            .map(|(k, rows)| {
                let (years, values) = rows.into_iter().unzip();
                (k, MaximaSample { years, values })
            })
            .collect();
        Self { units }
    }

    /// The sample of one unit.
    pub fn get(&self, key: &UnitKey) -> Option<&MaximaSample> {
        self.units.get(key)
    }

    /// `(key, sample)` pairs in key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&UnitKey, &MaximaSample)> {
        self.units.iter()
    }

    /// `(key, values)` pairs, the shape expected by strata detection.
    pub fn value_groups(&self) -> impl Iterator<Item = (&UnitKey, &[f64])> {
        self.units.iter().map(|(k, s)| (k, s.values()))
    }

    /// Number of units.
    pub fn n_units(&self) -> usize {
        self.units.len()
    }

    /// `true` if there are no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Flattens to `(unit, year, value)` records in (key, year) order.
    pub fn to_records(&self) -> Vec<(UnitKey, i32, f64)> {
        self.units
            .iter()
            .flat_map(|(k, s)| {
                s.years
                    .iter()
                    .zip(s.values.iter())
                    .map(move |(&y, &v)| (k.clone(), y, v))
            })
            .collect()
    }
}
