//! Per-unit tabular series.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use floodstat_calendar::DateWindow;
use tracing::debug;

use crate::error::SeriesError;
use crate::key::UnitKey;
use crate::maxima::AnnualMaxima;

/// One row of a long-format series: `(unit, date, value)`.
///
/// A missing value is `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Spatial unit.
    pub key: UnitKey,
    /// Calendar date.
    pub date: NaiveDate,
    /// Observed value, `NaN` when missing.
    pub value: f64,
}

impl Observation {
    /// Convenience constructor.
    pub fn new(key: UnitKey, date: NaiveDate, value: f64) -> Self {
        Self { key, date, value }
    }
}

/// The date-ordered series of a single unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnitSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl UnitSeries {
    /// Creates a series after checking that `dates` and `values` have the same
    /// length and that dates are strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] or
    /// [`SeriesError::UnorderedDates`].
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if dates.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        check_increasing(&dates)?;
        Ok(Self { dates, values })
    }

    /// Wraps arrays whose length and ordering the caller already checked.
    pub(crate) fn from_validated(dates: Vec<NaiveDate>, values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { dates, values }
    }

    /// Observation dates, strictly increasing.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Observed values, `NaN` when missing.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of time steps.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// `true` if the series has no time steps.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// `true` if every value is missing (vacuously true when empty).
    pub fn is_all_missing(&self) -> bool {
        self.values.iter().all(|v| v.is_nan())
    }

    /// `(date, value)` pairs in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    fn restrict(&self, window: DateWindow) -> Self {
        let (dates, values) = self.iter().filter(|(d, _)| window.contains(*d)).unzip();
        Self { dates, values }
    }
}

pub(crate) fn check_increasing(dates: &[NaiveDate]) -> Result<(), SeriesError> {
    for w in dates.windows(2) {
        if w[1] <= w[0] {
            return Err(SeriesError::UnorderedDates {
                previous: w[0],
                current: w[1],
            });
        }
    }
    Ok(())
}

/// A collection of unit series keyed by [`UnitKey`].
///
/// Iteration is always in key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesTable {
    units: BTreeMap<UnitKey, UnitSeries>,
}

impl SeriesTable {
    /// Wraps already-validated unit series.
    pub fn new(units: BTreeMap<UnitKey, UnitSeries>) -> Self {
        Self { units }
    }

    /// Groups long-format observations by unit and sorts each unit by date.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::DuplicateObservation`] if a (unit, date) pair
    /// occurs more than once.
    pub fn from_observations<I>(observations: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut grouped: BTreeMap<UnitKey, Vec<(NaiveDate, f64)>> = BTreeMap::new();
        for obs in observations {
            grouped.entry(obs.key).or_default().push((obs.date, obs.value));
        }

        let mut units = BTreeMap::new();
        for (key, mut rows) in grouped {
            rows.sort_by_key(|(d, _)| *d);
            if let Some(w) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
                return Err(SeriesError::DuplicateObservation {
                    unit: key.to_string(),
                    date: w[0].0,
                });
            }
            let (dates, values) = rows.into_iter().unzip();
            units.insert(key, UnitSeries::from_validated(dates, values));
        }
        Ok(Self { units })
    }

    /// The series of one unit.
    pub fn get(&self, key: &UnitKey) -> Option<&UnitSeries> {
        self.units.get(key)
    }

    /// `(key, series)` pairs in key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&UnitKey, &UnitSeries)> {
        self.units.iter()
    }

    /// Unit keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &UnitKey> {
        self.units.keys()
    }

    /// `(key, values)` pairs, the shape expected by strata detection.
    pub fn value_groups(&self) -> impl Iterator<Item = (&UnitKey, &[f64])> {
        self.units.iter().map(|(k, s)| (k, s.values()))
    }

    /// Number of units.
    pub fn n_units(&self) -> usize {
        self.units.len()
    }

    /// Total number of observations over all units.
    pub fn n_observations(&self) -> usize {
        self.units.values().map(UnitSeries::len).sum()
    }

    /// `true` if the table holds no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Flattens back to long format, in (key, date) order.
    pub fn to_observations(&self) -> Vec<Observation> {
        self.units
            .iter()
            .flat_map(|(key, series)| {
                series
                    .iter()
                    .map(move |(date, value)| Observation::new(key.clone(), date, value))
            })
            .collect()
    }

    /// Keeps only observations whose date falls in `window`.
    ///
    /// Units left with no observations are dropped.
    pub fn restrict(&self, window: DateWindow) -> Self {
        let units = self
            .units
            .iter()
            .map(|(k, s)| (k.clone(), s.restrict(window)))
            .filter(|(_, s)| !s.is_empty())
            .collect();
        Self { units }
    }

    /// Per-unit, per-calendar-year maximum of the non-missing values that fall
    /// inside `window`.
    ///
    /// Years in which every value is missing are left out, so a unit whose
    /// whole record is missing gets no entry at all.
    pub fn annual_maxima(&self, window: DateWindow) -> AnnualMaxima {
        let mut out = BTreeMap::new();
        for (key, series) in &self.units {
            let mut per_year: BTreeMap<i32, f64> = BTreeMap::new();
            for (date, value) in series.iter() {
                if value.is_nan() || !window.contains(date) {
                    continue;
                }
                per_year
                    .entry(date.year())
                    .and_modify(|m| *m = m.max(value))
                    .or_insert(value);
            }
            if per_year.is_empty() {
                debug!(unit = %key, "no valid values in maxima window");
                continue;
            }
            out.insert(key.clone(), per_year.into_iter().collect::<Vec<_>>());
        }
        AnnualMaxima::from_sorted(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(pcode: &str) -> UnitKey {
        UnitKey::new(["ETH", pcode]).unwrap()
    }

    #[test]
    fn unit_series_rejects_length_mismatch() {
        let err = UnitSeries::new(vec![date(2020, 1, 1)], vec![]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::LengthMismatch {
                dates: 1,
                values: 0
            }
        );
    }

    #[test]
    fn unit_series_rejects_unordered_dates() {
        let err = UnitSeries::new(vec![date(2020, 1, 2), date(2020, 1, 1)], vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, SeriesError::UnorderedDates { .. }));
    }

    #[test]
    fn from_observations_groups_and_sorts() {
        let obs = vec![
            Observation::new(key("B"), date(2020, 1, 2), 2.0),
            Observation::new(key("A"), date(2020, 1, 1), 1.0),
            Observation::new(key("B"), date(2020, 1, 1), 3.0),
        ];
        let table = SeriesTable::from_observations(obs).unwrap();
        assert_eq!(table.n_units(), 2);
        assert_eq!(table.n_observations(), 3);
        let b = table.get(&key("B")).unwrap();
        assert_eq!(b.dates(), [date(2020, 1, 1), date(2020, 1, 2)]);
        assert_eq!(b.values(), [3.0, 2.0]);
        let keys: Vec<&UnitKey> = table.keys().collect();
        assert_eq!(keys, vec![&key("A"), &key("B")]);
    }

    #[test]
    fn from_observations_rejects_duplicates() {
        let obs = vec![
            Observation::new(key("A"), date(2020, 1, 1), 1.0),
            Observation::new(key("A"), date(2020, 1, 1), 2.0),
        ];
        assert!(matches!(
            SeriesTable::from_observations(obs),
            Err(SeriesError::DuplicateObservation { .. })
        ));
    }

    #[test]
    fn to_observations_roundtrip_order() {
        let obs = vec![
            Observation::new(key("A"), date(2020, 1, 1), 1.0),
            Observation::new(key("A"), date(2020, 1, 2), f64::NAN),
            Observation::new(key("B"), date(2020, 1, 1), 3.0),
        ];
        let table = SeriesTable::from_observations(obs.clone()).unwrap();
        let back = table.to_observations();
        assert_eq!(back.len(), 3);
        assert_eq!(back[0], obs[0]);
        assert!(back[1].value.is_nan());
        assert_eq!(back[2], obs[2]);
    }

    #[test]
    fn restrict_drops_empty_units() {
        let obs = vec![
            Observation::new(key("A"), date(2020, 1, 1), 1.0),
            Observation::new(key("A"), date(2020, 3, 1), 2.0),
            Observation::new(key("B"), date(2019, 1, 1), 3.0),
        ];
        let table = SeriesTable::from_observations(obs).unwrap();
        let window = DateWindow::new(date(2020, 2, 1), date(2020, 12, 31)).unwrap();
        let recent = table.restrict(window);
        assert_eq!(recent.n_units(), 1);
        assert_eq!(recent.get(&key("A")).unwrap().values(), [2.0]);
    }

    #[test]
    fn annual_maxima_ignores_missing_and_window() {
        let obs = vec![
            Observation::new(key("A"), date(2021, 5, 1), 0.2),
            Observation::new(key("A"), date(2021, 8, 1), 0.5),
            Observation::new(key("A"), date(2021, 9, 1), f64::NAN),
            Observation::new(key("A"), date(2022, 1, 1), f64::NAN),
            Observation::new(key("A"), date(2023, 2, 1), 0.1),
            Observation::new(key("A"), date(2024, 2, 1), 0.9),
            Observation::new(key("B"), date(2021, 2, 1), f64::NAN),
        ];
        let table = SeriesTable::from_observations(obs).unwrap();
        let maxima = table.annual_maxima(DateWindow::through_year(2023).unwrap());

        let a = maxima.get(&key("A")).unwrap();
        assert_eq!(a.years(), [2021, 2023]);
        assert_eq!(a.values(), [0.5, 0.1]);
        assert!(maxima.get(&key("B")).is_none());
    }

    #[test]
    fn all_missing_detection() {
        let s = UnitSeries::new(vec![date(2020, 1, 1)], vec![f64::NAN]).unwrap();
        assert!(s.is_all_missing());
        let s = UnitSeries::new(vec![date(2020, 1, 1)], vec![0.0]).unwrap();
        assert!(!s.is_all_missing());
    }
}
