//! Baseline result types.

use std::collections::BTreeMap;

use floodstat_calendar::{DOYS_PER_YEAR, Doy};
use floodstat_series::UnitKey;
use ndarray::{Array2, ArrayView1, Axis};

/// One unit's baseline: a value for each day of year 1..=366, `NaN` where no
/// smoothed value was available.
#[derive(Debug, Clone, PartialEq)]
pub struct DoyBaseline {
    values: Vec<f64>,
}

impl DoyBaseline {
    pub(crate) fn from_values(values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), DOYS_PER_YEAR);
        Self { values }
    }

    /// Baseline value on `doy`.
    pub fn get(&self, doy: Doy) -> f64 {
        self.values[doy.index()]
    }

    /// All 366 values, indexed by [`Doy::index`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `(doy, value)` pairs for DOY 1..=366.
    pub fn iter(&self) -> impl Iterator<Item = (Doy, f64)> + '_ {
        Doy::all().zip(self.values.iter().copied())
    }

    /// Number of days of year with a non-missing value.
    pub fn n_present(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }
}

/// Baselines for many units, keyed by [`UnitKey`].
///
/// Every unit of the input appears, with all 366 days, even when every
/// value is missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BaselineTable {
    units: BTreeMap<UnitKey, DoyBaseline>,
}

impl BaselineTable {
    pub(crate) fn new(units: BTreeMap<UnitKey, DoyBaseline>) -> Self {
        Self { units }
    }

    /// Baseline value for `key` on `doy`, `None` if the unit is unknown.
    pub fn get(&self, key: &UnitKey, doy: Doy) -> Option<f64> {
        self.units.get(key).map(|b| b.get(doy))
    }

    /// The baseline of one unit.
    pub fn unit(&self, key: &UnitKey) -> Option<&DoyBaseline> {
        self.units.get(key)
    }

    /// `(key, baseline)` pairs in key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&UnitKey, &DoyBaseline)> {
        self.units.iter()
    }

    /// Long-format `(key, doy, value)` rows in (key, doy) order.
    pub fn rows(&self) -> impl Iterator<Item = (&UnitKey, Doy, f64)> {
        self.units
            .iter()
            .flat_map(|(k, b)| b.iter().map(move |(doy, v)| (k, doy, v)))
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

/// Baselines for a dense grid: a `(366, cell)` matrix whose row `d` is the
/// baseline layer for DOY `d + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineGrid {
    values: Array2<f64>,
}

impl BaselineGrid {
    pub(crate) fn new(values: Array2<f64>) -> Self {
        debug_assert_eq!(values.nrows(), DOYS_PER_YEAR);
        Self { values }
    }

    /// The full `(366, cell)` matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of cells.
    pub fn n_cells(&self) -> usize {
        self.values.ncols()
    }

    /// Baseline of `cell` on `doy`.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= self.n_cells()`.
    pub fn get(&self, doy: Doy, cell: usize) -> f64 {
        self.values[[doy.index(), cell]]
    }

    /// The layer for one day of year, one value per cell.
    pub fn layer(&self, doy: Doy) -> ArrayView1<'_, f64> {
        self.values.index_axis(Axis(0), doy.index())
    }

    /// Flattens to a table keyed by [`UnitKey::cell`].
    pub fn to_table(&self) -> BaselineTable {
        let units = self
            .values
            .axis_iter(Axis(1))
            .enumerate()
            .map(|(c, col)| (UnitKey::cell(c), DoyBaseline::from_values(col.to_vec())))
            .collect();
        BaselineTable::new(units)
    }
}
