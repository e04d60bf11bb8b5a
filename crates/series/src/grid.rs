//! Dense raster grids flattened to `(time, cell)` matrices.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ndarray::{Array2, ArrayView1, Axis};

use crate::error::SeriesError;
use crate::key::UnitKey;
use crate::table::{SeriesTable, UnitSeries, check_increasing};

/// A dense time × cell grid sharing a single date axis.
///
/// Row `t` holds every cell's value on `dates[t]`; column `c` is the series of
/// cell `c`. Spatial coordinates are a collaborator concern, so cells are
/// identified by column index only. Missing values are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseGrid {
    dates: Vec<NaiveDate>,
    values: Array2<f64>,
}

impl DenseGrid {
    /// Creates a grid after checking that the row count matches the number of
    /// dates and that dates are strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] or
    /// [`SeriesError::UnorderedDates`].
    pub fn new(dates: Vec<NaiveDate>, values: Array2<f64>) -> Result<Self, SeriesError> {
        if dates.len() != values.nrows() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                values: values.nrows(),
            });
        }
        check_increasing(&dates)?;
        Ok(Self { dates, values })
    }

    /// The shared date axis.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The full `(time, cell)` matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of time steps (rows).
    pub fn n_timesteps(&self) -> usize {
        self.values.nrows()
    }

    /// Number of cells (columns).
    pub fn n_cells(&self) -> usize {
        self.values.ncols()
    }

    /// The time series of one cell.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= self.n_cells()`.
    pub fn cell_series(&self, cell: usize) -> ArrayView1<'_, f64> {
        self.values.index_axis(Axis(1), cell)
    }

    /// Flattens the grid to a table with one unit per cell, keyed by
    /// [`UnitKey::cell`].
    pub fn to_table(&self) -> SeriesTable {
        let units: BTreeMap<UnitKey, UnitSeries> = (0..self.n_cells())
            .map(|c| {
                let values = self.cell_series(c).to_vec();
                let series = UnitSeries::from_validated(self.dates.clone(), values);
                (UnitKey::cell(c), series)
            })
            .collect();
        SeriesTable::new(units)
    }
}
