//! Smoothed day-of-year climatological baselines.
//!
//! For each spatial unit, a daily series is smoothed with a centered moving
//! average, restricted to the `window_years` calendar years preceding the
//! reference year, and averaged by day of year. The result always has 366
//! entries per unit; days with no contributing value are `NaN`.
//!
//! Two input shapes are supported and agree to floating-point precision:
//!
//! - [`compute_table_baseline`] for long-format [`SeriesTable`]s
//! - [`compute_grid_baseline`] for [`DenseGrid`]s, producing one layer per
//!   day of year
//!
//! # Pipeline
//!
//! ```mermaid
//! flowchart LR
//!     A[daily series] --> B[centered moving average]
//!     B --> C[keep reference window years]
//!     C --> D[mean by day of year]
//!     D --> E[366 values per unit]
//! ```
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use floodstat_baseline::{BaselineConfig, compute_table_baseline};
//! use floodstat_calendar::Doy;
//! use floodstat_series::{Observation, SeriesTable, UnitKey};
//!
//! let key = UnitKey::new(["SOM", "SO11"]).unwrap();
//! let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
//! let obs = start
//!     .iter_days()
//!     .take(730)
//!     .map(|d| Observation::new(key.clone(), d, 1.0));
//! let table = SeriesTable::from_observations(obs).unwrap();
//!
//! let config = BaselineConfig::new(2024).with_window_years(2).with_smoothing_window_days(3);
//! let baseline = compute_table_baseline(&table, &config).unwrap();
//! assert_eq!(baseline.get(&key, Doy::new(100).unwrap()), Some(1.0));
//! ```

mod climatology;
mod config;
mod error;
mod result;
mod smooth;

pub use config::BaselineConfig;
pub use error::BaselineError;
pub use result::{BaselineGrid, BaselineTable, DoyBaseline};

use floodstat_calendar::DOYS_PER_YEAR;
use floodstat_series::{DenseGrid, SeriesTable};
use ndarray::{Array2, Axis};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Computes the day-of-year baseline of every unit in `table`.
///
/// Units whose values are all missing, or which have no data inside the
/// reference window, still appear with 366 `NaN` days.
///
/// # Errors
///
/// Returns [`BaselineError`] if `config` is invalid.
#[tracing::instrument(skip_all, fields(n_units = table.n_units(), reference_year = config.reference_year()))]
pub fn compute_table_baseline(
    table: &SeriesTable,
    config: &BaselineConfig,
) -> Result<BaselineTable, BaselineError> {
    config.validate()?;
    let years = config.year_window()?;
    let window = config.smoothing_window_days();
    let min_periods = config.min_periods();

    let units: Vec<_> = table.iter().collect();
    let baselines = units
        .par_iter()
        .map(|(key, series)| {
            let b = climatology::unit_baseline(
                series.dates(),
                series.values(),
                years,
                window,
                min_periods,
            );
            ((*key).clone(), b)
        })
        .collect::<Vec<_>>();

    let empty = baselines.iter().filter(|(_, b)| b.n_present() == 0).count();
    if empty > 0 {
        warn!(
            empty,
            first = years.first(),
            last = years.last(),
            "units without any baseline value"
        );
    }
    debug!(n_units = baselines.len(), "table baseline computed");

    Ok(BaselineTable::new(baselines.into_iter().collect()))
}

/// Computes the day-of-year baseline of every cell in `grid`.
///
/// Row `d` of the result is the baseline layer for DOY `d + 1`.
///
/// # Errors
///
/// Returns [`BaselineError`] if `config` is invalid.
#[tracing::instrument(skip_all, fields(n_cells = grid.n_cells(), reference_year = config.reference_year()))]
pub fn compute_grid_baseline(
    grid: &DenseGrid,
    config: &BaselineConfig,
) -> Result<BaselineGrid, BaselineError> {
    config.validate()?;
    let years = config.year_window()?;
    let window = config.smoothing_window_days();
    let min_periods = config.min_periods();

    let columns: Vec<DoyBaseline> = (0..grid.n_cells())
        .into_par_iter()
        .map(|c| {
            let values = grid.cell_series(c).to_vec();
            climatology::unit_baseline(grid.dates(), &values, years, window, min_periods)
        })
        .collect();

    let mut out = Array2::from_elem((DOYS_PER_YEAR, grid.n_cells()), f64::NAN);
    for (mut col, b) in out.axis_iter_mut(Axis(1)).zip(columns.iter()) {
        for (slot, &v) in col.iter_mut().zip(b.values()) {
            *slot = v;
        }
    }
    debug!(n_cells = grid.n_cells(), "grid baseline computed");

    Ok(BaselineGrid::new(out))
}
