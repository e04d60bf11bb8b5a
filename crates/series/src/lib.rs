//! # floodstat-series
//!
//! In-memory shapes consumed by the floodstat engines: unit-keyed tabular
//! series, dense `(time, cell)` grids and annual maxima samples.
//!
//! Missing values are `NaN` throughout. Every keyed collection iterates in
//! [`UnitKey`] order, so outputs are deterministic regardless of how the
//! per-unit work is scheduled.
//!
//! ```
//! use chrono::NaiveDate;
//! use floodstat_calendar::DateWindow;
//! use floodstat_series::{Observation, SeriesTable, UnitKey};
//!
//! let key = UnitKey::new(["ETH", "ET0101"]).unwrap();
//! let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
//! let table = SeriesTable::from_observations(vec![
//!     Observation::new(key.clone(), day(2022, 8, 1), 0.12),
//!     Observation::new(key.clone(), day(2023, 8, 1), 0.31),
//!     Observation::new(key.clone(), day(2024, 8, 1), 0.05),
//! ])
//! .unwrap();
//!
//! let maxima = table.annual_maxima(DateWindow::through_year(2023).unwrap());
//! assert_eq!(maxima.get(&key).unwrap().years(), [2022, 2023]);
//! ```

mod error;
mod grid;
mod key;
mod maxima;
mod table;

pub use error::SeriesError;
pub use grid::DenseGrid;
pub use key::UnitKey;
pub use maxima::{AnnualMaxima, MaximaSample};
pub use table::{Observation, SeriesTable, UnitSeries};
