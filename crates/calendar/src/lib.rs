//! # floodstat-calendar
//!
//! Gregorian day-of-year arithmetic and closed year/date windows.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDate"] -->|"Doy::from_date()"| B["Doy (1..=366)"]
//!     C["reference year"] -->|"YearWindow::preceding()"| D["YearWindow"]
//!     D -->|"DateWindow::from_years()"| E["DateWindow"]
//!     F["run date"] -->|"DateWindow::trailing()"| E
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use floodstat_calendar::{DateWindow, Doy, YearWindow};
//!
//! let leap_day = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
//! assert_eq!(Doy::from_date(leap_day).get(), 366);
//!
//! let baseline_years = YearWindow::preceding(2024, 10).unwrap();
//! assert_eq!((baseline_years.first(), baseline_years.last()), (2014, 2023));
//!
//! let recent = DateWindow::trailing(leap_day, 90).unwrap();
//! assert_eq!(recent.dates().count(), 91);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype |
//! | `window` | Year and date windows, default run date |
//! | `error` | Error types |

mod doy;
mod error;
mod window;

pub use doy::{DOYS_PER_YEAR, Doy};
pub use error::CalendarError;
pub use window::{DateWindow, YearWindow, default_run_date};
