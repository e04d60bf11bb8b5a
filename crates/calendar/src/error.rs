//! Error types for the floodstat-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the floodstat-calendar crate.
///
/// This enum covers validation failures for day-of-year values and for
/// year and date windows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside the valid range 1..=366.
    #[error("invalid day of year: {doy} (must be 1..=366)")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
    },

    /// Returned when a year window would cover zero years.
    #[error("invalid year window: {n_years} years before {reference_year} (must be >= 1)")]
    InvalidYearWindow {
        /// The year the window ends before.
        reference_year: i32,
        /// The requested number of years.
        n_years: u32,
    },

    /// Returned when a date window has its start after its end.
    #[error("invalid date window: start {start} is after end {end}")]
    InvalidDateWindow {
        /// First day of the window.
        start: NaiveDate,
        /// Last day of the window.
        end: NaiveDate,
    },

    /// Returned when a trailing window is requested with fewer than one day.
    #[error("invalid trailing window: {days} days (must be >= 1)")]
    InvalidTrailingDays {
        /// The requested number of days.
        days: i64,
    },

    /// Returned when date arithmetic leaves the range chrono can represent.
    #[error("date out of range: {reason}")]
    DateOutOfRange {
        /// Description of the failed computation.
        reason: String,
    },
}
