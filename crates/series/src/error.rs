//! Error types for floodstat-series.

use chrono::NaiveDate;

/// Error type for all fallible operations in the floodstat-series crate.
///
/// This enum covers shape and ordering problems in the in-memory series
/// structures handed to the analytics engines.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when parallel date and value arrays differ in length.
    #[error("length mismatch: {dates} dates but {values} values")]
    LengthMismatch {
        /// Number of dates.
        dates: usize,
        /// Number of values (or grid rows).
        values: usize,
    },

    /// Returned when dates are not strictly increasing.
    #[error("dates must be strictly increasing: {current} follows {previous}")]
    UnorderedDates {
        /// The earlier position's date.
        previous: NaiveDate,
        /// The offending date.
        current: NaiveDate,
    },

    /// Returned when the same (unit, date) pair appears twice.
    #[error("duplicate observation for unit {unit} on {date}")]
    DuplicateObservation {
        /// Unit key, rendered.
        unit: String,
        /// The repeated date.
        date: NaiveDate,
    },

    /// Returned when the same (unit, year) annual maximum appears twice.
    #[error("duplicate annual maximum for unit {unit} in year {year}")]
    DuplicateYear {
        /// Unit key, rendered.
        unit: String,
        /// The repeated year.
        year: i32,
    },

    /// Returned when a unit key has no fields.
    #[error("unit key must have at least one field")]
    EmptyKey,
}
