//! Day-of-year newtype for the proleptic Gregorian calendar.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Number of day-of-year slots, including the leap-year-only day 366.
pub const DOYS_PER_YEAR: usize = 366;

/// Day-of-year in the proleptic Gregorian calendar (1..=366).
///
/// The value is the ordinal of a date within its own year, so in a leap year
/// March 1 is day 61 and December 31 is day 366, while in a common year they
/// are days 60 and 365. Day 366 therefore only ever comes from leap years and
/// is never merged into day 365.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(u16);

impl Doy {
    /// Creates a new `Doy` from a day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=366.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=DOYS_PER_YEAR as u16).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Day-of-year of a calendar date (its Gregorian ordinal).
    pub fn from_date(date: NaiveDate) -> Self {
        // chrono guarantees ordinal() is in 1..=366.
        Self(date.ordinal() as u16)
    }

    /// Creates a `Doy` from a 0-based index (0..=365).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `index` is 366 or more.
    pub fn from_index(index: usize) -> Result<Self, CalendarError> {
        let doy = u16::try_from(index + 1).unwrap_or(u16::MAX);
        Self::new(doy)
    }

    /// Returns the inner day-of-year value (1..=366).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index suitable for array indexing (0..=365).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// `true` for day 366, which only leap years contribute.
    pub fn is_leap_only(self) -> bool {
        self.0 as usize == DOYS_PER_YEAR
    }

    /// Iterates over every day-of-year, 1 through 366.
    pub fn all() -> impl Iterator<Item = Doy> {
        (1..=DOYS_PER_YEAR as u16).map(Doy)
    }
}

impl std::fmt::Display for Doy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
