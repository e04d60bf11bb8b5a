//! Closed year and date windows.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::CalendarError;

/// Closed range of calendar years `first..=last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearWindow {
    first: i32,
    last: i32,
}

impl YearWindow {
    /// The `n_years` full calendar years strictly before `reference_year`,
    /// i.e. `reference_year - n_years ..= reference_year - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidYearWindow`] if `n_years` is 0.
    pub fn preceding(reference_year: i32, n_years: u32) -> Result<Self, CalendarError> {
        if n_years == 0 {
            return Err(CalendarError::InvalidYearWindow {
                reference_year,
                n_years,
            });
        }
        let span = i32::try_from(n_years).map_err(|_| CalendarError::InvalidYearWindow {
            reference_year,
            n_years,
        })?;
        Ok(Self {
            first: reference_year.saturating_sub(span),
            last: reference_year.saturating_sub(1),
        })
    }

    /// First year of the window.
    pub fn first(self) -> i32 {
        self.first
    }

    /// Last year of the window.
    pub fn last(self) -> i32 {
        self.last
    }

    /// Number of years covered.
    pub fn n_years(self) -> usize {
        (self.last - self.first + 1) as usize
    }

    /// Whether `year` lies inside the window.
    pub fn contains(self, year: i32) -> bool {
        (self.first..=self.last).contains(&year)
    }

    /// Whether the calendar year of `date` lies inside the window.
    pub fn contains_date(self, date: NaiveDate) -> bool {
        self.contains(date.year())
    }
}

/// Closed range of calendar dates `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Creates a window from its first and last day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDateWindow`] if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidDateWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Everything up to and including December 31 of `last_year`.
    ///
    /// This is the historical window used for annual maxima: passing the year
    /// before the run year excludes the current, incomplete year.
    pub fn through_year(last_year: i32) -> Result<Self, CalendarError> {
        let end = NaiveDate::from_ymd_opt(last_year, 12, 31).ok_or_else(|| {
            CalendarError::DateOutOfRange {
                reason: format!("December 31 of year {last_year}"),
            }
        })?;
        Self::new(NaiveDate::MIN, end)
    }

    /// Full calendar years of a [`YearWindow`].
    pub fn from_years(years: YearWindow) -> Result<Self, CalendarError> {
        let start = NaiveDate::from_ymd_opt(years.first(), 1, 1).ok_or_else(|| {
            CalendarError::DateOutOfRange {
                reason: format!("January 1 of year {}", years.first()),
            }
        })?;
        let end = NaiveDate::from_ymd_opt(years.last(), 12, 31).ok_or_else(|| {
            CalendarError::DateOutOfRange {
                reason: format!("December 31 of year {}", years.last()),
            }
        })?;
        Self::new(start, end)
    }

    /// The `days` days before `end` plus `end` itself: `end - days ..= end`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTrailingDays`] if `days < 1`.
    pub fn trailing(end: NaiveDate, days: i64) -> Result<Self, CalendarError> {
        if days < 1 {
            return Err(CalendarError::InvalidTrailingDays { days });
        }
        let start = end
            .checked_sub_days(Days::new(days as u64))
            .ok_or_else(|| CalendarError::DateOutOfRange {
                reason: format!("{days} days before {end}"),
            })?;
        Self::new(start, end)
    }

    /// First day of the window.
    pub fn start(self) -> NaiveDate {
        self.start
    }

    /// Last day of the window.
    pub fn end(self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies inside the window.
    pub fn contains(self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates over every day of the window in ascending order.
    pub fn dates(self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

/// Default processing date when none is supplied: five days before `today`,
/// the usual latency of the daily flood-extent product.
pub fn default_run_date(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(5)).unwrap_or(today)
}
