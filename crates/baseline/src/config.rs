//! Configuration for baseline computation.

use floodstat_calendar::YearWindow;

use crate::error::BaselineError;

/// Configuration for day-of-year baseline computation.
///
/// # Example
///
/// ```
/// use floodstat_baseline::BaselineConfig;
///
/// let config = BaselineConfig::new(2024)
///     .with_window_years(10)
///     .with_smoothing_window_days(11);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BaselineConfig {
    reference_year: i32,
    window_years: u32,
    smoothing_window_days: usize,
    min_periods: Option<usize>,
}

impl BaselineConfig {
    /// Creates a new configuration for `reference_year` with defaults.
    ///
    /// Defaults: `window_years = 10`, `smoothing_window_days = 11`,
    /// `min_periods = smoothing_window_days`.
    pub fn new(reference_year: i32) -> Self {
        Self {
            reference_year,
            window_years: 10,
            smoothing_window_days: 11,
            min_periods: None,
        }
    }

    // --- Builder methods ---

    /// Sets the reference year. The baseline covers the years before it.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    /// Sets the number of years in the baseline window.
    pub fn with_window_years(mut self, n: u32) -> Self {
        self.window_years = n;
        self
    }

    /// Sets the width of the centered moving average, in days.
    pub fn with_smoothing_window_days(mut self, n: usize) -> Self {
        self.smoothing_window_days = n;
        self
    }

    /// Sets the minimum number of non-missing values a smoothing window
    /// needs to produce a value.
    pub fn with_min_periods(mut self, n: usize) -> Self {
        self.min_periods = Some(n);
        self
    }

    // --- Accessors ---

    /// Returns the reference year.
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Returns the number of years in the baseline window.
    pub fn window_years(&self) -> u32 {
        self.window_years
    }

    /// Returns the smoothing window width in days.
    pub fn smoothing_window_days(&self) -> usize {
        self.smoothing_window_days
    }

    /// Returns the effective minimum number of non-missing values per window.
    pub fn min_periods(&self) -> usize {
        self.min_periods.unwrap_or(self.smoothing_window_days)
    }

    /// The years averaged into the baseline:
    /// `reference_year - window_years ..= reference_year - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`BaselineError::Calendar`] if `window_years` is 0.
    pub fn year_window(&self) -> Result<YearWindow, BaselineError> {
        Ok(YearWindow::preceding(self.reference_year, self.window_years)?)
    }

    /// Validates this configuration.
    ///
    /// Checks that `window_years` is at least 1, `smoothing_window_days` is a
    /// positive odd number, and `min_periods` is in `1..=smoothing_window_days`.
    pub fn validate(&self) -> Result<(), BaselineError> {
        if self.window_years < 1 {
            return Err(BaselineError::InvalidConfig {
                reason: format!("window_years must be >= 1, got {}", self.window_years),
            });
        }

        let w = self.smoothing_window_days;
        if w < 1 || w % 2 == 0 {
            return Err(BaselineError::InvalidConfig {
                reason: format!("smoothing_window_days must be a positive odd number, got {w}"),
            });
        }

        let m = self.min_periods();
        if m < 1 || m > w {
            return Err(BaselineError::InvalidConfig {
                reason: format!("min_periods must be in 1..={w}, got {m}"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = BaselineConfig::new(2024);
        assert_eq!(c.reference_year(), 2024);
        assert_eq!(c.window_years(), 10);
        assert_eq!(c.smoothing_window_days(), 11);
        assert_eq!(c.min_periods(), 11);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn min_periods_follows_window_until_set() {
        let c = BaselineConfig::new(2024).with_smoothing_window_days(5);
        assert_eq!(c.min_periods(), 5);
        let c = c.with_min_periods(3);
        assert_eq!(c.min_periods(), 3);
    }

    #[test]
    fn year_window_precedes_reference() {
        let w = BaselineConfig::new(2024).year_window().unwrap();
        assert_eq!(w.first(), 2014);
        assert_eq!(w.last(), 2023);
    }

    #[test]
    fn rejects_even_window() {
        let err = BaselineConfig::new(2024)
            .with_smoothing_window_days(10)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: smoothing_window_days must be a positive odd number, got 10"
        );
    }

    #[test]
    fn rejects_zero_years() {
        let c = BaselineConfig::new(2024).with_window_years(0);
        assert!(c.validate().is_err());
        assert!(matches!(
            c.year_window(),
            Err(BaselineError::Calendar { .. })
        ));
    }

    #[test]
    fn rejects_min_periods_out_of_range() {
        assert!(BaselineConfig::new(2024).with_min_periods(0).validate().is_err());
        assert!(BaselineConfig::new(2024).with_min_periods(12).validate().is_err());
        assert!(BaselineConfig::new(2024).with_min_periods(1).validate().is_ok());
    }
}
