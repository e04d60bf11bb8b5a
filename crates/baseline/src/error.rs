//! Error types for the floodstat-baseline crate.

use floodstat_calendar::CalendarError;

/// Error type for all fallible operations in the floodstat-baseline crate.
///
/// Missing data never produces an error here; it shows up as `NaN` in the
/// baseline. Only configuration mistakes are reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BaselineError {
    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Wraps an error originating from the floodstat-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },
}

impl From<CalendarError> for BaselineError {
    fn from(e: CalendarError) -> Self {
        BaselineError::Calendar {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_config() {
        let e = BaselineError::InvalidConfig {
            reason: "smoothing_window_days must be odd, got 10".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid configuration: smoothing_window_days must be odd, got 10"
        );
    }

    #[test]
    fn error_from_calendar() {
        let e: BaselineError = CalendarError::InvalidDoy { doy: 0 }.into();
        assert_eq!(
            e.to_string(),
            "calendar error: invalid day of year: 0 (must be 1..=366)"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<BaselineError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<BaselineError>();
    }
}
