//! Error types for the floodstat-return-period crate.

use crate::lp3::Lp3Method;

/// Error type for all fallible operations in the floodstat-return-period crate.
///
/// Missing values and out-of-range scoring never produce an error; they show
/// up as `NaN` return periods. The variants here cover programmer and
/// configuration mistakes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReturnPeriodError {
    /// Returned when a sample cannot be ranked or fitted as given, for
    /// example because it contains missing values.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when an estimation method name is not recognised.
    #[error("invalid LP3 method '{method}' (expected lmoments, scipy-moments or usgs-moments)")]
    InvalidMethod {
        /// The rejected method name.
        method: String,
    },

    /// Returned when parameters are used with a method other than the one
    /// that produced them.
    #[error("parameters were fitted with {fitted} but {requested} was requested")]
    MethodMismatch {
        /// Method that produced the parameters.
        fitted: Lp3Method,
        /// Method the caller asked for.
        requested: Lp3Method,
    },

    /// Returned when a sample is too small to fit.
    #[error("insufficient data: {n} values, at least {min} required")]
    InsufficientData {
        /// Number of values supplied.
        n: usize,
        /// Minimum number required.
        min: usize,
    },

    /// Returned when a sample has no spread in log space, or its L-moments
    /// fall outside the range a Pearson III can match.
    #[error("degenerate sample: {reason}")]
    DegenerateSample {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a statrs distribution cannot be constructed.
    ///
    /// The message is a `String` because statrs errors do not implement
    /// `Clone`.
    #[error("distribution construction failed: {message}")]
    Distribution {
        /// Description of the failure.
        message: String,
    },
}
