//! Return periods of flood-extent observations.
//!
//! Two estimators map an observed value to the average number of years
//! between events at least that large:
//!
//! - **Empirical**: each unit's annual maxima are ranked and given
//!   `RP = (n + 1) / rank`; current observations are scored by linear
//!   interpolation on that curve ([`add_return_periods`]).
//! - **Log-Pearson III**: a parametric fit to the log10 maxima with three
//!   estimation methods ([`Lp3Method`]), used both to score values
//!   ([`to_rp`]) and to compute return values ([`to_value`]).
//!
//! # Pipeline
//!
//! ```mermaid
//! flowchart LR
//!     A[annual maxima] --> B[drop all-missing units]
//!     B --> C[rank: RP = n+1 / rank]
//!     C --> D[RpCurve per unit]
//!     E[current observations] --> F[interpolate]
//!     D --> F
//!     F --> G[round, clamp > 10 to inf]
//! ```
//!
//! # Glossary
//!
//! - **RP**: return period, the inverse of the annual exceedance probability
//! - **NaN strata**: units whose values are all missing
//! - **PE3**: Pearson type III distribution
//!
//! # Quick Start
//!
//! ```
//! use floodstat_return_period::{Lp3Method, fit, to_rp, to_value};
//!
//! let maxima = [0.12, 0.31, 0.05, 0.22, 0.47, 0.18, 0.09, 0.27];
//! let params = fit(&maxima, Lp3Method::UsgsMoments).unwrap();
//! let rp = to_rp(&[0.3], &params, Lp3Method::UsgsMoments).unwrap();
//! let back = to_value(&rp, &params, Lp3Method::UsgsMoments).unwrap();
//! assert!((back[0] - 0.3).abs() < 1e-9);
//! ```

mod curve;
mod empirical;
mod error;
pub mod lp3;
mod scoring;
mod strata;

pub use curve::{LOWER_FILL_RP, RpCurve, interpolate};
pub use empirical::{RpSample, RpTable, empirical_return_periods, estimate_empirical_rp};
pub use error::ReturnPeriodError;
pub use lp3::{
    GroupFits, Lp3Method, Lp3Params, PearsonIII, fit, fit_all_methods, fit_by_group, to_rp,
    to_value,
};
pub use scoring::{
    ScoredObservation, ScoredObservations, ScoringConfig, add_return_periods, clean_return_period,
};
pub use strata::extract_nan_strata;
