//! Grouped scoring of current observations against historical maxima.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use floodstat_series::{AnnualMaxima, SeriesTable, UnitKey};
use floodstat_stats::round_to;
use tracing::{debug, info};

use crate::curve::{RpCurve, interpolate};
use crate::empirical::rank_groups;
use crate::error::ReturnPeriodError;
use crate::strata::extract_nan_strata;

/// Cleanup policy applied to scored return periods.
///
/// # Example
///
/// ```
/// use floodstat_return_period::ScoringConfig;
///
/// let config = ScoringConfig::new().with_upper_bound(25.0);
/// assert_eq!(config.decimals(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ScoringConfig {
    decimals: u32,
    upper_bound: f64,
}

impl ScoringConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `decimals = 3`, `upper_bound = 10.0`.
    pub fn new() -> Self {
        Self {
            decimals: 3,
            upper_bound: 10.0,
        }
    }

    /// Sets the number of decimals RPs are rounded to.
    pub fn with_decimals(mut self, n: u32) -> Self {
        self.decimals = n;
        self
    }

    /// Sets the RP above which results are reported as infinite.
    pub fn with_upper_bound(mut self, v: f64) -> Self {
        self.upper_bound = v;
        self
    }

    /// Returns the number of decimals.
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Returns the upper bound.
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Validates this configuration.
    ///
    /// Checks that `decimals` is at most 15 and `upper_bound` is finite and
    /// at least 1.
    pub fn validate(&self) -> Result<(), ReturnPeriodError> {
        if self.decimals > 15 {
            return Err(ReturnPeriodError::InvalidConfig {
                reason: format!("decimals must be <= 15, got {}", self.decimals),
            });
        }
        if !self.upper_bound.is_finite() || self.upper_bound < 1.0 {
            return Err(ReturnPeriodError::InvalidConfig {
                reason: format!(
                    "upper_bound must be finite and >= 1, got {}",
                    self.upper_bound
                ),
            });
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rounds `rp`, then maps anything strictly above the upper bound to
/// infinity. `NaN` stays `NaN`.
pub fn clean_return_period(rp: f64, config: &ScoringConfig) -> f64 {
    let rounded = round_to(rp, config.decimals());
    if rounded > config.upper_bound() {
        f64::INFINITY
    } else {
        rounded
    }
}

/// One current observation with its return period.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredObservation {
    /// Spatial unit.
    pub key: UnitKey,
    /// Observation date.
    pub date: NaiveDate,
    /// Observed value.
    pub value: f64,
    /// Cleaned return period; `NaN` when it cannot be determined.
    pub rp: f64,
}

/// Result of [`add_return_periods`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredObservations {
    rows: Vec<ScoredObservation>,
    curves: BTreeMap<UnitKey, RpCurve>,
    observation_strata: BTreeSet<UnitKey>,
    maxima_strata: BTreeSet<UnitKey>,
}

impl ScoredObservations {
    /// Scored rows in (key, date) order, one per input observation.
    pub fn rows(&self) -> &[ScoredObservation] {
        &self.rows
    }

    /// Consumes the result, returning its rows.
    pub fn into_rows(self) -> Vec<ScoredObservation> {
        self.rows
    }

    /// The interpolation curve of every unit that had usable maxima.
    pub fn curves(&self) -> &BTreeMap<UnitKey, RpCurve> {
        &self.curves
    }

    /// Units whose current observations are all missing.
    pub fn observation_strata(&self) -> &BTreeSet<UnitKey> {
        &self.observation_strata
    }

    /// Units whose annual maxima are all missing.
    pub fn maxima_strata(&self) -> &BTreeSet<UnitKey> {
        &self.maxima_strata
    }
}

/// Adds a return period to every current observation, interpolated on its
/// unit's empirical annual-maxima curve.
///
/// Grouping is by the full [`UnitKey`]. Units whose maxima or observations
/// are all missing are left out of fitting and scoring; their observations
/// are kept with a `NaN` RP. Observations of a unit with no maxima at all
/// also get `NaN`. RPs are then cleaned with [`clean_return_period`].
///
/// # Errors
///
/// Returns [`ReturnPeriodError::InvalidConfig`] for a bad `config`, and
/// [`ReturnPeriodError::InvalidInput`] if a unit's maxima are only partly
/// missing.
#[tracing::instrument(skip_all, fields(n_units = observations.n_units(), n_maxima_units = maxima.n_units()))]
pub fn add_return_periods(
    observations: &SeriesTable,
    maxima: &AnnualMaxima,
    config: &ScoringConfig,
) -> Result<ScoredObservations, ReturnPeriodError> {
    config.validate()?;

    let observation_strata = extract_nan_strata(observations.value_groups());
    let maxima_strata = extract_nan_strata(maxima.value_groups());
    if !maxima_strata.is_empty() || !observation_strata.is_empty() {
        info!(
            maxima = maxima_strata.len(),
            observations = observation_strata.len(),
            "excluding all-missing units"
        );
    }

    let usable = maxima
        .iter()
        .filter(|(k, _)| !maxima_strata.contains(*k))
        .collect();
    let curves = rank_groups(usable)?.curves();

    let mut rows = Vec::with_capacity(observations.n_observations());
    for (key, series) in observations.iter() {
        let curve = if observation_strata.contains(key) {
            None
        } else {
            curves.get(key)
        };
        if curve.is_none() {
            debug!(unit = %key, "no curve; return periods left missing");
        }
        for (date, value) in series.iter() {
            let rp = curve.map_or(f64::NAN, |c| interpolate(c, value));
            rows.push(ScoredObservation {
                key: key.clone(),
                date,
                value,
                rp: clean_return_period(rp, config),
            });
        }
    }

    Ok(ScoredObservations {
        rows,
        curves,
        observation_strata,
        maxima_strata,
    })
}
