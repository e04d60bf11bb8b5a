//! Joins scored observations with the day-of-year baseline.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{info, warn};

use floodstat_baseline::BaselineTable;
use floodstat_calendar::Doy;
use floodstat_return_period::ScoredObservations;
use floodstat_series::UnitKey;

/// One merged row.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub key: UnitKey,
    pub date: NaiveDate,
    pub value: f64,
    pub rp: f64,
    /// Baseline for the observation's day of year; `NaN` when absent.
    pub baseline: f64,
}

/// Merged rows plus the units that could not be scored.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    rows: Vec<ReportRow>,
    observation_strata: BTreeSet<UnitKey>,
    maxima_strata: BTreeSet<UnitKey>,
}

impl Report {
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Units whose recent observations are all missing.
    pub fn observation_strata(&self) -> &BTreeSet<UnitKey> {
        &self.observation_strata
    }

    /// Units whose annual maxima are all missing.
    pub fn maxima_strata(&self) -> &BTreeSet<UnitKey> {
        &self.maxima_strata
    }

    /// Logs why some return periods are missing.
    pub fn log_strata(&self) {
        let maxima = self.maxima_strata();
        if !maxima.is_empty() {
            warn!(
                n = maxima.len(),
                units = %join_keys(maxima),
                "units with all-missing annual maxima have no return periods"
            );
        }
        let observations = self.observation_strata();
        if !observations.is_empty() {
            warn!(
                n = observations.len(),
                units = %join_keys(observations),
                "units with all-missing recent observations have no return periods"
            );
        }
    }
}

/// Left-joins every scored observation with the baseline of its unit on the
/// observation's day of year.
pub fn merge(scored: &ScoredObservations, baseline: &BaselineTable) -> Report {
    let rows: Vec<ReportRow> = scored
        .rows()
        .iter()
        .map(|r| ReportRow {
            key: r.key.clone(),
            date: r.date,
            value: r.value,
            rp: r.rp,
            baseline: baseline
                .get(&r.key, Doy::from_date(r.date))
                .unwrap_or(f64::NAN),
        })
        .collect();
    let unmatched = rows.iter().filter(|r| r.baseline.is_nan()).count();
    info!(n_rows = rows.len(), unmatched, "merged return periods with baseline");

    Report {
        rows,
        observation_strata: scored.observation_strata().clone(),
        maxima_strata: scored.maxima_strata().clone(),
    }
}

fn join_keys(keys: &BTreeSet<UnitKey>) -> String {
    keys.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
