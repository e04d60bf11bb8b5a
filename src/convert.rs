//! Pure conversion functions: TOML config structs -> library config types.

use std::collections::BTreeSet;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};

use floodstat_baseline::BaselineConfig;
use floodstat_calendar::{DateWindow, default_run_date};
use floodstat_return_period::{Lp3Method, ScoringConfig};

use crate::config::{BaselineToml, IoToml, Lp3Toml, ReturnPeriodToml};
use crate::io::CsvLayout;

/// The run date from the command line, or five days before today.
pub fn resolve_run_date(run_date: Option<NaiveDate>) -> NaiveDate {
    run_date.unwrap_or_else(|| default_run_date(chrono::Local::now().date_naive()))
}

/// Builds a [`CsvLayout`] from the `[io]` table.
///
/// Column names must be non-empty and distinct.
pub fn build_layout(io: &IoToml) -> Result<CsvLayout> {
    if io.key_columns.is_empty() {
        bail!("[io].key_columns must name at least one column");
    }
    let mut seen = BTreeSet::new();
    for name in io
        .key_columns
        .iter()
        .chain([&io.date_column, &io.value_column, &io.year_column])
    {
        if name.trim().is_empty() {
            bail!("[io] column names must not be empty");
        }
        if !seen.insert(name.as_str()) {
            bail!("[io] column {name:?} is used twice");
        }
    }
    Ok(CsvLayout {
        key_columns: io.key_columns.clone(),
        date_column: io.date_column.clone(),
        value_column: io.value_column.clone(),
        year_column: io.year_column.clone(),
        date_format: io.date_format.clone(),
    })
}

/// Builds a validated [`BaselineConfig`].
///
/// The reference year comes from `reference_year`, then `[baseline]`, then
/// the run date.
pub fn build_baseline_config(
    baseline: &BaselineToml,
    run_date: NaiveDate,
    reference_year: Option<i32>,
) -> Result<BaselineConfig> {
    let year = reference_year
        .or(baseline.reference_year)
        .unwrap_or_else(|| run_date.year());
    let mut cfg = BaselineConfig::new(year)
        .with_window_years(baseline.window_years)
        .with_smoothing_window_days(baseline.smoothing_window_days);
    if let Some(n) = baseline.min_periods {
        cfg = cfg.with_min_periods(n);
    }
    cfg.validate().context("invalid [baseline] settings")?;
    Ok(cfg)
}

/// Builds a validated [`ScoringConfig`].
pub fn build_scoring_config(rp: &ReturnPeriodToml) -> Result<ScoringConfig> {
    let cfg = ScoringConfig::new()
        .with_decimals(rp.decimals)
        .with_upper_bound(rp.upper);
    cfg.validate().context("invalid [return_period] settings")?;
    Ok(cfg)
}

/// History window for annual maxima: everything through December 31 of
/// `[return_period].maxima_end_year`, or of the year before the run date.
pub fn maxima_window(rp: &ReturnPeriodToml, run_date: NaiveDate) -> Result<DateWindow> {
    let last = rp.maxima_end_year.unwrap_or(run_date.year() - 1);
    DateWindow::through_year(last).context("invalid maxima window")
}

/// Recent window scored against the maxima: `run_date - recent_days ..= run_date`.
pub fn recent_window(rp: &ReturnPeriodToml, run_date: NaiveDate) -> Result<DateWindow> {
    DateWindow::trailing(run_date, rp.recent_days).context("invalid [return_period].recent_days")
}

/// Resolves the LP3 method, preferring the command-line override.
pub fn build_lp3_method(lp3: &Lp3Toml, method: Option<&str>) -> Result<Lp3Method> {
    let name = method.unwrap_or(&lp3.method);
    name.parse::<Lp3Method>().context("invalid LP3 method")
}

/// Checks the return periods tabulated by `lp3`.
pub fn build_return_periods(lp3: &Lp3Toml) -> Result<Vec<f64>> {
    if lp3.return_periods.is_empty() {
        bail!("[lp3].return_periods must not be empty");
    }
    if let Some(bad) = lp3
        .return_periods
        .iter()
        .find(|rp| !rp.is_finite() || **rp < 1.0)
    {
        bail!("[lp3].return_periods must be finite and >= 1, got {bad}");
    }
    Ok(lp3.return_periods.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FloodstatConfig;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn layout_rejects_duplicate_columns() {
        let mut io = IoToml::default();
        assert!(build_layout(&io).is_ok());
        io.value_column = "pcode".to_string();
        let err = build_layout(&io).unwrap_err();
        assert!(err.to_string().contains("\"pcode\" is used twice"));
        io.key_columns.clear();
        assert!(build_layout(&io).is_err());
    }

    #[test]
    fn reference_year_precedence() {
        let mut toml = BaselineToml::default();
        let run = date(2024, 6, 30);
        assert_eq!(build_baseline_config(&toml, run, None).unwrap().reference_year(), 2024);
        toml.reference_year = Some(2020);
        assert_eq!(build_baseline_config(&toml, run, None).unwrap().reference_year(), 2020);
        assert_eq!(
            build_baseline_config(&toml, run, Some(2019)).unwrap().reference_year(),
            2019
        );
    }

    #[test]
    fn even_smoothing_window_is_rejected() {
        let toml = BaselineToml {
            smoothing_window_days: 10,
            ..BaselineToml::default()
        };
        assert!(build_baseline_config(&toml, date(2024, 1, 1), None).is_err());
    }

    #[test]
    fn windows_follow_run_date() {
        let config = FloodstatConfig::default();
        let run = date(2024, 6, 30);
        let max = maxima_window(&config.return_period, run).unwrap();
        assert_eq!(max.end(), date(2023, 12, 31));
        let recent = recent_window(&config.return_period, run).unwrap();
        assert_eq!(recent.start(), date(2024, 4, 1));
        assert_eq!(recent.end(), run);
    }

    #[test]
    fn method_override_and_return_periods() {
        let lp3 = Lp3Toml::default();
        assert_eq!(build_lp3_method(&lp3, None).unwrap(), Lp3Method::Lmoments);
        assert_eq!(
            build_lp3_method(&lp3, Some("USGS-Moments")).unwrap(),
            Lp3Method::UsgsMoments
        );
        assert!(build_lp3_method(&lp3, Some("gev")).is_err());

        assert_eq!(build_return_periods(&lp3).unwrap().len(), 7);
        let bad = Lp3Toml {
            return_periods: vec![2.0, 0.5],
            ..Lp3Toml::default()
        };
        assert!(build_return_periods(&bad).is_err());
    }
}
