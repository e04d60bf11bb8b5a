use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level floodstat configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FloodstatConfig {
    /// CSV layout settings.
    #[serde(default)]
    pub io: IoToml,

    /// Baseline engine settings.
    #[serde(default)]
    pub baseline: BaselineToml,

    /// Empirical return period settings.
    #[serde(default)]
    pub return_period: ReturnPeriodToml,

    /// Log-Pearson III settings.
    #[serde(default)]
    pub lp3: Lp3Toml,
}

impl FloodstatConfig {
    /// Reads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_key_columns")]
    pub key_columns: Vec<String>,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    #[serde(default = "default_value_column")]
    pub value_column: String,
    #[serde(default = "default_year_column")]
    pub year_column: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            key_columns: default_key_columns(),
            date_column: default_date_column(),
            value_column: default_value_column(),
            year_column: default_year_column(),
            date_format: default_date_format(),
        }
    }
}

fn default_key_columns() -> Vec<String> {
    vec!["iso3".to_string(), "pcode".to_string()]
}
fn default_date_column() -> String {
    "date".to_string()
}
fn default_value_column() -> String {
    "value".to_string()
}
fn default_year_column() -> String {
    "year".to_string()
}
fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaselineToml {
    /// Year the baseline is computed for; defaults to the run date's year.
    #[serde(default)]
    pub reference_year: Option<i32>,
    #[serde(default = "default_window_years")]
    pub window_years: u32,
    #[serde(default = "default_smoothing_window_days")]
    pub smoothing_window_days: usize,
    #[serde(default)]
    pub min_periods: Option<usize>,
}

impl Default for BaselineToml {
    fn default() -> Self {
        Self {
            reference_year: None,
            window_years: default_window_years(),
            smoothing_window_days: default_smoothing_window_days(),
            min_periods: None,
        }
    }
}

fn default_window_years() -> u32 {
    10
}
fn default_smoothing_window_days() -> usize {
    11
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReturnPeriodToml {
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    #[serde(default = "default_upper")]
    pub upper: f64,
    /// Days before the run date scored as "recent".
    #[serde(default = "default_recent_days")]
    pub recent_days: i64,
    /// Last year of the maxima history; defaults to the year before the run date.
    #[serde(default)]
    pub maxima_end_year: Option<i32>,
}

impl Default for ReturnPeriodToml {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            upper: default_upper(),
            recent_days: default_recent_days(),
            maxima_end_year: None,
        }
    }
}

fn default_decimals() -> u32 {
    3
}
fn default_upper() -> f64 {
    10.0
}
fn default_recent_days() -> i64 {
    90
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Lp3Toml {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_return_periods")]
    pub return_periods: Vec<f64>,
}

impl Default for Lp3Toml {
    fn default() -> Self {
        Self {
            method: default_method(),
            return_periods: default_return_periods(),
        }
    }
}

fn default_method() -> String {
    "lmoments".to_string()
}
fn default_return_periods() -> Vec<f64> {
    vec![2.0, 3.0, 5.0, 10.0, 25.0, 50.0, 100.0]
}
