use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Flood-extent baselines and return periods.
#[derive(Parser)]
#[command(
    name = "floodstat",
    version,
    about = "Flood-extent day-of-year baselines and return periods"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute smoothed day-of-year baselines from a daily history.
    Baseline(BaselineArgs),
    /// Score recent observations with empirical return periods.
    Rp(RpArgs),
    /// Fit Log-Pearson III per unit and tabulate return values.
    Lp3(Lp3Args),
    /// Merge return periods and baselines for the recent window.
    Report(ReportArgs),
}

/// Arguments for the `baseline` subcommand.
#[derive(clap::Args)]
pub struct BaselineArgs {
    /// Path to TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Daily history CSV.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output baseline CSV.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Read the input as a wide grid: a date column plus one column per cell.
    #[arg(long)]
    pub grid: bool,

    /// Override the reference year (defaults to the run date's year).
    #[arg(long)]
    pub reference_year: Option<i32>,

    /// Override the run date (defaults to five days before today).
    #[arg(long)]
    pub run_date: Option<NaiveDate>,
}

/// Arguments for the `rp` subcommand.
#[derive(clap::Args)]
pub struct RpArgs {
    /// Path to TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Daily history CSV. Needed unless both `--current` and `--maxima` are given.
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Recent observations CSV. Defaults to the history itself.
    #[arg(long)]
    pub current: Option<PathBuf>,

    /// Precomputed annual maxima CSV (key columns, year, value).
    #[arg(long)]
    pub maxima: Option<PathBuf>,

    /// Output CSV of scored observations.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override the run date (defaults to five days before today).
    #[arg(long)]
    pub run_date: Option<NaiveDate>,

    /// Write the fitted empirical curves as JSON.
    #[arg(long)]
    pub curves: Option<PathBuf>,
}

/// Arguments for the `lp3` subcommand.
#[derive(clap::Args)]
pub struct Lp3Args {
    /// Path to TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Annual maxima CSV (key columns, year, value).
    #[arg(long, conflicts_with = "history")]
    pub maxima: Option<PathBuf>,

    /// Daily history CSV to derive annual maxima from.
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Output CSV of return values.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override the estimation method (lmoments, scipy-moments, usgs-moments).
    #[arg(short, long)]
    pub method: Option<String>,

    /// Override the run date used to cut the history (defaults to five days before today).
    #[arg(long)]
    pub run_date: Option<NaiveDate>,

    /// Write the fitted parameters as JSON.
    #[arg(long)]
    pub params: Option<PathBuf>,
}

/// Arguments for the `report` subcommand.
#[derive(clap::Args)]
pub struct ReportArgs {
    /// Path to TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Daily history CSV.
    #[arg(long)]
    pub history: PathBuf,

    /// Recent observations CSV. Defaults to the history itself.
    #[arg(long)]
    pub current: Option<PathBuf>,

    /// Output merged CSV.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override the run date (defaults to five days before today).
    #[arg(long)]
    pub run_date: Option<NaiveDate>,
}
