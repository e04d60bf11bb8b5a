//! Rp command: score recent observations against empirical annual-maxima
//! curves.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing::{info, info_span, warn};

use floodstat_return_period::{ScoredObservations, add_return_periods};
use floodstat_series::SeriesTable;

use crate::cli::RpArgs;
use crate::config::FloodstatConfig;
use crate::io::CsvLayout;
use crate::{convert, io};

/// Run the empirical scoring pipeline.
pub fn run(args: RpArgs) -> Result<()> {
    let _cmd = info_span!("rp").entered();
    let config = FloodstatConfig::load(args.config.as_deref())?;
    let layout = convert::build_layout(&config.io)?;
    let run_date = convert::resolve_run_date(args.run_date);

    let history = match (&args.history, &args.current, &args.maxima) {
        (Some(path), _, _) => Some(read_history(path, &layout)?),
        (None, Some(_), Some(_)) => None,
        (None, _, _) => {
            bail!("rp needs --history unless both --current and --maxima are given")
        }
    };
    let scored = score_recent(
        &config,
        &layout,
        history.as_ref(),
        args.current.as_deref(),
        args.maxima.as_deref(),
        run_date,
    )?;

    io::write_scored(io::create(&args.output)?, scored.rows(), &layout)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), n_rows = scored.rows().len(), "scores written");

    if let Some(path) = args.curves {
        // UnitKey is a field list, so curves go out as (key, curve) pairs.
        let pairs: Vec<_> = scored.curves().iter().collect();
        serde_json::to_writer_pretty(io::create(&path)?, &pairs)
            .with_context(|| format!("failed to write curves JSON: {}", path.display()))?;
        info!(path = %path.display(), n_curves = pairs.len(), "curves written");
    }
    Ok(())
}

/// Reads the daily history CSV.
pub fn read_history(path: &Path, layout: &CsvLayout) -> Result<SeriesTable> {
    info!(path = %path.display(), "reading history");
    let history = io::read_observations(io::open(path)?, layout)
        .with_context(|| format!("failed to read history CSV: {}", path.display()))?;
    info!(
        n_units = history.n_units(),
        n_observations = history.n_observations(),
        "history loaded"
    );
    Ok(history)
}

/// Scores the observations of the recent window.
///
/// Maxima come from `maxima` when given, otherwise from `history` up to the
/// configured end year. Recent observations come from `current` when given,
/// otherwise from `history`; either way only the trailing
/// `[return_period].recent_days` before `run_date` are kept.
pub fn score_recent(
    config: &FloodstatConfig,
    layout: &CsvLayout,
    history: Option<&SeriesTable>,
    current: Option<&Path>,
    maxima: Option<&Path>,
    run_date: NaiveDate,
) -> Result<ScoredObservations> {
    let scoring = convert::build_scoring_config(&config.return_period)?;

    let maxima = match (maxima, history) {
        (Some(path), _) => io::read_maxima(io::open(path)?, layout)
            .with_context(|| format!("failed to read maxima CSV: {}", path.display()))?,
        (None, Some(history)) => {
            let window = convert::maxima_window(&config.return_period, run_date)?;
            history.annual_maxima(window)
        }
        (None, None) => bail!("no annual maxima: give a maxima CSV or a history"),
    };
    info!(n_units = maxima.n_units(), "annual maxima ready");

    let recent_window = convert::recent_window(&config.return_period, run_date)?;
    let recent = match (current, history) {
        (Some(path), _) => io::read_observations(io::open(path)?, layout)
            .with_context(|| format!("failed to read current CSV: {}", path.display()))?
            .restrict(recent_window),
        (None, Some(history)) => history.restrict(recent_window),
        (None, None) => bail!("no recent observations: give a current CSV or a history"),
    };
    if recent.is_empty() {
        warn!(
            start = %recent_window.start(),
            end = %recent_window.end(),
            "no observations in the recent window"
        );
    }

    let scored = add_return_periods(&recent, &maxima, &scoring)?;
    info!(
        n_rows = scored.rows().len(),
        n_curves = scored.curves().len(),
        "recent observations scored"
    );
    Ok(scored)
}
