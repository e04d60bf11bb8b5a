//! Baseline command: daily history -> 366-day climatology per unit.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use floodstat_baseline::{compute_grid_baseline, compute_table_baseline};

use crate::cli::BaselineArgs;
use crate::config::FloodstatConfig;
use crate::{convert, io};

/// Run the baseline pipeline.
pub fn run(args: BaselineArgs) -> Result<()> {
    let _cmd = info_span!("baseline").entered();
    let config = FloodstatConfig::load(args.config.as_deref())?;
    let layout = convert::build_layout(&config.io)?;
    let run_date = convert::resolve_run_date(args.run_date);
    let baseline_cfg =
        convert::build_baseline_config(&config.baseline, run_date, args.reference_year)?;
    info!(
        reference_year = baseline_cfg.reference_year(),
        window_years = baseline_cfg.window_years(),
        smoothing_window_days = baseline_cfg.smoothing_window_days(),
        "baseline settings"
    );

    info!(path = %args.input.display(), grid = args.grid, "reading history");
    if args.grid {
        let (grid, cells) = io::read_grid(io::open(&args.input)?, &layout)
            .with_context(|| format!("failed to read grid CSV: {}", args.input.display()))?;
        info!(n_cells = grid.n_cells(), n_timesteps = grid.n_timesteps(), "grid loaded");
        let baseline = compute_grid_baseline(&grid, &baseline_cfg)?;
        io::write_grid_baseline(io::create(&args.output)?, &baseline, &cells)
            .with_context(|| format!("failed to write {}", args.output.display()))?;
    } else {
        let history = io::read_observations(io::open(&args.input)?, &layout)
            .with_context(|| format!("failed to read history CSV: {}", args.input.display()))?;
        info!(
            n_units = history.n_units(),
            n_observations = history.n_observations(),
            "history loaded"
        );
        let baseline = compute_table_baseline(&history, &baseline_cfg)?;
        io::write_baseline(io::create(&args.output)?, &baseline, &layout.key_columns)
            .with_context(|| format!("failed to write {}", args.output.display()))?;
    }
    info!(path = %args.output.display(), "baseline written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::write_history;
    use tempfile::TempDir;

    #[test]
    fn writes_366_rows_per_unit() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("baseline.csv");
        run(BaselineArgs {
            config: None,
            input: write_history(dir.path()),
            output: output.clone(),
            grid: false,
            reference_year: Some(2024),
            run_date: None,
        })
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("iso3,pcode,doy,baseline"));
        assert_eq!(lines.count(), 2 * 366);
    }

    #[test]
    fn unreadable_input_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("baseline.csv");
        let err = run(BaselineArgs {
            config: None,
            input: dir.path().join("absent.csv"),
            output: output.clone(),
            grid: false,
            reference_year: Some(2024),
            run_date: None,
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("absent.csv"));
        assert!(!output.exists());
    }
}
