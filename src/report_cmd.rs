//! Report command: recent return periods side by side with the baseline.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use floodstat_baseline::compute_table_baseline;

use crate::cli::ReportArgs;
use crate::config::FloodstatConfig;
use crate::{convert, io, report, rp_cmd};

/// Run the merged report pipeline.
pub fn run(args: ReportArgs) -> Result<()> {
    let _cmd = info_span!("report").entered();
    let config = FloodstatConfig::load(args.config.as_deref())?;
    let layout = convert::build_layout(&config.io)?;
    let run_date = convert::resolve_run_date(args.run_date);
    let baseline_cfg = convert::build_baseline_config(&config.baseline, run_date, None)?;
    info!(%run_date, reference_year = baseline_cfg.reference_year(), "building report");

    let history = rp_cmd::read_history(&args.history, &layout)?;
    let baseline = compute_table_baseline(&history, &baseline_cfg)?;
    let scored = rp_cmd::score_recent(
        &config,
        &layout,
        Some(&history),
        args.current.as_deref(),
        None,
        run_date,
    )?;

    let merged = report::merge(&scored, &baseline);
    merged.log_strata();

    io::write_report(io::create(&args.output)?, &merged, &layout)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), n_rows = merged.rows().len(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{date, write_history};
    use tempfile::TempDir;

    #[test]
    fn joins_recent_scores_with_baseline() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("floodstat.toml");
        std::fs::write(
            &config,
            "[baseline]\nwindow_years = 3\n\n[return_period]\nrecent_days = 9\n",
        )
        .unwrap();
        let output = dir.path().join("report.csv");
        run(ReportArgs {
            config: Some(config),
            history: write_history(dir.path()),
            current: None,
            output: output.clone(),
            run_date: Some(date(2024, 6, 30)),
        })
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("iso3,pcode,date,value,rp,baseline"));
        let so11: Vec<&str> = lines.filter(|l| l.contains("SO11")).collect();
        assert_eq!(so11.len(), 10);
        // Every recent SO11 day has a baseline.
        assert!(so11.iter().all(|l| !l.ends_with(',')));
    }
}
