//! Lp3 command: per-unit Log-Pearson III fits and return-value tables.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use floodstat_return_period::{fit_by_group, to_value};

use crate::cli::Lp3Args;
use crate::config::FloodstatConfig;
use crate::io::ReturnValueRow;
use crate::{convert, io, rp_cmd};

/// Run the LP3 pipeline.
pub fn run(args: Lp3Args) -> Result<()> {
    let _cmd = info_span!("lp3").entered();
    let config = FloodstatConfig::load(args.config.as_deref())?;
    let layout = convert::build_layout(&config.io)?;
    let method = convert::build_lp3_method(&config.lp3, args.method.as_deref())?;
    let periods = convert::build_return_periods(&config.lp3)?;

    let maxima = match (&args.maxima, &args.history) {
        (Some(path), _) => io::read_maxima(io::open(path)?, &layout)
            .with_context(|| format!("failed to read maxima CSV: {}", path.display()))?,
        (None, Some(path)) => {
            let history = rp_cmd::read_history(path, &layout)?;
            let run_date = convert::resolve_run_date(args.run_date);
            history.annual_maxima(convert::maxima_window(&config.return_period, run_date)?)
        }
        (None, None) => bail!("lp3 needs either --maxima or --history"),
    };
    info!(n_units = maxima.n_units(), %method, "fitting LP3");

    let fits = fit_by_group(&maxima, method);
    for (key, err) in fits.skipped() {
        warn!(unit = %key, error = %err, "unit not fitted");
    }

    let mut rows = Vec::with_capacity(fits.n_fitted() * periods.len());
    for (key, params) in fits.iter() {
        let values = to_value(&periods, params, method)
            .with_context(|| format!("failed to invert LP3 fit of unit {key}"))?;
        rows.extend(
            periods
                .iter()
                .zip(values)
                .map(|(&return_period, value)| ReturnValueRow {
                    key: key.clone(),
                    return_period,
                    value,
                }),
        );
    }

    let output = io::create(&args.output)?;
    io::write_return_values(output, &rows, method.as_str(), &layout.key_columns)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(
        path = %args.output.display(),
        n_fitted = fits.n_fitted(),
        n_skipped = fits.skipped().len(),
        "return values written"
    );

    if let Some(path) = args.params {
        let pairs: Vec<_> = fits.iter().collect();
        serde_json::to_writer_pretty(io::create(&path)?, &pairs)
            .with_context(|| format!("failed to write parameters JSON: {}", path.display()))?;
    }
    Ok(())
}
