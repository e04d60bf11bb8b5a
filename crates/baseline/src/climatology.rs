//! Per-unit smoothing and day-of-year averaging.

use std::borrow::Cow;

use chrono::NaiveDate;
use floodstat_calendar::{DOYS_PER_YEAR, Doy, YearWindow};

use crate::result::DoyBaseline;
use crate::smooth::centered_moving_average;

/// Running NaN-skipping sums for each of the 366 days of year.
#[derive(Debug, Clone)]
struct DoyAccumulator {
    sums: [f64; DOYS_PER_YEAR],
    counts: [u32; DOYS_PER_YEAR],
}

impl DoyAccumulator {
    fn new() -> Self {
        Self {
            sums: [0.0; DOYS_PER_YEAR],
            counts: [0; DOYS_PER_YEAR],
        }
    }

    fn push(&mut self, doy: Doy, value: f64) {
        if value.is_nan() {
            return;
        }
        let i = doy.index();
        self.sums[i] += value;
        self.counts[i] += 1;
    }

    fn finish(self) -> DoyBaseline {
        let values = self
            .sums
            .iter()
            .zip(self.counts.iter())
            .map(|(&s, &c)| if c == 0 { f64::NAN } else { s / f64::from(c) })
            .collect();
        DoyBaseline::from_values(values)
    }
}

/// Puts a strictly increasing series on a continuous daily axis from its
/// first to its last date, with `NaN` on the absent days.
fn fill_date_gaps<'a>(
    dates: &'a [NaiveDate],
    values: &'a [f64],
) -> (Cow<'a, [NaiveDate]>, Cow<'a, [f64]>) {
    let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
        return (Cow::Borrowed(dates), Cow::Borrowed(values));
    };
    let span = (last - first).num_days() as usize + 1;
    if span == dates.len() {
        return (Cow::Borrowed(dates), Cow::Borrowed(values));
    }

    let mut dense = vec![f64::NAN; span];
    for (&date, &value) in dates.iter().zip(values) {
        dense[(date - first).num_days() as usize] = value;
    }
    let axis = first.iter_days().take(span).collect();
    (Cow::Owned(axis), Cow::Owned(dense))
}

/// Smooths one unit's series, then averages the smoothed values falling in
/// `years` by day of year.
///
/// Smoothing windows span calendar days: dates missing from `dates` count
/// as missing values. The table and grid paths both call this, so they
/// agree on every cell.
pub(crate) fn unit_baseline(
    dates: &[NaiveDate],
    values: &[f64],
    years: YearWindow,
    window: usize,
    min_periods: usize,
) -> DoyBaseline {
    let (dates, values) = fill_date_gaps(dates, values);
    let smoothed = centered_moving_average(&values, window, min_periods);
    let mut acc = DoyAccumulator::new();
    for (&date, value) in dates.iter().zip(smoothed) {
        if years.contains_date(date) {
            acc.push(Doy::from_date(date), value);
        }
    }
    acc.finish()
}
