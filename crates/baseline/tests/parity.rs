use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use floodstat_baseline::{BaselineConfig, compute_grid_baseline, compute_table_baseline};
use floodstat_calendar::Doy;
use floodstat_series::{DenseGrid, SeriesTable, UnitKey};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Gamma as GammaDist};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Daily flood-fraction-like grid from 2010-01-01 through 2023-12-31 with
/// `n_cells` columns and roughly `missing_prob` of the values set to `NaN`.
fn synthetic_grid(n_cells: usize, missing_prob: f64, seed: u64) -> DenseGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = GammaDist::new(1.5, 0.02).expect("valid gamma params");

    let start = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
    let dates: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();

    let mut values = Array2::zeros((dates.len(), n_cells));
    for v in values.iter_mut() {
        *v = if rng.random_bool(missing_prob) {
            f64::NAN
        } else {
            dist.sample(&mut rng)
        };
    }
    DenseGrid::new(dates, values).unwrap()
}

fn same_or_both_missing(a: f64, b: f64) {
    if a.is_nan() || b.is_nan() {
        assert!(a.is_nan() && b.is_nan(), "{a} vs {b}");
    } else {
        assert_abs_diff_eq!(a, b, epsilon = 1e-7);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn grid_and_table_paths_agree() {
    let grid = synthetic_grid(6, 0.002, 42);
    let config = BaselineConfig::new(2024);

    let from_grid = compute_grid_baseline(&grid, &config).unwrap();
    let from_table = compute_table_baseline(&grid.to_table(), &config).unwrap();

    assert_eq!(from_table.n_units(), 6);
    for c in 0..grid.n_cells() {
        let key = UnitKey::cell(c);
        for doy in Doy::all() {
            same_or_both_missing(
                from_grid.get(doy, c),
                from_table.get(&key, doy).unwrap(),
            );
        }
    }
}

#[test]
fn partial_windows_agree_too() {
    let grid = synthetic_grid(4, 0.2, 7);
    let config = BaselineConfig::new(2024)
        .with_window_years(5)
        .with_smoothing_window_days(5)
        .with_min_periods(3);

    let from_grid = compute_grid_baseline(&grid, &config).unwrap().to_table();
    let from_table = compute_table_baseline(&grid.to_table(), &config).unwrap();

    for ((ka, a), (kb, b)) in from_grid.iter().zip(from_table.iter()) {
        assert_eq!(ka, kb);
        for (&x, &y) in a.values().iter().zip(b.values()) {
            same_or_both_missing(x, y);
        }
    }
}

#[test]
fn constant_series_gives_constant_baseline() {
    let start = NaiveDate::from_ymd_opt(2012, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
    let dates: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();
    let values = Array2::from_elem((dates.len(), 1), 0.25);
    let grid = DenseGrid::new(dates, values).unwrap();

    let out = compute_grid_baseline(&grid, &BaselineConfig::new(2024)).unwrap();
    for doy in Doy::all() {
        assert_abs_diff_eq!(out.get(doy, 0), 0.25, epsilon = 1e-12);
    }
}

#[test]
fn window_without_data_is_all_missing() {
    let grid = synthetic_grid(2, 0.0, 3);
    let config = BaselineConfig::new(2005).with_window_years(3);
    let out = compute_grid_baseline(&grid, &config).unwrap();
    assert!(out.values().iter().all(|v| v.is_nan()));
}

#[test]
fn missing_day_blanks_its_neighbourhood() {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = start.iter_days().take(730).collect();
    let mut values = Array2::from_elem((dates.len(), 1), 1.0);
    // 2023-03-01 is DOY 60 and sits at row 424.
    values[[424, 0]] = f64::NAN;
    let grid = DenseGrid::new(dates, values).unwrap();

    let config = BaselineConfig::new(2024)
        .with_window_years(1)
        .with_smoothing_window_days(3);
    let out = compute_grid_baseline(&grid, &config).unwrap();

    for doy in [59u16, 60, 61] {
        assert!(out.get(Doy::new(doy).unwrap(), 0).is_nan(), "doy {doy}");
    }
    assert_abs_diff_eq!(out.get(Doy::new(58).unwrap(), 0), 1.0);
    assert_abs_diff_eq!(out.get(Doy::new(62).unwrap(), 0), 1.0);
    // 2023 is not a leap year.
    assert!(out.get(Doy::new(366).unwrap(), 0).is_nan());
}

#[test]
fn absent_table_row_matches_missing_grid_value() {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = start.iter_days().take(730).collect();
    let mut values = Array2::from_shape_fn((dates.len(), 1), |(i, _)| i as f64);
    values[[424, 0]] = f64::NAN;
    let grid = DenseGrid::new(dates.clone(), values).unwrap();

    let gap = dates[424];
    let table = SeriesTable::from_observations(
        grid.to_table()
            .to_observations()
            .into_iter()
            .filter(|o| o.date != gap),
    )
    .unwrap();
    assert_eq!(table.n_observations(), 729);

    let config = BaselineConfig::new(2024)
        .with_window_years(1)
        .with_smoothing_window_days(3);
    let from_grid = compute_grid_baseline(&grid, &config).unwrap();
    let from_table = compute_table_baseline(&table, &config).unwrap();

    let key = UnitKey::cell(0);
    for doy in Doy::all() {
        same_or_both_missing(from_grid.get(doy, 0), from_table.get(&key, doy).unwrap());
    }
    assert!(from_table.get(&key, Doy::new(59).unwrap()).unwrap().is_nan());
    assert!(from_table.get(&key, Doy::new(61).unwrap()).unwrap().is_nan());
}
