use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use floodstat_calendar::DateWindow;
use floodstat_return_period::{
    Lp3Method, ReturnPeriodError, fit, fit_all_methods, fit_by_group, to_rp, to_value,
};
use floodstat_series::{AnnualMaxima, Observation, SeriesTable, UnitKey};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Gamma as GammaDist, LogNormal};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Annual-maximum-like flood fractions drawn from a gamma distribution.
fn gamma_sample(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = GammaDist::new(2.0, 0.08).expect("valid gamma params");
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

fn lognormal_sample(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = LogNormal::new(-1.5, 0.6).expect("valid lognormal params");
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

/// The middle 80% of the sample, where every fit is well inside its support.
fn interior(sample: &[f64]) -> Vec<f64> {
    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    let cut = sorted.len() / 10;
    sorted[cut..sorted.len() - cut].to_vec()
}

fn assert_round_trip(sample: &[f64], method: Lp3Method) {
    let params = fit(sample, method).unwrap();
    let values = interior(sample);
    let rps = to_rp(&values, &params, method).unwrap();
    assert!(rps.iter().all(|rp| rp.is_finite() && *rp > 1.0), "{method}: {rps:?}");

    let back = to_value(&rps, &params, method).unwrap();
    for (v, b) in values.iter().zip(&back) {
        assert_abs_diff_eq!(v.log10(), b.log10(), epsilon = 1e-6);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn round_trip_every_method_gamma_data() {
    for seed in [1, 2, 3] {
        let sample = gamma_sample(40, seed);
        for method in Lp3Method::ALL {
            assert_round_trip(&sample, method);
        }
    }
}

#[test]
fn round_trip_every_method_lognormal_data() {
    let sample = lognormal_sample(30, 11);
    for method in Lp3Method::ALL {
        assert_round_trip(&sample, method);
    }
}

#[test]
fn return_values_increase_with_return_period() {
    let sample = gamma_sample(35, 5);
    let periods = [2.0, 5.0, 10.0, 25.0, 50.0, 100.0];
    for (method, params) in fit_all_methods(&sample).unwrap() {
        let values = to_value(&periods, &params, method).unwrap();
        for w in values.windows(2) {
            assert!(w[1] > w[0], "{method}: {values:?}");
        }
    }
}

#[test]
fn methods_agree_roughly_on_the_median_event() {
    let sample = lognormal_sample(60, 21);
    let medians: Vec<f64> = fit_all_methods(&sample)
        .unwrap()
        .into_iter()
        .map(|(m, p)| to_value(&[2.0], &p, m).unwrap()[0])
        .collect();
    let lo = medians.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = medians.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!(hi / lo < 1.1, "{medians:?}");
}

#[test]
fn method_strings_are_checked() {
    let err = "gumbel".parse::<Lp3Method>().unwrap_err();
    assert_eq!(
        err,
        ReturnPeriodError::InvalidMethod {
            method: "gumbel".into()
        }
    );
}

#[test]
fn fit_by_group_skips_unfittable_units() {
    let key = |p: &str| UnitKey::new(["ETH", p]).unwrap();
    let mut records = Vec::new();
    for (i, v) in gamma_sample(20, 9).into_iter().enumerate() {
        records.push((key("GOOD"), 2000 + i as i32, v));
    }
    records.push((key("SHORT"), 2000, 0.1));
    records.push((key("SHORT"), 2001, 0.2));
    records.push((key("FLAT"), 2000, 0.0));
    records.push((key("FLAT"), 2001, 0.0));
    records.push((key("FLAT"), 2002, 0.0));
    let maxima = AnnualMaxima::from_records(records).unwrap();

    let fits = fit_by_group(&maxima, Lp3Method::Lmoments);
    assert_eq!(fits.method(), Lp3Method::Lmoments);
    assert_eq!(fits.n_fitted(), 1);
    assert!(fits.get(&key("GOOD")).is_some());
    assert_eq!(fits.skipped().len(), 2);
    assert!(matches!(
        fits.skipped()[&key("SHORT")],
        ReturnPeriodError::InsufficientData { n: 2, min: 3 }
    ));
}

#[test]
fn fits_maxima_derived_from_daily_history() {
    let key = UnitKey::new(["SOM", "SO11"]).unwrap();
    let mut rng = StdRng::seed_from_u64(17);
    let dist = GammaDist::new(1.2, 0.03).expect("valid gamma params");
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let obs: Vec<Observation> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| Observation::new(key.clone(), d, dist.sample(&mut rng)))
        .collect();
    let history = SeriesTable::from_observations(obs).unwrap();

    let maxima = history.annual_maxima(DateWindow::through_year(2023).unwrap());
    let sample = maxima.get(&key).unwrap();
    assert_eq!(sample.len(), 24);
    assert_eq!(sample.years().last(), Some(&2023));

    let fits = fit_by_group(&maxima, Lp3Method::UsgsMoments);
    assert!(fits.skipped().is_empty());
    let params = fits.get(&key).unwrap();
    let rp = to_rp(&[sample.values()[0]], params, Lp3Method::UsgsMoments).unwrap();
    assert!(rp[0] >= 1.0);
}
