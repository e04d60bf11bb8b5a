use chrono::NaiveDate;
use floodstat_calendar::{DOYS_PER_YEAR, DateWindow, Doy, YearWindow, default_run_date};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn every_day_of_a_leap_year_maps_to_its_ordinal() {
    for (i, d) in DateWindow::from_years(YearWindow::preceding(2025, 1).unwrap())
        .unwrap()
        .dates()
        .enumerate()
    {
        let doy = Doy::from_date(d);
        assert_eq!(doy.index(), i, "{d}");
        assert_eq!(Doy::from_index(i).unwrap(), doy);
    }
}

#[test]
fn common_and_leap_years_diverge_after_february() {
    let cases: &[(NaiveDate, u16)] = &[
        (date(2023, 2, 28), 59),
        (date(2024, 2, 28), 59),
        (date(2024, 2, 29), 60),
        (date(2023, 3, 1), 60),
        (date(2024, 3, 1), 61),
        (date(2023, 12, 31), 365),
        (date(2024, 12, 31), 366),
    ];
    for &(d, expected) in cases {
        assert_eq!(Doy::from_date(d).get(), expected, "Doy::from_date({d})");
    }
}

#[test]
fn only_leap_years_reach_day_366() {
    let ten_years = DateWindow::from_years(YearWindow::preceding(2025, 10).unwrap()).unwrap();
    let leap_only: Vec<NaiveDate> = ten_years
        .dates()
        .filter(|d| Doy::from_date(*d).is_leap_only())
        .collect();
    assert_eq!(leap_only, [date(2016, 12, 31), date(2020, 12, 31), date(2024, 12, 31)]);
    assert_eq!(Doy::all().count(), DOYS_PER_YEAR);
}

#[test]
fn trailing_window_from_default_run_date() {
    let run = default_run_date(date(2024, 7, 5));
    assert_eq!(run, date(2024, 6, 30));
    let recent = DateWindow::trailing(run, 90).unwrap();
    assert_eq!(recent.start(), date(2024, 4, 1));
    assert!(recent.contains(run));
    assert!(!recent.contains(date(2024, 3, 31)));
}
