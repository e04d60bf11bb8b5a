//! Shared CSV inputs for the command tests.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// Writes daily history for two units from 2021-01-01 through 2024-06-30.
/// Unit SO12 is always missing.
pub fn write_history(dir: &Path) -> PathBuf {
    let mut csv = String::from("iso3,pcode,date,value\n");
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    for (i, d) in start.iter_days().take_while(|d| *d <= end).enumerate() {
        let v = (i % 50) as f64 / 100.0;
        writeln!(csv, "SOM,SO11,{d},{v}").unwrap();
        writeln!(csv, "SOM,SO12,{d},NA").unwrap();
    }
    let path = dir.join("history.csv");
    std::fs::write(&path, csv).unwrap();
    path
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
