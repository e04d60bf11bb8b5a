//! CSV input and output.
//!
//! Inputs are long-format tables: one row per (unit, date) or (unit, year)
//! with the unit identified by one or more key columns. Empty, `NA` and `NaN`
//! cells read as missing. On output missing values are written as empty
//! cells and infinite return periods as `inf`.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use ndarray::Array2;

use floodstat_baseline::{BaselineGrid, BaselineTable};
use floodstat_calendar::Doy;
use floodstat_return_period::ScoredObservation;
use floodstat_series::{AnnualMaxima, DenseGrid, Observation, SeriesTable, UnitKey};

use crate::report::Report;

/// Column names and date format shared by every CSV the binary touches.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvLayout {
    pub key_columns: Vec<String>,
    pub date_column: String,
    pub value_column: String,
    pub year_column: String,
    pub date_format: String,
}

/// One row of an LP3 return-value table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnValueRow {
    pub key: UnitKey,
    pub return_period: f64,
    pub value: f64,
}

/// Opens `path` for reading.
pub fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("failed to open {}", path.display()))
}

/// Creates (or truncates) `path` for writing.
pub fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("failed to create {}", path.display()))
}

/// Parses one numeric cell. Empty, `NA` and `NaN` are missing.
pub fn parse_value(raw: &str) -> Result<f64> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .with_context(|| format!("invalid number {raw:?}"))
}

/// Formats one numeric cell: missing as empty, infinities as `inf`/`-inf`.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else if v.is_infinite() {
        if v > 0.0 { "inf".into() } else { "-inf".into() }
    } else {
        v.to_string()
    }
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

/// Reads daily observations in long format.
pub fn read_observations<R: Read>(reader: R, layout: &CsvLayout) -> Result<SeriesTable> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers().context("failed to read CSV header")?.clone();
    let keys = key_indices(&headers, layout)?;
    let date_idx = column_index(&headers, &layout.date_column)?;
    let value_idx = column_index(&headers, &layout.value_column)?;

    let mut observations = Vec::new();
    for result in rdr.records() {
        let record = result.context("malformed CSV record")?;
        let line = line_of(&record);
        let key = read_key(&record, &keys).with_context(|| format!("line {line}"))?;
        let date = parse_date(field(&record, date_idx), &layout.date_format)
            .with_context(|| format!("line {line}"))?;
        let value =
            parse_value(field(&record, value_idx)).with_context(|| format!("line {line}"))?;
        observations.push(Observation::new(key, date, value));
    }
    SeriesTable::from_observations(observations).context("invalid observation table")
}

/// Reads annual maxima: key columns, a year column and a value column.
pub fn read_maxima<R: Read>(reader: R, layout: &CsvLayout) -> Result<AnnualMaxima> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers().context("failed to read CSV header")?.clone();
    let keys = key_indices(&headers, layout)?;
    let year_idx = column_index(&headers, &layout.year_column)?;
    let value_idx = column_index(&headers, &layout.value_column)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result.context("malformed CSV record")?;
        let line = line_of(&record);
        let key = read_key(&record, &keys).with_context(|| format!("line {line}"))?;
        let year: i32 = field(&record, year_idx)
            .parse()
            .with_context(|| format!("line {line}: invalid year"))?;
        let value =
            parse_value(field(&record, value_idx)).with_context(|| format!("line {line}"))?;
        records.push((key, year, value));
    }
    AnnualMaxima::from_records(records).context("invalid annual maxima table")
}

/// Reads a wide grid: the date column plus one column per cell, rows in
/// increasing date order. Returns the grid and the cell column names.
pub fn read_grid<R: Read>(reader: R, layout: &CsvLayout) -> Result<(DenseGrid, Vec<String>)> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers().context("failed to read CSV header")?.clone();
    let date_idx = column_index(&headers, &layout.date_column)?;
    let cells: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_idx)
        .map(|(i, name)| (i, name.to_string()))
        .collect();
    if cells.is_empty() {
        bail!("grid CSV has no cell columns");
    }

    let mut dates = Vec::new();
    let mut data = Vec::new();
    for result in rdr.records() {
        let record = result.context("malformed CSV record")?;
        let line = line_of(&record);
        dates.push(
            parse_date(field(&record, date_idx), &layout.date_format)
                .with_context(|| format!("line {line}"))?,
        );
        for (i, _) in &cells {
            data.push(parse_value(field(&record, *i)).with_context(|| format!("line {line}"))?);
        }
    }

    let values = Array2::from_shape_vec((dates.len(), cells.len()), data)
        .context("grid rows have inconsistent widths")?;
    let grid = DenseGrid::new(dates, values).context("invalid grid")?;
    Ok((grid, cells.into_iter().map(|(_, n)| n).collect()))
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers.iter().position(|h| h == name).with_context(|| {
        let have: Vec<&str> = headers.iter().collect();
        format!("column {name:?} not found (have: {})", have.join(", "))
    })
}

fn key_indices(headers: &StringRecord, layout: &CsvLayout) -> Result<Vec<usize>> {
    layout
        .key_columns
        .iter()
        .map(|name| column_index(headers, name))
        .collect()
}

fn read_key(record: &StringRecord, indices: &[usize]) -> Result<UnitKey> {
    Ok(UnitKey::new(indices.iter().map(|&i| field(record, i)))?)
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn parse_date(raw: &str, format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, format)
        .with_context(|| format!("invalid date {raw:?} (expected {format})"))
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Writes a table baseline: key columns, `doy`, `baseline`. 366 rows per unit.
pub fn write_baseline<W: Write>(
    writer: W,
    table: &BaselineTable,
    key_columns: &[String],
) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    let mut header = key_columns.to_vec();
    header.extend(["doy".to_string(), "baseline".to_string()]);
    wtr.write_record(&header)?;
    for (key, doy, value) in table.rows() {
        let mut row = key_fields(key, key_columns)?;
        row.push(doy.get().to_string());
        row.push(format_value(value));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a grid baseline as one row per DOY and one column per cell.
pub fn write_grid_baseline<W: Write>(
    writer: W,
    grid: &BaselineGrid,
    cell_names: &[String],
) -> Result<()> {
    if cell_names.len() != grid.n_cells() {
        bail!("{} cell names for {} cells", cell_names.len(), grid.n_cells());
    }
    let mut wtr = Writer::from_writer(writer);
    let mut header = vec!["doy".to_string()];
    header.extend(cell_names.iter().cloned());
    wtr.write_record(&header)?;
    for doy in Doy::all() {
        let mut row = vec![doy.get().to_string()];
        row.extend(grid.layer(doy).iter().map(|v| format_value(*v)));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes scored observations: key columns, date, value, `rp`.
pub fn write_scored<W: Write>(
    writer: W,
    rows: &[ScoredObservation],
    layout: &CsvLayout,
) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    let mut header = layout.key_columns.clone();
    header.extend([layout.date_column.clone(), layout.value_column.clone(), "rp".to_string()]);
    wtr.write_record(&header)?;
    for r in rows {
        let mut row = key_fields(&r.key, &layout.key_columns)?;
        row.push(r.date.format(&layout.date_format).to_string());
        row.push(format_value(r.value));
        row.push(format_value(r.rp));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes LP3 return values: key columns, `method`, `return_period`, `value`.
pub fn write_return_values<W: Write>(
    writer: W,
    rows: &[ReturnValueRow],
    method: &str,
    key_columns: &[String],
) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    let mut header = key_columns.to_vec();
    header.extend(["method".to_string(), "return_period".to_string(), "value".to_string()]);
    wtr.write_record(&header)?;
    for r in rows {
        let mut row = key_fields(&r.key, key_columns)?;
        row.push(method.to_string());
        row.push(format_value(r.return_period));
        row.push(format_value(r.value));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a merged report: key columns, date, value, `rp`, `baseline`.
pub fn write_report<W: Write>(writer: W, report: &Report, layout: &CsvLayout) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    let mut header = layout.key_columns.clone();
    header.extend([
        layout.date_column.clone(),
        layout.value_column.clone(),
        "rp".to_string(),
        "baseline".to_string(),
    ]);
    wtr.write_record(&header)?;
    for r in report.rows() {
        let mut row = key_fields(&r.key, &layout.key_columns)?;
        row.push(r.date.format(&layout.date_format).to_string());
        row.push(format_value(r.value));
        row.push(format_value(r.rp));
        row.push(format_value(r.baseline));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn key_fields(key: &UnitKey, key_columns: &[String]) -> Result<Vec<String>> {
    if key.len() != key_columns.len() {
        bail!(
            "unit {key} has {} fields but {} key columns are configured",
            key.len(),
            key_columns.len()
        );
    }
    Ok(key.fields().to_vec())
}
