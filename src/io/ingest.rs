//! CSV ingest and dialect mapping.
//!
//! This module turns a comma-separated byte stream into a [`Table`]:
//!
//! - headers are trimmed (and stripped of a UTF-8 BOM)
//! - the input dialect is detected once and mapped onto canonical columns
//! - date cells are parsed to calendar dates; unparseable dates become null
//! - count cells are kept as raw text (numeric coercion is the cleaner's job)
//!
//! No row is rejected here: row-level problems are left for the cleaner.

use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use serde::Deserialize;

use crate::domain::{Dialect, RawRecord, Table, REQUIRED_COLUMNS};
use crate::error::AppError;

/// Which columns the caller insists on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Keep whatever canonical columns exist; absence is reported by the cleaner.
    All,
    /// All four canonical columns must exist, or the read fails.
    Required,
}

#[derive(Debug, Deserialize)]
struct OwidRow {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    new_cases: Option<String>,
    #[serde(default)]
    new_deaths: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LegacyRow {
    #[serde(rename = "Date", default)]
    date: Option<String>,
    #[serde(rename = "Country", default)]
    location: Option<String>,
    #[serde(rename = "Confirmed", default)]
    new_cases: Option<String>,
    #[serde(rename = "Deaths", default)]
    new_deaths: Option<String>,
}

impl From<OwidRow> for RawRecord {
    fn from(row: OwidRow) -> Self {
        raw_record(row.date, row.location, row.new_cases, row.new_deaths)
    }
}

impl From<LegacyRow> for RawRecord {
    fn from(row: LegacyRow) -> Self {
        raw_record(row.date, row.location, row.new_cases, row.new_deaths)
    }
}

/// Parse a CSV stream into a [`Table`].
pub fn read_table<R: Read>(input: R, projection: Projection) -> Result<Table, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let raw_headers = reader
        .headers()
        .map_err(|e| AppError::io(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let names: Vec<String> = raw_headers.iter().map(normalize_header_name).collect();
    reader.set_headers(StringRecord::from(names.clone()));

    let dialect = Dialect::detect(names.iter().map(String::as_str));
    let columns = canonical_columns(&names, dialect);

    if projection == Projection::Required {
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .copied()
            .find(|c| !columns.iter().any(|have| have == c))
        {
            return Err(AppError::io(format!(
                "Projected column `{}` not found in CSV (dialect {dialect:?}).",
                dialect.source_name(missing).unwrap_or(missing)
            )));
        }
    }

    let records = match dialect {
        Dialect::Owid => collect_rows::<OwidRow, _>(&mut reader)?,
        Dialect::Legacy => collect_rows::<LegacyRow, _>(&mut reader)?,
    };

    Ok(Table { columns, records })
}

fn collect_rows<T, R>(reader: &mut csv::Reader<R>) -> Result<Vec<RawRecord>, AppError>
where
    T: for<'de> Deserialize<'de> + Into<RawRecord>,
    R: Read,
{
    let mut out = Vec::new();
    for (idx, result) in reader.deserialize::<T>().enumerate() {
        // +2: header is line 1, CSV lines are 1-based.
        let row = result.map_err(|e| AppError::io(format!("CSV parse error on line {}: {e}", idx + 2)))?;
        out.push(row.into());
    }
    Ok(out)
}

/// Canonical names of the mapped columns present in `names`, in source order.
fn canonical_columns(names: &[String], dialect: Dialect) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for name in names {
        let mapped = dialect
            .column_map()
            .into_iter()
            .find(|(src, _)| src == name)
            .map(|(_, canonical)| canonical);
        if let Some(canonical) = mapped {
            if !columns.iter().any(|c| c == canonical) {
                columns.push(canonical.to_string());
            }
        }
    }
    columns
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a BOM; left in
    // place it makes `date` look absent.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn raw_record(
    date: Option<String>,
    location: Option<String>,
    new_cases: Option<String>,
    new_deaths: Option<String>,
) -> RawRecord {
    RawRecord {
        date: date.as_deref().and_then(parse_date),
        location: non_empty(location),
        new_cases: non_empty(new_cases),
        new_deaths: non_empty(new_deaths),
    }
}

fn non_empty(cell: Option<String>) -> Option<String> {
    cell.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse a calendar date in one of the formats seen across the supported dialects.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    // `%y` must be tried before `%Y`: `%Y` happily reads "20" as year 20.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%y", "%m/%d/%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}
