//! Schema validation and row repair.
//!
//! Cleaning is best-effort by contract: only a missing column is an error.
//! Everything row-level is repaired or dropped without complaint:
//!
//! 1. rows with a null `date` or `location` are dropped
//! 2. counts that are null or do not parse as finite numbers become `0`
//! 3. negative counts become `0`; large counts are left alone
//!
//! The input table is never modified.

use crate::domain::{CleanTable, Record, Table, REQUIRED_COLUMNS};
use crate::error::AppError;

/// What cleaning did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanReport {
    pub rows_in: usize,
    pub rows_out: usize,
    /// Rows dropped because `date` or `location` was null.
    pub dropped_missing_key: usize,
    /// Count cells that were null or non-numeric and became zero.
    pub coerced_to_zero: usize,
    /// Count cells that were negative and became zero.
    pub clamped_negative: usize,
}

/// Validate the schema and return the cleaned table.
pub fn clean(table: &Table) -> Result<CleanTable, AppError> {
    clean_with_report(table).map(|(cleaned, _)| cleaned)
}

/// Like [`clean`], but also returns the repair counts.
pub fn clean_with_report(table: &Table) -> Result<(CleanTable, CleanReport), AppError> {
    ensure_required_columns(table)?;

    let mut report = CleanReport {
        rows_in: table.len(),
        ..CleanReport::default()
    };

    let mut records = Vec::with_capacity(table.len());
    for raw in &table.records {
        let (Some(date), Some(location)) = (raw.date, raw.location.as_ref()) else {
            report.dropped_missing_key += 1;
            continue;
        };

        records.push(Record {
            date,
            location: location.clone(),
            new_cases: repair_count(raw.new_cases.as_deref(), &mut report),
            new_deaths: repair_count(raw.new_deaths.as_deref(), &mut report),
        });
    }

    report.rows_out = records.len();
    Ok((CleanTable { records }, report))
}

fn ensure_required_columns(table: &Table) -> Result<(), AppError> {
    for column in REQUIRED_COLUMNS {
        if !table.has_column(column) {
            return Err(AppError::schema(column));
        }
    }
    Ok(())
}

fn repair_count(cell: Option<&str>, report: &mut CleanReport) -> f64 {
    match coerce_count(cell) {
        None => {
            report.coerced_to_zero += 1;
            0.0
        }
        Some(v) if v < 0.0 => {
            report.clamped_negative += 1;
            0.0
        }
        // `-0.0` compares equal to zero but prints as "-0"; normalise it.
        Some(v) if v == 0.0 => 0.0,
        Some(v) => v,
    }
}

/// Parse a count cell; `None` for null, malformed, NaN or infinite input.
///
/// Non-finite values (`inf`, overflowing literals like `1e400`) become zero so
/// every count stays finite for statistics and histogram binning.
pub fn coerce_count(cell: Option<&str>) -> Option<f64> {
    let v = cell?.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
