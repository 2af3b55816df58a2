//! Column profile of a loaded (uncleaned) table: inferred types and null counts.

use crate::domain::{RawRecord, Table, COL_DATE, COL_LOCATION, COL_NEW_CASES, COL_NEW_DEATHS};

/// Inferred storage kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Date,
    Text,
    Float,
}

impl ColumnKind {
    pub fn label(self) -> &'static str {
        match self {
            ColumnKind::Date => "date",
            ColumnKind::Text => "text",
            ColumnKind::Float => "float",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    /// Null cells in this column.
    pub missing: usize,
}

/// Profile every column present in the table, in table column order.
pub fn profile(table: &Table) -> Vec<ColumnProfile> {
    table
        .columns
        .iter()
        .filter_map(|name| profile_column(table, name))
        .collect()
}

fn profile_column(table: &Table, name: &str) -> Option<ColumnProfile> {
    let (kind, missing) = match name {
        COL_DATE => (ColumnKind::Date, count_missing(table, |r| r.date.is_none())),
        COL_LOCATION => (ColumnKind::Text, count_missing(table, |r| r.location.is_none())),
        COL_NEW_CASES => count_column(table, |r| r.new_cases.as_deref()),
        COL_NEW_DEATHS => count_column(table, |r| r.new_deaths.as_deref()),
        _ => return None,
    };
    Some(ColumnProfile {
        name: name.to_string(),
        kind,
        missing,
    })
}

fn count_missing(table: &Table, is_null: impl Fn(&RawRecord) -> bool) -> usize {
    table.records.iter().filter(|r| is_null(r)).count()
}

/// A count column is `float` when every non-null cell is numeric, else `text`.
fn count_column<'a>(table: &'a Table, cell: impl Fn(&'a RawRecord) -> Option<&'a str>) -> (ColumnKind, usize) {
    let mut missing = 0;
    let mut numeric = true;
    for r in &table.records {
        match cell(r) {
            None => missing += 1,
            Some(text) => numeric &= text.trim().parse::<f64>().is_ok(),
        }
    }
    let kind = if numeric { ColumnKind::Float } else { ColumnKind::Text };
    (kind, missing)
}
