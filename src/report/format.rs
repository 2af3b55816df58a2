//! Plain-text formatting of each report section.
//!
//! Each function returns a `String` (no printing), so output can be asserted
//! on in tests and the caller decides where it goes.

use std::path::PathBuf;

use crate::data::{DataOrigin, Loaded};
use crate::domain::{GroupedAverages, RawRecord, Table};
use crate::stats::{ColumnProfile, Statistics, Summary};

/// Rows shown by [`format_head`].
pub const HEAD_ROWS: usize = 5;
/// Locations shown by [`format_group_averages`].
pub const TOP_LOCATIONS: usize = 10;

/// Which dataset was used and how many rows it had.
pub fn format_load_outcome(loaded: &Loaded) -> String {
    match loaded.origin {
        DataOrigin::Remote => format!(
            "Loaded live dataset: {} rows from {}\n",
            loaded.table.len(),
            loaded.source
        ),
        DataOrigin::LocalFallback => format!(
            "Loaded local sample: {} rows from {}\n",
            loaded.table.len(),
            loaded.source
        ),
    }
}

/// The first `n` rows of the loaded table.
pub fn format_head(table: &Table, n: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("First {n} rows:\n"));
    out.push_str(
        format!(
            "{:<12} {:<24} {:>12} {:>12}\n",
            "date", "location", "new_cases", "new_deaths"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&rule(&[12, 24, 12, 12]));

    for r in table.records.iter().take(n) {
        out.push_str(format_raw_row(r).trim_end());
        out.push('\n');
    }
    out
}

fn format_raw_row(r: &RawRecord) -> String {
    let date = r
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "NaT".to_string());
    format!(
        "{:<12} {:<24} {:>12} {:>12}\n",
        date,
        truncate(r.location.as_deref().unwrap_or("NaN"), 24),
        truncate(r.new_cases.as_deref().unwrap_or("NaN"), 12),
        truncate(r.new_deaths.as_deref().unwrap_or("NaN"), 12),
    )
}

/// Inferred type of each loaded column.
pub fn format_column_types(profiles: &[ColumnProfile]) -> String {
    let mut out = String::from("Column types:\n");
    for p in profiles {
        out.push_str(&format!("{:<12} {}\n", p.name, p.kind.label()));
    }
    out
}

/// Null cells per loaded column.
pub fn format_missing(profiles: &[ColumnProfile]) -> String {
    let mut out = String::from("Missing values per column:\n");
    for p in profiles {
        out.push_str(&format!("{:<12} {:>8}\n", p.name, p.missing));
    }
    out
}

/// Describe-style table for `new_cases` and `new_deaths`.
pub fn format_statistics(stats: &Statistics) -> String {
    let mut out = String::from("Basic statistics:\n");
    out.push_str(format!("{:<6} {:>14} {:>14}\n", "", "new_cases", "new_deaths").trim_end());
    out.push('\n');

    let rows: [(&str, fn(&Summary) -> f64); 8] = [
        ("count", |s| s.count as f64),
        ("mean", |s| s.mean),
        ("std", |s| s.std),
        ("min", |s| s.min),
        ("25%", |s| s.q25),
        ("50%", |s| s.q50),
        ("75%", |s| s.q75),
        ("max", |s| s.max),
    ];
    for (label, field) in rows {
        out.push_str(&format!(
            "{:<6} {:>14} {:>14}\n",
            label,
            fmt_num(field(&stats.new_cases)),
            fmt_num(field(&stats.new_deaths)),
        ));
    }
    out
}

/// The `n` locations with the highest mean new cases.
pub fn format_group_averages(averages: &GroupedAverages, n: usize) -> String {
    let mut out = format!("Average new cases by location (top {n}):\n");
    out.push_str(format!("{:<24} {:>14} {:>8}\n", "location", "mean_new_cases", "rows").trim_end());
    out.push('\n');
    out.push_str(&rule(&[24, 14, 8]));

    for e in averages.top(n) {
        out.push_str(&format!(
            "{:<24} {:>14} {:>8}\n",
            truncate(&e.location, 24),
            fmt_num(e.mean_new_cases),
            e.records
        ));
    }
    out
}

/// Paths of the charts written this run.
pub fn format_chart_list(paths: &[PathBuf]) -> String {
    let mut out = format!("Charts written ({}):\n", paths.len());
    for p in paths {
        out.push_str(&format!("- {}\n", p.display()));
    }
    out
}

fn rule(widths: &[usize]) -> String {
    let parts: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    format!("{}\n", parts.join(" "))
}

fn fmt_num(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    format!("{v:.2}")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
