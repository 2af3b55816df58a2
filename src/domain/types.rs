//! Shared domain types.
//!
//! A run moves through two table shapes:
//!
//! - [`Table`]: what the loader produced. Cells may be null, count cells are
//!   still raw text, and any of the canonical columns may be absent.
//! - [`CleanTable`]: what the cleaner produced. Every record has a date, a
//!   location and two non-negative counts.

use std::path::PathBuf;

use chrono::NaiveDate;

pub const COL_DATE: &str = "date";
pub const COL_LOCATION: &str = "location";
pub const COL_NEW_CASES: &str = "new_cases";
pub const COL_NEW_DEATHS: &str = "new_deaths";

/// Canonical columns, in the order they are validated and reported.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_DATE, COL_LOCATION, COL_NEW_CASES, COL_NEW_DEATHS];

/// Default remote dataset (Our World in Data).
pub const DEFAULT_REMOTE_URL: &str = "https://covid.ourworldindata.org/data/owid-covid-data.csv";
/// Default bundled fallback dataset, relative to the working directory.
pub const DEFAULT_LOCAL_PATH: &str = "data/sample_covid.csv";
/// Location preferred for the time-series chart.
pub const DEFAULT_FOCUS_LOCATION: &str = "Kenya";

/// Known input shapes and their mapping onto canonical column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `date, location, new_cases, new_deaths`
    Owid,
    /// `Date, Country, Confirmed, Deaths`
    Legacy,
}

impl Dialect {
    /// `(source header, canonical column)` pairs.
    pub fn column_map(self) -> [(&'static str, &'static str); 4] {
        match self {
            Dialect::Owid => [
                (COL_DATE, COL_DATE),
                (COL_LOCATION, COL_LOCATION),
                (COL_NEW_CASES, COL_NEW_CASES),
                (COL_NEW_DEATHS, COL_NEW_DEATHS),
            ],
            Dialect::Legacy => [
                ("Date", COL_DATE),
                ("Country", COL_LOCATION),
                ("Confirmed", COL_NEW_CASES),
                ("Deaths", COL_NEW_DEATHS),
            ],
        }
    }

    /// Source header name for a canonical column.
    pub fn source_name(self, canonical: &str) -> Option<&'static str> {
        self.column_map()
            .into_iter()
            .find(|(_, c)| *c == canonical)
            .map(|(src, _)| src)
    }

    /// Pick the dialect from a header row.
    ///
    /// `location` wins; otherwise a `Country` header means the legacy shape.
    /// Anything else is treated as OWID so missing columns surface later as a
    /// schema error.
    pub fn detect<'a>(headers: impl IntoIterator<Item = &'a str> + Clone) -> Dialect {
        if headers.clone().into_iter().any(|h| h == COL_LOCATION) {
            return Dialect::Owid;
        }
        if headers.into_iter().any(|h| h == "Country") {
            return Dialect::Legacy;
        }
        Dialect::Owid
    }
}

/// One loaded row, before cleaning.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    /// Raw cell text; `None` when the cell is empty or the column is absent.
    pub new_cases: Option<String>,
    pub new_deaths: Option<String>,
}

/// The loaded table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Canonical columns present in the source, in source order.
    pub columns: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl Table {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One cleaned observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub location: String,
    pub new_cases: f64,
    pub new_deaths: f64,
}

/// The cleaned table. Read-only after the cleaner returns it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleanTable {
    pub records: Vec<Record>,
}

impl CleanTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn new_cases(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.new_cases).collect()
    }

    pub fn new_deaths(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.new_deaths).collect()
    }

    pub fn contains_location(&self, location: &str) -> bool {
        self.records.iter().any(|r| r.location == location)
    }

    /// Back to the loader shape, with all four columns present.
    ///
    /// Counts are written with `f64`'s shortest round-trip formatting so a
    /// second cleaning pass reproduces the same values.
    pub fn to_table(&self) -> Table {
        Table {
            columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            records: self
                .records
                .iter()
                .map(|r| RawRecord {
                    date: Some(r.date),
                    location: Some(r.location.clone()),
                    new_cases: Some(r.new_cases.to_string()),
                    new_deaths: Some(r.new_deaths.to_string()),
                })
                .collect(),
        }
    }
}

/// Mean `new_cases` for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationMean {
    pub location: String,
    pub mean_new_cases: f64,
    pub records: usize,
}

/// Per-location means, ordered by descending mean.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupedAverages {
    pub entries: Vec<LocationMean>,
}

impl GroupedAverages {
    /// The first `n` entries (largest means).
    pub fn top(&self, n: usize) -> &[LocationMean] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolved settings for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub remote_url: String,
    pub local_path: PathBuf,
    pub offline: bool,
    pub timeout_secs: u64,
    pub focus_location: String,
    pub out_dir: PathBuf,
    pub style: ChartStyle,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            local_path: PathBuf::from(DEFAULT_LOCAL_PATH),
            offline: false,
            timeout_secs: 30,
            focus_location: DEFAULT_FOCUS_LOCATION.to_string(),
            out_dir: PathBuf::from("charts"),
            style: ChartStyle::default(),
        }
    }
}

/// Chart styling, handed to the renderer explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub title_size: u32,
    pub label_size: u32,
    /// Main series colour (RGB).
    pub primary: (u8, u8, u8),
    /// Mesh colour (RGB); light grey gives the "whitegrid" look.
    pub grid: (u8, u8, u8),
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 500,
            font_family: "sans-serif".to_string(),
            title_size: 22,
            label_size: 14,
            primary: (76, 114, 176),
            grid: (225, 225, 225),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_prefers_owid_location_column() {
        let headers = ["date", "location", "Country"];
        assert_eq!(Dialect::detect(headers.iter().copied()), Dialect::Owid);
    }

    #[test]
    fn detect_legacy_shape() {
        let headers = ["Date", "Country", "Confirmed", "Deaths"];
        assert_eq!(Dialect::detect(headers.iter().copied()), Dialect::Legacy);
        assert_eq!(Dialect::Legacy.source_name(COL_NEW_CASES), Some("Confirmed"));
    }

    #[test]
    fn detect_unknown_falls_back_to_owid() {
        let headers = ["foo", "bar"];
        assert_eq!(Dialect::detect(headers.iter().copied()), Dialect::Owid);
    }

    #[test]
    fn top_is_clamped_to_len() {
        let averages = GroupedAverages {
            entries: vec![LocationMean {
                location: "A".to_string(),
                mean_new_cases: 1.0,
                records: 1,
            }],
        };
        assert_eq!(averages.top(5).len(), 1);
        assert!(averages.top(0).is_empty());
    }
}
