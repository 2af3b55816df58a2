//! Chart specifications: everything a chart needs, computed before drawing.
//!
//! The builders here are pure so location choice, ordering, binning and
//! sampling can be tested without touching the filesystem.

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::{CleanTable, GroupedAverages};

pub const TOP_BAR_COUNT: usize = 5;
pub const HISTOGRAM_BINS: usize = 30;
pub const SCATTER_CAP: usize = 5000;
pub const SCATTER_SEED: u64 = 42;

/// Equal-width bins; `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// One of the four fixed charts.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    /// Daily new cases of one location, ascending by date.
    TimeSeries {
        location: String,
        points: Vec<(NaiveDate, f64)>,
    },
    /// Top locations by mean new cases, smallest first.
    TopBar { bars: Vec<(String, f64)> },
    /// Distribution of new cases over the whole table.
    Histogram { bins: Bins },
    /// New cases vs new deaths, possibly subsampled.
    Scatter { points: Vec<(f64, f64)>, total: usize },
}

impl ChartSpec {
    pub fn title(&self) -> String {
        match self {
            ChartSpec::TimeSeries { location, .. } => {
                format!("Daily New COVID-19 Cases Over Time - {location}")
            }
            ChartSpec::TopBar { .. } => "Top 5 Locations by Average Daily New Cases".to_string(),
            ChartSpec::Histogram { .. } => {
                "Distribution of Daily New COVID-19 Cases (All Locations)".to_string()
            }
            ChartSpec::Scatter { .. } => "New Cases vs New Deaths".to_string(),
        }
    }

    pub fn axis_labels(&self) -> (&'static str, &'static str) {
        match self {
            ChartSpec::TimeSeries { .. } => ("Date", "New Cases"),
            ChartSpec::TopBar { .. } => ("Average New Cases", "Location"),
            ChartSpec::Histogram { .. } => ("New Cases", "Frequency"),
            ChartSpec::Scatter { .. } => ("New Cases", "New Deaths"),
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartSpec::TimeSeries { .. } => "01_time_series.svg",
            ChartSpec::TopBar { .. } => "02_top_locations.svg",
            ChartSpec::Histogram { .. } => "03_new_cases_histogram.svg",
            ChartSpec::Scatter { .. } => "04_cases_vs_deaths.svg",
        }
    }
}

/// Build the four chart specs, in drawing order.
pub fn build_chart_specs(table: &CleanTable, averages: &GroupedAverages, focus: &str) -> Vec<ChartSpec> {
    let location = select_location(table, focus).unwrap_or_default();
    vec![
        ChartSpec::TimeSeries {
            points: time_series(table, &location),
            location,
        },
        ChartSpec::TopBar {
            bars: top_bars(averages, TOP_BAR_COUNT),
        },
        ChartSpec::Histogram {
            bins: histogram(&table.new_cases(), HISTOGRAM_BINS),
        },
        ChartSpec::Scatter {
            points: scatter_sample(table, SCATTER_CAP, SCATTER_SEED),
            total: table.len(),
        },
    ]
}

/// `focus` if any record has it, else the first record's location.
pub fn select_location(table: &CleanTable, focus: &str) -> Option<String> {
    if table.contains_location(focus) {
        return Some(focus.to_string());
    }
    table.records.first().map(|r| r.location.clone())
}

/// `(date, new_cases)` for one location, ascending by date.
///
/// The sort is stable, so same-day rows keep their table order.
pub fn time_series(table: &CleanTable, location: &str) -> Vec<(NaiveDate, f64)> {
    let mut points: Vec<(NaiveDate, f64)> = table
        .records
        .iter()
        .filter(|r| r.location == location)
        .map(|r| (r.date, r.new_cases))
        .collect();
    points.sort_by_key(|(d, _)| *d);
    points
}

/// The top `n` means, reversed so the largest bar is drawn last.
pub fn top_bars(averages: &GroupedAverages, n: usize) -> Vec<(String, f64)> {
    averages
        .top(n)
        .iter()
        .rev()
        .map(|e| (e.location.clone(), e.mean_new_cases))
        .collect()
}

/// `bins` equal-width bins over `[min, max]`; the last bin is closed.
pub fn histogram(values: &[f64], bins: usize) -> Bins {
    let bins = bins.max(1);
    let (lo, hi) = value_range(values);
    let width = (hi - lo) / bins as f64;

    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Bins { edges, counts }
}

fn value_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    if max - min < f64::EPSILON {
        return (min - 0.5, max + 0.5);
    }
    (min, max)
}

/// `(new_cases, new_deaths)` pairs; at most `cap`, drawn with a fixed seed.
///
/// Sampled rows keep their table order.
pub fn scatter_sample(table: &CleanTable, cap: usize, seed: u64) -> Vec<(f64, f64)> {
    let all = || table.records.iter().map(|r| (r.new_cases, r.new_deaths));
    if table.len() <= cap {
        return all().collect();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = rand::seq::index::sample(&mut rng, table.len(), cap).into_vec();
    picked.sort_unstable();
    picked
        .into_iter()
        .map(|i| (table.records[i].new_cases, table.records[i].new_deaths))
        .collect()
}
