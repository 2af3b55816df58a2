//! Descriptive statistics for the count columns.

use crate::domain::CleanTable;

/// count / mean / std / min / quartiles / max for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            q50: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Summaries for both count columns of a cleaned table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub new_cases: Summary,
    pub new_deaths: Summary,
}

/// Describe `new_cases` and `new_deaths`.
///
/// Every cleaned record counts: cleaning already replaced nulls with zero.
pub fn describe(table: &CleanTable) -> Statistics {
    Statistics {
        new_cases: summarize(&table.new_cases()),
        new_deaths: summarize(&table.new_deaths()),
    }
}

/// Summarize a slice of values.
pub fn summarize(values: &[f64]) -> Summary {
    let n = values.len();
    if n == 0 {
        return Summary::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = values.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    Summary {
        count: n,
        mean,
        std,
        min: sorted[0],
        q25: percentile(&sorted, 25.0),
        q50: percentile(&sorted, 50.0),
        q75: percentile(&sorted, 75.0),
        max: sorted[n - 1],
    }
}

/// Percentile of sorted values, linear interpolation between order statistics.
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;
    use chrono::NaiveDate;

    fn record(location: &str, cases: f64, deaths: f64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            location: location.to_string(),
            new_cases: cases,
            new_deaths: deaths,
        }
    }

    #[test]
    fn summary_matches_hand_computation() {
        let s = summarize(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s.count, 4);
        assert!((s.mean - 2.5).abs() < 1e-12);
        // sample variance = 5/3
        assert!((s.std - (5.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert!((s.q25 - 1.75).abs() < 1e-12);
        assert!((s.q50 - 2.5).abs() < 1e-12);
        assert!((s.q75 - 3.25).abs() < 1e-12);
        assert_eq!(s.max, 4.0);
    }

    #[test]
    fn single_value_has_undefined_std() {
        let s = summarize(&[7.0]);
        assert_eq!(s.count, 1);
        assert_eq!(s.mean, 7.0);
        assert!(s.std.is_nan());
        assert_eq!(s.q25, 7.0);
        assert_eq!(s.max, 7.0);
    }

    #[test]
    fn empty_input_counts_zero() {
        let s = summarize(&[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
    }

    #[test]
    fn describe_counts_every_cleaned_record() {
        let table = CleanTable {
            records: vec![record("A", 0.0, 0.0), record("A", 10.0, 1.0), record("B", 5.0, 0.0)],
        };
        let stats = describe(&table);
        assert_eq!(stats.new_cases.count, table.len());
        assert_eq!(stats.new_deaths.count, table.len());
        assert_eq!(stats.new_cases.max, 10.0);
        assert_eq!(stats.new_deaths.min, 0.0);
    }
}
