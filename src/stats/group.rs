//! Per-location averages.

use std::collections::HashMap;

use crate::domain::{CleanTable, GroupedAverages, LocationMean};

/// Mean `new_cases` per location, largest mean first.
///
/// Ties are broken by location name (ascending) so the order is fully
/// deterministic regardless of input order.
pub fn group_averages(table: &CleanTable) -> GroupedAverages {
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for r in &table.records {
        let entry = sums.entry(r.location.as_str()).or_insert((0.0, 0));
        entry.0 += r.new_cases;
        entry.1 += 1;
    }

    let mut entries: Vec<LocationMean> = sums
        .into_iter()
        .map(|(location, (sum, n))| LocationMean {
            location: location.to_string(),
            mean_new_cases: sum / n as f64,
            records: n,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.mean_new_cases
            .partial_cmp(&a.mean_new_cases)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.location.cmp(&b.location))
    });

    GroupedAverages { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;
    use chrono::NaiveDate;

    fn record(location: &str, cases: f64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            location: location.to_string(),
            new_cases: cases,
            new_deaths: 0.0,
        }
    }

    #[test]
    fn means_are_grouped_and_sorted_descending() {
        let table = CleanTable {
            records: vec![record("A", 10.0), record("A", 20.0), record("B", 5.0)],
        };
        let averages = group_averages(&table);

        assert_eq!(averages.len(), 2);
        assert_eq!(averages.entries[0].location, "A");
        assert!((averages.entries[0].mean_new_cases - 15.0).abs() < 1e-12);
        assert_eq!(averages.entries[0].records, 2);
        assert_eq!(averages.entries[1].location, "B");
        assert!((averages.entries[1].mean_new_cases - 5.0).abs() < 1e-12);
    }

    #[test]
    fn adjacent_entries_never_increase() {
        let table = CleanTable {
            records: vec![
                record("C", 3.0),
                record("A", 1.0),
                record("D", 9.0),
                record("B", 4.0),
                record("C", 5.0),
                record("E", 0.0),
            ],
        };
        let averages = group_averages(&table);
        for pair in averages.entries.windows(2) {
            assert!(pair[0].mean_new_cases >= pair[1].mean_new_cases);
        }
    }

    #[test]
    fn ties_are_ordered_by_location_name() {
        let table = CleanTable {
            records: vec![record("Zambia", 2.0), record("Austria", 2.0), record("Mali", 2.0)],
        };
        let names: Vec<_> = group_averages(&table)
            .entries
            .into_iter()
            .map(|e| e.location)
            .collect();
        assert_eq!(names, vec!["Austria", "Mali", "Zambia"]);
    }

    #[test]
    fn empty_table_has_no_groups() {
        assert!(group_averages(&CleanTable::default()).is_empty());
    }
}
