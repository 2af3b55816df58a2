use std::io::Write;
use std::path::{Path, PathBuf};

use covid_tracker::app::pipeline::run_analysis;
use covid_tracker::data::DataOrigin;
use covid_tracker::domain::AnalysisConfig;
use covid_tracker::error::ErrorKind;

fn offline_config(local: &Path, out_dir: &Path) -> AnalysisConfig {
    AnalysisConfig {
        local_path: local.to_path_buf(),
        offline: true,
        out_dir: out_dir.to_path_buf(),
        ..AnalysisConfig::default()
    }
}

fn bundled_sample() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_covid.csv")
}

#[test]
fn bundled_sample_runs_end_to_end() {
    let out = tempfile::tempdir().unwrap();
    let run = run_analysis(&offline_config(&bundled_sample(), out.path())).unwrap();

    assert_eq!(run.loaded.origin, DataOrigin::LocalFallback);
    assert_eq!(run.loaded.table.len(), 210);
    // one null date, one null location
    assert_eq!(run.cleaned.len(), 208);
    assert!(run.cleaned.records.iter().all(|r| r.new_cases >= 0.0 && r.new_deaths >= 0.0));
    assert_eq!(run.averages.len(), 7);
    assert_eq!(run.averages.entries[0].location, "South Africa");

    let names: Vec<String> = run
        .charts
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "01_time_series.svg",
            "02_top_locations.svg",
            "03_new_cases_histogram.svg",
            "04_cases_vs_deaths.svg"
        ]
    );
    for path in &run.charts {
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("<svg"));
    }
}

#[test]
fn legacy_columns_are_accepted() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Date,Country,Confirmed,Deaths").unwrap();
    writeln!(file, "2020-03-01,Kenya,4,0").unwrap();
    writeln!(file, "2020-03-02,Kenya,7,1").unwrap();
    let out = tempfile::tempdir().unwrap();

    let run = run_analysis(&offline_config(file.path(), out.path())).unwrap();
    assert_eq!(run.cleaned.len(), 2);
    assert_eq!(run.statistics.new_cases.max, 7.0);
    assert_eq!(run.charts.len(), 4);
}

#[test]
fn missing_column_exits_with_schema_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "date,new_cases,new_deaths").unwrap();
    writeln!(file, "2021-01-01,1,0").unwrap();
    let out = tempfile::tempdir().unwrap();

    let err = run_analysis(&offline_config(file.path(), out.path())).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::Schema {
            missing_column: "location".to_string()
        }
    );
    assert_eq!(err.exit_code(), 2);
    // nothing was drawn
    assert!(!out.path().join("01_time_series.svg").exists());
}

#[test]
fn missing_local_file_is_data_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_analysis(&offline_config(&dir.path().join("absent.csv"), dir.path())).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DataUnavailable);
    assert_eq!(err.exit_code(), 3);
}
