//! The analysis pipeline shared by the binary and the integration tests.
//!
//! load (remote, else local) -> profile -> clean -> describe -> group -> chart
//!
//! Presentation stays in `app`/`report`; this module only computes.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::charts::{build_chart_specs, render_all};
use crate::clean::{clean_with_report, CleanReport};
use crate::data::{load_offline, load_with_fallback, LocalFileSource, Loaded, RemoteSource, TableSource};
use crate::domain::{AnalysisConfig, CleanTable, GroupedAverages};
use crate::error::AppError;
use crate::stats::{describe, group_averages, profile, ColumnProfile, Statistics};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub loaded: Loaded,
    /// Profile of the table as loaded (before cleaning).
    pub profile: Vec<ColumnProfile>,
    pub cleaned: CleanTable,
    pub clean_report: CleanReport,
    pub statistics: Statistics,
    pub averages: GroupedAverages,
    pub charts: Vec<PathBuf>,
}

/// Execute the full pipeline with the sources described by `config`.
pub fn run_analysis(config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    let local = LocalFileSource::new(&config.local_path);
    if config.offline {
        info!("offline run, skipping remote dataset");
        return run_with_sources(config, None, &local);
    }

    let remote = RemoteSource::new(&config.remote_url, Duration::from_secs(config.timeout_secs))?;
    run_with_sources(config, Some(&remote), &local)
}

/// Execute the pipeline against explicit sources.
///
/// With no `primary`, only `fallback` is read.
pub fn run_with_sources(
    config: &AnalysisConfig,
    primary: Option<&dyn TableSource>,
    fallback: &dyn TableSource,
) -> Result<RunOutput, AppError> {
    let loaded = match primary {
        Some(primary) => load_with_fallback(primary, fallback)?,
        None => load_offline(fallback)?,
    };

    let profile = profile(&loaded.table);

    let (cleaned, clean_report) = clean_with_report(&loaded.table)?;
    debug!(
        rows_in = clean_report.rows_in,
        rows_out = clean_report.rows_out,
        dropped = clean_report.dropped_missing_key,
        coerced = clean_report.coerced_to_zero,
        clamped = clean_report.clamped_negative,
        "cleaned dataset"
    );

    let statistics = describe(&cleaned);
    let averages = group_averages(&cleaned);
    info!(locations = averages.len(), "computed location averages");

    let specs = build_chart_specs(&cleaned, &averages, &config.focus_location);
    let charts = render_all(&specs, &config.style, &config.out_dir)?;
    info!(count = charts.len(), dir = %config.out_dir.display(), "charts written");

    Ok(RunOutput {
        loaded,
        profile,
        cleaned,
        clean_report,
        statistics,
        averages,
        charts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataOrigin;
    use crate::domain::Table;
    use crate::error::ErrorKind;
    use std::io::Write;

    struct Unreachable;

    impl TableSource for Unreachable {
        fn describe(&self) -> String {
            "unreachable remote".to_string()
        }

        fn fetch(&self) -> Result<Table, AppError> {
            Err(AppError::io("connection refused"))
        }
    }

    fn csv_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    fn config(out_dir: &std::path::Path) -> AnalysisConfig {
        AnalysisConfig {
            out_dir: out_dir.to_path_buf(),
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn falls_back_and_charts_local_data() {
        let file = csv_file(
            "date,location,new_cases,new_deaths\n\
             2021-01-01,Kenya,10,0\n\
             2021-01-02,Kenya,-5,1\n\
             2021-01-01,Uganda,abc,0\n",
        );
        let dir = tempfile::tempdir().unwrap();
        let local = LocalFileSource::new(file.path());

        let out = run_with_sources(&config(dir.path()), Some(&Unreachable), &local).unwrap();

        assert_eq!(out.loaded.origin, DataOrigin::LocalFallback);
        assert_eq!(out.cleaned.len(), 3);
        assert_eq!(out.clean_report.clamped_negative, 1);
        assert_eq!(out.clean_report.coerced_to_zero, 1);
        assert_eq!(out.averages.entries[0].location, "Kenya");
        assert_eq!(out.charts.len(), 4);
        assert!(out.charts.iter().all(|p| p.exists()));
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let file = csv_file("date,location,new_cases\n2021-01-01,Kenya,10\n");
        let dir = tempfile::tempdir().unwrap();
        let local = LocalFileSource::new(file.path());

        let err = run_with_sources(&config(dir.path()), None, &local).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::Schema {
                missing_column: "new_deaths".to_string()
            }
        );
        assert_eq!(err.exit_code(), 2);
    }
}
