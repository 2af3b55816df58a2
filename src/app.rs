//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - loads `.env` and installs logging
//! - parses CLI arguments into an [`AnalysisConfig`]
//! - runs the pipeline
//! - prints the report sections in order

use clap::Parser;

use crate::cli::Cli;
use crate::domain::{AnalysisConfig, ChartStyle};
use crate::error::AppError;
use crate::report;

pub mod pipeline;

/// Entry point for the `covid-tracker` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is fine.
    dotenvy::dotenv().ok();
    crate::logging::init();

    let cli = Cli::parse();
    let config = config_from_args(&cli);
    let run = pipeline::run_analysis(&config)?;

    println!("{}", report::format_load_outcome(&run.loaded));
    println!("{}", report::format_head(&run.loaded.table, report::HEAD_ROWS));
    println!("{}", report::format_column_types(&run.profile));
    println!("{}", report::format_missing(&run.profile));
    println!("{}", report::format_statistics(&run.statistics));
    println!(
        "{}",
        report::format_group_averages(&run.averages, report::TOP_LOCATIONS)
    );
    println!("{}", report::format_chart_list(&run.charts));

    Ok(())
}

pub fn config_from_args(cli: &Cli) -> AnalysisConfig {
    AnalysisConfig {
        remote_url: cli.url.clone(),
        local_path: cli.local.clone(),
        offline: cli.offline,
        timeout_secs: cli.timeout_secs,
        focus_location: cli.focus.clone(),
        out_dir: cli.out_dir.clone(),
        style: ChartStyle::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_arguments_give_default_config() {
        let cli = Cli::parse_from(["covid-tracker"]);
        assert_eq!(config_from_args(&cli), AnalysisConfig::default());
    }

    #[test]
    fn flags_never_change_the_chart_style() {
        let cli = Cli::parse_from(["covid-tracker", "--offline", "--focus", "Uganda", "--out-dir", "out"]);
        assert_eq!(config_from_args(&cli).style, ChartStyle::default());
    }
}
