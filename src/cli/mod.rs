//! Command-line parsing for the COVID-19 tracker.
//!
//! Every flag is optional; running with no arguments reproduces the default
//! run (live OWID data, local fallback, Kenya, charts in `./charts`).

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{DEFAULT_FOCUS_LOCATION, DEFAULT_LOCAL_PATH, DEFAULT_REMOTE_URL};

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "covid-tracker",
    version,
    about = "Load, clean, summarize and chart COVID-19 case data"
)]
pub struct Cli {
    /// Remote CSV to try first.
    #[arg(long, value_name = "URL", default_value = DEFAULT_REMOTE_URL)]
    pub url: String,

    /// Local CSV used when the remote dataset is unavailable.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOCAL_PATH)]
    pub local: PathBuf,

    /// Skip the remote attempt and read only the local CSV.
    #[arg(long)]
    pub offline: bool,

    /// Remote request timeout (seconds).
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Location preferred for the time-series chart.
    #[arg(long, value_name = "LOCATION", default_value = DEFAULT_FOCUS_LOCATION)]
    pub focus: String,

    /// Directory the charts are written to.
    #[arg(long, value_name = "DIR", default_value = "charts")]
    pub out_dir: PathBuf,
}
