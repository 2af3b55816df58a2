//! `covid-tracker` library crate.
//!
//! The binary (`covid-tracker`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes or touching the network
//! - each stage (load, clean, describe, chart) can be exercised on its own

pub mod app;
pub mod charts;
pub mod clean;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod stats;
