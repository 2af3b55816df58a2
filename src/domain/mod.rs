//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - loader and cleaner table shapes (`Table`, `RawRecord`, `CleanTable`, `Record`)
//! - input dialects (`Dialect`)
//! - aggregate outputs (`GroupedAverages`)
//! - run configuration (`AnalysisConfig`, `ChartStyle`)

pub mod types;

pub use types::*;
