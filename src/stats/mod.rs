//! Aggregation over loaded and cleaned tables.
//!
//! - descriptive statistics of the count columns (`describe`)
//! - mean new cases per location (`group`)
//! - column types and null counts of the raw table (`profile`)

pub mod describe;
pub mod group;
pub mod profile;

pub use describe::{describe, summarize, Statistics, Summary};
pub use group::group_averages;
pub use profile::{profile, ColumnKind, ColumnProfile};
