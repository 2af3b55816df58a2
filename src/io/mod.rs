//! Input helpers.
//!
//! - CSV ingest, dialect mapping and date parsing (`ingest`)

pub mod ingest;

pub use ingest::*;
