//! Console report of a run.
//!
//! Everything printed to stdout is formatted here, section by section, so
//! the pipeline and the statistics stay free of presentation code.

pub mod format;

pub use format::*;
