//! The four fixed charts of a run.
//!
//! - `spec`: pure chart specifications (location choice, top-5 view, bins, sample)
//! - `svg`: drawing those specs to SVG files with Plotters

pub mod spec;
pub mod svg;

pub use spec::{build_chart_specs, Bins, ChartSpec};
pub use svg::render_all;
