//! Data acquisition: a primary remote source with a single local fallback.

use tracing::{info, warn};

use crate::domain::Table;
use crate::error::AppError;

pub mod local;
pub mod remote;

pub use local::LocalFileSource;
pub use remote::RemoteSource;

/// Anything that can produce a loaded table.
pub trait TableSource {
    /// Human-readable name used in logs and error messages.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<Table, AppError>;
}

/// Where the table of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Remote,
    LocalFallback,
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub table: Table,
    pub origin: DataOrigin,
    /// `describe()` of the source that produced the table.
    pub source: String,
}

/// Try `primary` once; on any failure fall back to `fallback` once.
///
/// A fallback failure is fatal (`DataUnavailable`).
pub fn load_with_fallback(primary: &dyn TableSource, fallback: &dyn TableSource) -> Result<Loaded, AppError> {
    let primary_err = match primary.fetch() {
        Ok(table) => {
            info!(rows = table.len(), source = %primary.describe(), "loaded primary dataset");
            return Ok(Loaded {
                table,
                origin: DataOrigin::Remote,
                source: primary.describe(),
            });
        }
        Err(err) => err,
    };

    warn!(
        source = %primary.describe(),
        error = %primary_err,
        "primary dataset unavailable, falling back"
    );

    let table = load_local(fallback, Some(&primary_err))?;
    Ok(Loaded {
        table,
        origin: DataOrigin::LocalFallback,
        source: fallback.describe(),
    })
}

/// Load only from the local source (offline runs).
pub fn load_offline(source: &dyn TableSource) -> Result<Loaded, AppError> {
    let table = load_local(source, None)?;
    Ok(Loaded {
        table,
        origin: DataOrigin::LocalFallback,
        source: source.describe(),
    })
}

fn load_local(source: &dyn TableSource, primary_err: Option<&AppError>) -> Result<Table, AppError> {
    match source.fetch() {
        Ok(table) => {
            info!(rows = table.len(), source = %source.describe(), "loaded fallback dataset");
            Ok(table)
        }
        Err(err) => {
            let message = match primary_err {
                Some(primary_err) => format!(
                    "No data available: primary failed ({primary_err}); {} failed ({err}).",
                    source.describe()
                ),
                None => format!("No data available: {} failed ({err}).", source.describe()),
            };
            Err(AppError::data_unavailable(message))
        }
    }
}
