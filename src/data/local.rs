//! Bundled local CSV source used as the fallback.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use tracing::info;

use crate::data::TableSource;
use crate::domain::Table;
use crate::error::AppError;
use crate::io::ingest::{read_table, Projection};

pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for LocalFileSource {
    fn describe(&self) -> String {
        format!("local file {}", self.path.display())
    }

    fn fetch(&self) -> Result<Table, AppError> {
        info!(path = %self.path.display(), "reading local dataset");
        let file = File::open(&self.path)
            .map_err(|e| AppError::io(format!("Failed to open CSV '{}': {e}", self.path.display())))?;

        // No projection: a missing column is left for the cleaner's schema check.
        read_table(BufReader::new(file), Projection::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,location,new_cases,new_deaths").unwrap();
        writeln!(file, "2021-01-01,Kenya,3,0").unwrap();

        let table = LocalFileSource::new(file.path()).fetch().unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = LocalFileSource::new(dir.path().join("nope.csv"));
        assert!(source.fetch().is_err());
    }
}
