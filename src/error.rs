//! Application error type.
//!
//! Every fatal outcome carries a process exit code and a user-facing message.
//! `kind` lets callers (and tests) tell the failure classes apart without
//! string matching.

/// Failure classes of a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// Both the remote and the local load attempts failed.
    #[error("data unavailable")]
    DataUnavailable,
    /// A required column is absent from the loaded table.
    #[error("required column missing: {missing_column}")]
    Schema { missing_column: String },
    /// Invalid configuration (e.g. the HTTP client cannot be built).
    #[error("invalid configuration")]
    Config,
    /// Filesystem or network failure outside the load fallback.
    #[error("i/o failure")]
    Io,
    /// A chart could not be drawn or written.
    #[error("chart rendering failed")]
    Render,
}

impl ErrorKind {
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorKind::Schema { .. } | ErrorKind::Config => 2,
            ErrorKind::DataUnavailable => 3,
            ErrorKind::Io | ErrorKind::Render => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            exit_code: kind.exit_code(),
            kind,
            message: message.into(),
        }
    }

    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DataUnavailable, message)
    }

    pub fn schema(missing_column: &str) -> Self {
        Self::new(
            ErrorKind::Schema {
                missing_column: missing_column.to_string(),
            },
            format!("Required column missing: {missing_column}"),
        )
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_the_column() {
        let err = AppError::schema("new_deaths");
        assert_eq!(
            err.kind(),
            &ErrorKind::Schema {
                missing_column: "new_deaths".to_string()
            }
        );
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("new_deaths"));
    }

    #[test]
    fn data_unavailable_uses_its_own_exit_code() {
        let err = AppError::data_unavailable("both sources failed");
        assert_eq!(err.kind(), &ErrorKind::DataUnavailable);
        assert_eq!(err.exit_code(), 3);
    }
}
