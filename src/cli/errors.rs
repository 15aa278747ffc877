//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit status. Catalog and
//! query errors keep their own codes.

use std::io;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::planner::QueryError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file error
    #[error("NEO_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// I/O error (stdin/stdout)
    #[error("NEO_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    /// Request or response JSON error
    #[error("NEO_CLI_JSON_ERROR: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog could not be built
    #[error("{}: {0}", .0.code())]
    Catalog(#[from] CatalogError),

    /// Query rejected
    #[error("{}: {0}", .0.code())]
    Query(#[from] QueryError),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "NEO_CLI_CONFIG_ERROR",
            CliError::Io(_) => "NEO_CLI_IO_ERROR",
            CliError::Json(_) => "NEO_CLI_JSON_ERROR",
            CliError::Catalog(e) => e.code(),
            CliError::Query(e) => e.code(),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LoadError;

    #[test]
    fn test_codes_pass_through() {
        let err: CliError = CatalogError::from(LoadError::NoSource).into();
        assert_eq!(err.code(), "NEO_LOAD_NO_SOURCE");
        assert!(err.to_string().starts_with("NEO_LOAD_NO_SOURCE: "));

        let err: CliError = QueryError::MissingDateBounds.into();
        assert_eq!(err.code(), "NEO_QUERY_MISSING_DATE_BOUNDS");
    }

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("bad".into());
        assert_eq!(err.to_string(), "NEO_CLI_CONFIG_ERROR: bad");
    }
}
