//! Catalog error types
//!
//! Error codes:
//! - NEO_LOAD_NO_SOURCE (FATAL)
//! - NEO_LOAD_OPEN_FAILED (FATAL)
//! - NEO_LOAD_UNSUPPORTED_FORMAT (FATAL)
//! - NEO_LOAD_MALFORMED_SOURCE (FATAL)
//! - NEO_RECORD_MISSING_FIELD (FATAL)
//! - NEO_RECORD_INVALID_FIELD (FATAL)
//!
//! Every catalog error is fatal to catalog construction.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// The data source could not be resolved or read.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Neither an explicit nor a default data path was given
    #[error("Cannot load data, no data source provided")]
    NoSource,

    /// The data file could not be opened
    #[error("Failed to open data source '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The data file extension is not a known format
    #[error("Unsupported data source format: '{0}'")]
    UnsupportedFormat(String),

    /// The file could be opened but its structure is unreadable.
    /// `line` is 1-based; 0 means the content could not be read at all.
    #[error("Malformed data source at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

impl LoadError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::NoSource => "NEO_LOAD_NO_SOURCE",
            LoadError::Open { .. } => "NEO_LOAD_OPEN_FAILED",
            LoadError::UnsupportedFormat(_) => "NEO_LOAD_UNSUPPORTED_FORMAT",
            LoadError::Malformed { .. } => "NEO_LOAD_MALFORMED_SOURCE",
        }
    }
}

/// A single row is missing a required field or holds an unparseable value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("Row {row} is missing required field '{field}'")]
    MissingField { row: usize, field: &'static str },

    #[error("Row {row} has invalid value '{value}' for field '{field}': {reason}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl RecordError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RecordError::MissingField { .. } => "NEO_RECORD_MISSING_FIELD",
            RecordError::InvalidField { .. } => "NEO_RECORD_INVALID_FIELD",
        }
    }

    /// Returns the zero-based row the error was found in
    pub fn row(&self) -> usize {
        match self {
            RecordError::MissingField { row, .. } | RecordError::InvalidField { row, .. } => *row,
        }
    }
}

/// Any error raised while building a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl CatalogError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::Load(e) => e.code(),
            CatalogError::Record(e) => e.code(),
        }
    }
}
