//! Query error types
//!
//! Error codes:
//! - NEO_QUERY_UNKNOWN_RETURN_OBJECT (REJECT)
//! - NEO_QUERY_MISSING_DATE_BOUNDS (REJECT)
//! - NEO_QUERY_INVALID_DATE (REJECT)
//! - NEO_QUERY_MALFORMED_FILTER (REJECT)
//! - NEO_QUERY_UNKNOWN_OPERATOR (REJECT)
//! - NEO_QUERY_INVALID_FILTER_VALUE (REJECT)
//! - NEO_QUERY_DUPLICATE_DISTANCE_FILTER (REJECT)
//!
//! Query errors reject a single query. Catalog state is never affected.

use thiserror::Error;

/// Result type for query normalization
pub type QueryResult<T> = Result<T, QueryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Unknown return object '{0}', expected 'NEO' or 'Path'")]
    UnknownReturnObject(String),

    #[error("Range query requires both start_date and end_date")]
    MissingDateBounds,

    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Malformed filter '{0}', expected 'field:operator:value'")]
    MalformedFilter(String),

    #[error("Unknown operator '{op}' in filter '{filter}'")]
    UnknownOperator { filter: String, op: String },

    #[error("Invalid value '{value}' in filter '{filter}'")]
    InvalidFilterValue { filter: String, value: String },

    #[error("At most one distance filter is allowed per query")]
    DuplicateDistanceFilter,
}

impl QueryError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::UnknownReturnObject(_) => "NEO_QUERY_UNKNOWN_RETURN_OBJECT",
            QueryError::MissingDateBounds => "NEO_QUERY_MISSING_DATE_BOUNDS",
            QueryError::InvalidDate { .. } => "NEO_QUERY_INVALID_DATE",
            QueryError::MalformedFilter(_) => "NEO_QUERY_MALFORMED_FILTER",
            QueryError::UnknownOperator { .. } => "NEO_QUERY_UNKNOWN_OPERATOR",
            QueryError::InvalidFilterValue { .. } => "NEO_QUERY_INVALID_FILTER_VALUE",
            QueryError::DuplicateDistanceFilter => "NEO_QUERY_DUPLICATE_DISTANCE_FILTER",
        }
    }
}
