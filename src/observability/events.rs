//! Observability events for neoquery
//!
//! Events are explicit and typed. Each maps to one stable name.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Catalog
    /// Catalog built from a data source
    CatalogLoaded,
    /// A row failed validation and aborted the load
    RecordRejected,
    /// The data source itself became unreadable mid-load
    SourceRejected,

    // Query processing
    /// Query parameters normalized into a search request
    QueryBuilt,
    /// Query parameters rejected
    QueryRejected,
    /// A filter with an unknown field was ignored
    FilterDropped,
    /// Search finished
    SearchComplete,

    // Batch mode
    /// One batch request answered
    BatchRequest,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CatalogLoaded => "CATALOG_LOADED",
            Event::RecordRejected => "RECORD_REJECTED",
            Event::SourceRejected => "SOURCE_REJECTED",
            Event::QueryBuilt => "QUERY_BUILT",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::FilterDropped => "FILTER_DROPPED",
            Event::SearchComplete => "SEARCH_COMPLETE",
            Event::BatchRequest => "BATCH_REQUEST",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
