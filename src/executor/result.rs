//! Result types for search execution

use serde::Serialize;

use crate::model::{NearEarthObject, OrbitPath, RecordKind};

/// Search output, projected to one record kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "results")]
pub enum SearchResults<'a> {
    #[serde(rename = "NEO")]
    Objects(Vec<&'a NearEarthObject>),
    #[serde(rename = "Path")]
    Paths(Vec<&'a OrbitPath>),
}

impl<'a> SearchResults<'a> {
    /// Returns the record kind of the results
    pub fn kind(&self) -> RecordKind {
        match self {
            SearchResults::Objects(_) => RecordKind::Object,
            SearchResults::Paths(_) => RecordKind::Path,
        }
    }

    /// Returns the number of results
    pub fn len(&self) -> usize {
        match self {
            SearchResults::Objects(v) => v.len(),
            SearchResults::Paths(v) => v.len(),
        }
    }

    /// Returns true if nothing matched
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the objects, if objects were requested
    pub fn objects(&self) -> Option<&[&'a NearEarthObject]> {
        match self {
            SearchResults::Objects(v) => Some(v.as_slice()),
            SearchResults::Paths(_) => None,
        }
    }

    /// Returns the approaches, if approaches were requested
    pub fn paths(&self) -> Option<&[&'a OrbitPath]> {
        match self {
            SearchResults::Paths(v) => Some(v.as_slice()),
            SearchResults::Objects(_) => None,
        }
    }
}
