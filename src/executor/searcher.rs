//! Searcher for neoquery
//!
//! Executes search requests against a catalog. The searcher only borrows the
//! catalog, so any number of searchers can read one catalog at once.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::model::{NearEarthObject, OrbitPath, RecordKind};
use crate::observability::{Event, ObservationScope};
use crate::planner::{DateSearch, Filter, QueryBuilder, QueryParams, QueryResult, SearchRequest};

use super::result::SearchResults;

/// Runs search requests against one catalog
#[derive(Debug, Clone, Copy)]
pub struct NeoSearcher<'a> {
    catalog: &'a Catalog,
}

impl<'a> NeoSearcher<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Normalizes `params` and runs the resulting request
    pub fn search(&self, params: &QueryParams) -> QueryResult<SearchResults<'a>> {
        let request = QueryBuilder::new().build(params)?;
        Ok(self.get_objects(&request))
    }

    /// Executes a request, returning at most `request.number()` records.
    ///
    /// Deterministic: the same request against the same catalog always
    /// returns the same records in the same order.
    pub fn get_objects(&self, request: &SearchRequest) -> SearchResults<'a> {
        let scope = ObservationScope::new("SEARCH");

        // Step 1: Date lookup
        let mut neos = self.select_by_date(request.date_search());
        let selected = neos.len();

        // Step 2: Object filters, distance set aside
        let mut distance_filter: Option<&Filter> = None;
        for filter in request.filters() {
            if filter.is_distance() {
                distance_filter = Some(filter);
                continue;
            }
            neos = filter.apply(neos);
        }

        // Step 3: Expand to every approach of the surviving objects
        let mut orbits: Vec<&'a OrbitPath> = neos.iter().flat_map(|&neo| neo.orbits()).collect();

        // Step 4: Distance lives on approaches; objects follow their approaches
        if let Some(filter) = distance_filter {
            orbits = filter.apply(orbits);
            neos = orbits
                .iter()
                .filter_map(|orbit| self.catalog.find_by_name(orbit.neo_name()))
                .collect();
        }

        // Step 5: Order-preserving dedup
        let mut neos = unique_objects(neos);
        let mut orbits = unique_orbits(orbits);

        // Step 6: Project and truncate
        let results = match request.return_object() {
            RecordKind::Object => {
                neos.truncate(request.number());
                SearchResults::Objects(neos)
            }
            RecordKind::Path => {
                orbits.truncate(request.number());
                SearchResults::Paths(orbits)
            }
        };

        tracing::info!(
            event = %Event::SearchComplete,
            date_search = %request.date_search(),
            selected,
            returned = results.len(),
            kind = %results.kind()
        );
        scope.complete();
        results
    }

    fn select_by_date(&self, date_search: &DateSearch) -> Vec<&'a NearEarthObject> {
        match date_search {
            DateSearch::Equals { date } => self.catalog.find_by_date(date),
            DateSearch::Between { start, end } => self.catalog.find_by_date_range(start, end),
        }
    }
}

/// Objects are identified by name, the catalog's primary key
fn unique_objects(neos: Vec<&NearEarthObject>) -> Vec<&NearEarthObject> {
    let mut seen = HashSet::new();
    neos.into_iter().filter(|neo| seen.insert(neo.name())).collect()
}

/// Approaches are identified by their load row
fn unique_orbits(orbits: Vec<&OrbitPath>) -> Vec<&OrbitPath> {
    let mut seen = HashSet::new();
    orbits.into_iter().filter(|orbit| seen.insert(orbit.row())).collect()
}
