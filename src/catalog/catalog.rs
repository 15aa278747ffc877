//! In-memory catalog of near-Earth objects
//!
//! # API
//!
//! - `load(source)` - Build the catalog from a row source
//! - `find_by_date(date)` - Objects with an approach on `date`
//! - `find_by_date_range(start, end)` - Objects with an approach in `[start, end]`
//! - `find_by_name(name)` - Object lookup by primary key

use std::collections::HashMap;

use crate::index::{DateIndex, ObjectId};
use crate::model::{NearEarthObject, OrbitPath};
use crate::observability::{Event, ObservationScope};

use super::errors::CatalogResult;
use super::loader::{NeoRow, RowSource};

/// Immutable store of every loaded record plus its name and date indexes
#[derive(Debug, Default)]
pub struct Catalog {
    /// Object table; `ObjectId` is a position in this table
    objects: Vec<NearEarthObject>,
    /// Object name -> position (primary key)
    by_name: HashMap<String, ObjectId>,
    /// Approach date -> positions, one entry per approach
    by_date: DateIndex,
}

impl Catalog {
    /// Builds a catalog by draining `source`.
    ///
    /// Rows are processed in order. The first unreadable source or invalid
    /// row aborts the load.
    pub fn load<S: RowSource + ?Sized>(source: &mut S) -> CatalogResult<Self> {
        let scope = ObservationScope::new("CATALOG_LOAD");
        let mut catalog = Catalog::default();
        let mut row = 0usize;

        loop {
            let raw = match source.next_row() {
                Ok(Some(raw)) => raw,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(event = %Event::SourceRejected, row, code = e.code(), error = %e);
                    scope.fail(&e.to_string());
                    return Err(e.into());
                }
            };
            let parsed = match NeoRow::from_raw(&raw, row) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::error!(event = %Event::RecordRejected, row, error = %e);
                    scope.fail(&e.to_string());
                    return Err(e.into());
                }
            };
            catalog.insert_row(parsed, row);
            row += 1;
        }

        tracing::info!(
            event = %Event::CatalogLoaded,
            rows = row,
            objects = catalog.len(),
            dates = catalog.date_count()
        );
        scope.complete();
        Ok(catalog)
    }

    /// Builds a catalog from already validated rows
    pub fn from_rows(rows: impl IntoIterator<Item = NeoRow>) -> Self {
        let mut catalog = Catalog::default();
        for (row, parsed) in rows.into_iter().enumerate() {
            catalog.insert_row(parsed, row);
        }
        catalog
    }

    fn insert_row(&mut self, row: NeoRow, ordinal: usize) {
        let orbit = OrbitPath::new(
            row.name.as_str(),
            row.close_approach_date.as_str(),
            row.miss_distance_kilometers,
            ordinal,
        );

        let id = match self.by_name.get(&row.name) {
            Some(id) => *id,
            None => {
                let id = ObjectId(self.objects.len());
                self.objects.push(NearEarthObject::new(
                    row.id,
                    row.name.as_str(),
                    row.is_potentially_hazardous_asteroid,
                    row.diameter_min_km,
                    row.diameter_max_km,
                ));
                self.by_name.insert(row.name, id);
                id
            }
        };

        self.objects[id.0].update_orbits(orbit);
        self.by_date.insert(row.close_approach_date, id);
    }

    fn resolve(&self, ids: &[ObjectId]) -> Vec<&NearEarthObject> {
        ids.iter().map(|id| &self.objects[id.0]).collect()
    }

    /// Objects with an approach on `date`, in load order.
    ///
    /// An object with several approaches that day is listed once per approach.
    pub fn find_by_date(&self, date: &str) -> Vec<&NearEarthObject> {
        self.resolve(self.by_date.lookup_eq(date))
    }

    /// Objects with an approach on any date in `[start, end]`.
    ///
    /// Dates ascend; load order is kept within a date.
    pub fn find_by_date_range(&self, start: &str, end: &str) -> Vec<&NearEarthObject> {
        self.resolve(&self.by_date.lookup_range(start, end))
    }

    /// Object lookup by name
    pub fn find_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.by_name.get(name).map(|id| &self.objects[id.0])
    }

    /// Iterates over every object in load order
    pub fn objects(&self) -> impl Iterator<Item = &NearEarthObject> {
        self.objects.iter()
    }

    /// Number of distinct objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of approach records
    pub fn orbit_count(&self) -> usize {
        self.by_date.entry_count()
    }

    /// Number of distinct approach dates
    pub fn date_count(&self) -> usize {
        self.by_date.key_count()
    }

    /// Earliest and latest approach dates
    pub fn date_span(&self) -> Option<(&str, &str)> {
        self.by_date.span()
    }

    /// Verifies the cross-index invariants.
    ///
    /// Every date-indexed object and every approach back-reference must
    /// resolve through the name index.
    pub fn is_consistent(&self) -> bool {
        let dates_resolve = self
            .by_date
            .ids()
            .all(|id| id.0 < self.objects.len() && self.by_name.get(self.objects[id.0].name()) == Some(&id));
        let orbits_resolve = self
            .objects
            .iter()
            .flat_map(|neo| neo.orbits())
            .all(|orbit| self.find_by_name(orbit.neo_name()).is_some());
        dates_resolve && orbits_resolve
    }
}
