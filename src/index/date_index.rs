//! BTreeMap-based date index
//!
//! Maps each close-approach date to the ordered list of objects that had an
//! approach on that date.

use std::collections::BTreeMap;
use std::ops::Bound;

/// Position of an object in the catalog's object table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub(crate) usize);

/// Date-keyed index using BTreeMap for deterministic ordering.
#[derive(Debug, Default)]
pub struct DateIndex {
    tree: BTreeMap<String, Vec<ObjectId>>,
}

impl DateIndex {
    /// Creates a new empty index
    pub fn new() -> Self {
        Self {
            tree: BTreeMap::new(),
        }
    }

    /// Appends an object to the bucket for `date`, creating the bucket if absent.
    ///
    /// Duplicates are kept: an object with two approaches on one date is
    /// listed twice.
    pub fn insert(&mut self, date: impl Into<String>, id: ObjectId) {
        self.tree.entry(date.into()).or_default().push(id);
    }

    /// Lookup the bucket for an exact date.
    pub fn lookup_eq(&self, date: &str) -> &[ObjectId] {
        self.tree.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lookup every bucket with `start <= key <= end`.
    ///
    /// Buckets are concatenated in ascending key order; order within a bucket
    /// is preserved. An inverted range yields nothing.
    pub fn lookup_range(&self, start: &str, end: &str) -> Vec<ObjectId> {
        if start > end {
            return Vec::new();
        }

        let bounds: (Bound<&str>, Bound<&str>) = (Bound::Included(start), Bound::Included(end));
        let mut result = Vec::new();
        for (_, ids) in self.tree.range::<str, _>(bounds) {
            result.extend_from_slice(ids);
        }
        result
    }

    /// Returns the number of distinct dates
    pub fn key_count(&self) -> usize {
        self.tree.len()
    }

    /// Returns the total number of entries across all buckets
    pub fn entry_count(&self) -> usize {
        self.tree.values().map(|v| v.len()).sum()
    }

    /// Returns the earliest and latest indexed dates
    pub fn span(&self) -> Option<(&str, &str)> {
        let first = self.tree.keys().next()?;
        let last = self.tree.keys().next_back()?;
        Some((first.as_str(), last.as_str()))
    }

    /// Iterates over every indexed id, in key order
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.tree.values().flatten().copied()
    }
}
