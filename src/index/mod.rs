//! Date index for neoquery
//!
//! The date index is derived, in-memory-only state built while the catalog
//! loads. Keys are ISO calendar dates compared as strings, which for
//! `YYYY-MM-DD` matches calendar order.
//!
//! # Invariants
//!
//! - Iteration is in ascending key order (BTreeMap)
//! - Each bucket keeps insertion order; an object appears once per approach
//! - Every id in a bucket refers to an object owned by the catalog

mod date_index;

pub use date_index::{DateIndex, ObjectId};
