//! Search executor subsystem for neoquery
//!
//! Runs a [`SearchRequest`](crate::planner::SearchRequest) against a
//! [`Catalog`](crate::catalog::Catalog).
//!
//! # Execution Flow (strict order)
//!
//! 1. Resolve the date condition through the date index
//! 2. Set the distance filter aside; apply every other filter to objects
//! 3. Expand the surviving objects into all of their approaches
//! 4. Apply the distance filter to approaches and re-derive the objects
//!    from the approaches that survive
//! 5. Deduplicate objects and approaches, keeping first-seen order
//! 6. Project to the requested kind and truncate
//!
//! Step 4 means an object only disappears when none of its approaches pass
//! the distance filter.

mod filters;
mod result;
mod searcher;

pub use filters::Filterable;
pub use result::SearchResults;
pub use searcher::NeoSearcher;
