//! Catalog subsystem for neoquery
//!
//! The catalog owns every loaded record and the two lookup structures:
//!
//! - name index: object name -> object (one record per distinct name)
//! - date index: approach date -> objects with an approach that day
//!
//! # Load Flow (strict order, per row)
//!
//! 1. Validate the row and build the approach record
//! 2. Register the object if its name is new
//! 3. Append the approach to the object
//! 4. Append the object to the date bucket of the approach
//!
//! Any row error aborts the load. There is no partial catalog.

mod catalog;
mod errors;
mod loader;

pub use catalog::Catalog;
pub use errors::{CatalogError, CatalogResult, LoadError, RecordError};
pub use loader::{CatalogLoader, CsvSource, JsonSource, NeoRow, RawRow, RowSource, SourceFormat, VecSource};
