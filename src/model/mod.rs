//! Record model for neoquery
//!
//! Two record kinds exist:
//!
//! - [`NearEarthObject`]: a unique celestial body, keyed by name
//! - [`OrbitPath`]: one close approach of a body on a calendar date
//!
//! An orbit path refers back to its body by name only. The catalog resolves
//! that name through its name index; there is no pointer back to the owner.

mod types;

pub use types::{NearEarthObject, OrbitPath, RecordKind};
