//! Query planner subsystem for neoquery
//!
//! Turns raw query parameters into an immutable [`SearchRequest`].
//!
//! # Design Principles
//!
//! - Closed vocabularies: fields, operators and result kinds are enums
//! - Fail fast: bad dates, operators and values are rejected here, not
//!   during search
//! - Permissive on unknown fields: such filters are dropped with a warning
//!
//! # Normalization Rules
//!
//! 1. An exact `date` gives `equals`; otherwise `start_date`/`end_date` give
//!    `between` and both are required
//! 2. Each `field:operator:value` string becomes a typed [`Filter`]
//! 3. At most one `distance` filter per request
//! 4. `return_object` must be `NEO` or `Path`

mod ast;
mod builder;
mod errors;
mod explain;

pub use ast::{DateSearch, Filter, FilterField, FilterOp, FilterValue, QueryParams};
pub use builder::{QueryBuilder, SearchRequest};
pub use errors::{QueryError, QueryResult};
pub use explain::ExplainPlan;
