//! neoquery - A deterministic, read-only query engine over near-Earth-object data
//!
//! Records are loaded once into an immutable [`catalog::Catalog`], queries are
//! normalized by the [`planner`] and executed by the [`executor`].

pub mod catalog;
pub mod cli;
pub mod executor;
pub mod index;
pub mod model;
pub mod observability;
pub mod planner;
