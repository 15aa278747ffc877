//! Observability subsystem for neoquery
//!
//! Provides:
//! - Typed lifecycle events ([`Event`])
//! - Begin/complete scopes with elapsed time ([`ObservationScope`])
//! - Subscriber setup for the CLI ([`init_logging`])
//!
//! Events are emitted through `tracing` with the event name in the `event`
//! field. Observability is read-only and never changes query results.
//!
//! # Usage
//!
//! ```ignore
//! use neoquery::observability::{Event, ObservationScope};
//!
//! tracing::info!(event = %Event::CatalogLoaded, objects = 42);
//!
//! let scope = ObservationScope::new("SEARCH");
//! // ... do work ...
//! scope.complete_with(&[("returned", "3")]);
//! ```

mod events;
mod scope;

pub use events::Event;
pub use scope::ObservationScope;

use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins over `default_level` when set. Calling this twice is a
/// no-op for the second call.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Returns true if `level` parses as a filter directive
pub fn is_valid_level(level: &str) -> bool {
    EnvFilter::try_new(level).is_ok()
}
