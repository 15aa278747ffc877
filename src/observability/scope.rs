//! ObservationScope for automatic begin/complete logging
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE` with elapsed time on completion
//! - Logs `{name}_FAILED` when failed explicitly
//! - Logs `{name}_INCOMPLETE` on drop if neither happened (early `?` return)

use std::time::Instant;

/// A scope that logs its own start and end
///
/// ```ignore
/// let scope = ObservationScope::new("CATALOG_LOAD");
/// // ... do work ...
/// scope.complete(); // logs CATALOG_LOAD_COMPLETE
/// ```
pub struct ObservationScope {
    name: &'static str,
    started: Instant,
    finished: bool,
}

impl ObservationScope {
    /// Create a new observation scope. Logs `{name}_BEGIN` at DEBUG.
    pub fn new(name: &'static str) -> Self {
        tracing::debug!(event = %format!("{}_BEGIN", name));
        Self {
            name,
            started: Instant::now(),
            finished: false,
        }
    }

    /// Milliseconds since the scope was opened
    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }

    /// Mark the scope as successfully completed
    pub fn complete(self) {
        self.complete_with(&[]);
    }

    /// Mark the scope as completed, attaching extra key/value pairs
    pub fn complete_with(mut self, fields: &[(&str, &str)]) {
        self.finished = true;
        let details = Self::render(fields);
        tracing::info!(
            event = %format!("{}_COMPLETE", self.name),
            elapsed_ms = self.elapsed_ms() as u64,
            "{}",
            details
        );
    }

    /// Mark the scope as failed with a reason
    pub fn fail(mut self, reason: &str) {
        self.finished = true;
        tracing::error!(
            event = %format!("{}_FAILED", self.name),
            elapsed_ms = self.elapsed_ms() as u64,
            reason
        );
    }

    fn render(fields: &[(&str, &str)]) -> String {
        fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(
                event = %format!("{}_INCOMPLETE", self.name),
                reason = "scope dropped without completion"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_complete() {
        let scope = ObservationScope::new("TEST");
        assert!(!scope.finished);
        scope.complete();
    }

    #[test]
    fn test_scope_complete_with_fields() {
        let scope = ObservationScope::new("TEST");
        scope.complete_with(&[("result", "success"), ("rows", "3")]);
    }

    #[test]
    fn test_scope_fail() {
        let scope = ObservationScope::new("TEST");
        scope.fail("something went wrong");
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let scope = ObservationScope::new("TEST");
        drop(scope);
    }

    #[test]
    fn test_render() {
        assert_eq!(ObservationScope::render(&[("a", "1"), ("b", "2")]), "a=1 b=2");
        assert_eq!(ObservationScope::render(&[]), "");
    }
}
