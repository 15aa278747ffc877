//! Explain output
//!
//! Shows how a query was normalized and how the searcher will run it,
//! without touching the catalog.

use std::fmt;

use serde::Serialize;

use super::ast::{DateSearch, QueryParams};
use super::builder::{QueryBuilder, SearchRequest};
use super::errors::QueryError;

/// Explain plan output
#[derive(Debug, Clone, Serialize)]
pub struct ExplainPlan {
    /// Whether normalization succeeded
    pub accepted: bool,
    /// `INDEX_EQ` or `INDEX_RANGE`
    pub date_lookup: Option<String>,
    /// Human-readable date condition
    pub date_condition: Option<String>,
    /// Filters applied to objects, in order
    pub object_filters: Vec<String>,
    /// Filter applied to approaches after expansion
    pub approach_filter: Option<String>,
    /// Result kind
    pub return_object: Option<String>,
    pub limit: Option<usize>,
    pub rejection_code: Option<String>,
    pub rejection_reason: Option<String>,
}

impl ExplainPlan {
    /// Normalizes `params` and explains the outcome
    pub fn explain(params: &QueryParams) -> Self {
        match QueryBuilder::new().build(params) {
            Ok(request) => Self::from_request(&request),
            Err(e) => Self::from_error(&e),
        }
    }

    /// Creates an explain plan from a normalized request
    pub fn from_request(request: &SearchRequest) -> Self {
        let date_search = request.date_search();
        let lookup = match date_search {
            DateSearch::Equals { .. } => "INDEX_EQ",
            DateSearch::Between { .. } => "INDEX_RANGE",
        };

        let (approach, object): (Vec<_>, Vec<_>) =
            request.filters().iter().partition(|f| f.is_distance());

        Self {
            accepted: true,
            date_lookup: Some(lookup.to_string()),
            date_condition: Some(date_search.to_string()),
            object_filters: object.iter().map(|f| f.to_string()).collect(),
            approach_filter: approach.first().map(|f| f.to_string()),
            return_object: Some(request.return_object().as_str().to_string()),
            limit: Some(request.number()),
            rejection_code: None,
            rejection_reason: None,
        }
    }

    /// Creates an explain plan from a rejection
    pub fn from_error(err: &QueryError) -> Self {
        Self {
            accepted: false,
            date_lookup: None,
            date_condition: None,
            object_filters: Vec::new(),
            approach_filter: None,
            return_object: None,
            limit: None,
            rejection_code: Some(err.code().to_string()),
            rejection_reason: Some(err.to_string()),
        }
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;

        if !self.accepted {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = &self.rejection_code {
                writeln!(f, "Error Code: {}", code)?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {}", reason)?;
            }
            return Ok(());
        }

        writeln!(f, "Status: ACCEPTED")?;
        if let (Some(lookup), Some(condition)) = (&self.date_lookup, &self.date_condition) {
            writeln!(f, "Date Lookup: {} ({})", lookup, condition)?;
        }
        if !self.object_filters.is_empty() {
            writeln!(f, "Object Filters:")?;
            for filter in &self.object_filters {
                writeln!(f, "  - {}", filter)?;
            }
        }
        if let Some(filter) = &self.approach_filter {
            writeln!(f, "Approach Filter: {}", filter)?;
        }
        if let Some(kind) = &self.return_object {
            writeln!(f, "Return: {}", kind)?;
        }
        if let Some(limit) = self.limit {
            writeln!(f, "Limit: {}", limit)?;
        }
        Ok(())
    }
}
