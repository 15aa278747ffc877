//! Query builder
//!
//! Normalizes [`QueryParams`] into an immutable [`SearchRequest`].
//!
//! Normalization order:
//! 1. Date condition (exact date wins over the range)
//! 2. Filters, in the order given
//! 3. Result kind

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::RecordKind;
use crate::observability::Event;

use super::ast::{DateSearch, Filter, QueryParams};
use super::errors::{QueryError, QueryResult};

/// Normalized, immutable search request.
///
/// Only [`QueryBuilder::build`] constructs one, so a request always holds
/// valid dates and at most one distance filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    date_search: DateSearch,
    number: usize,
    filters: Vec<Filter>,
    return_object: RecordKind,
}

impl SearchRequest {
    pub fn date_search(&self) -> &DateSearch {
        &self.date_search
    }

    /// Maximum number of results
    pub fn number(&self) -> usize {
        self.number
    }

    /// Filters in application order
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn return_object(&self) -> RecordKind {
        self.return_object
    }
}

/// Builds search requests from raw parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes `params`, rejecting anything the searcher cannot run.
    ///
    /// Filters naming an unknown field are dropped rather than rejected.
    pub fn build(&self, params: &QueryParams) -> QueryResult<SearchRequest> {
        let result = self.normalize(params);
        match &result {
            Ok(request) => tracing::debug!(
                event = %Event::QueryBuilt,
                date_search = %request.date_search,
                filters = request.filters.len(),
                number = request.number,
                return_object = %request.return_object
            ),
            Err(e) => tracing::warn!(event = %Event::QueryRejected, code = e.code(), error = %e),
        }
        result
    }

    fn normalize(&self, params: &QueryParams) -> QueryResult<SearchRequest> {
        let date_search = Self::date_search(params)?;
        let filters = Self::filters(&params.filter)?;
        let return_object = RecordKind::from_name(&params.return_object)
            .ok_or_else(|| QueryError::UnknownReturnObject(params.return_object.clone()))?;

        Ok(SearchRequest {
            date_search,
            number: params.number,
            filters,
            return_object,
        })
    }

    fn date_search(params: &QueryParams) -> QueryResult<DateSearch> {
        if let Some(date) = &params.date {
            return Ok(DateSearch::Equals {
                date: Self::normalize_date(date)?,
            });
        }

        match (&params.start_date, &params.end_date) {
            (Some(start), Some(end)) => Ok(DateSearch::Between {
                start: Self::normalize_date(start)?,
                end: Self::normalize_date(end)?,
            }),
            _ => Err(QueryError::MissingDateBounds),
        }
    }

    /// Dates are keys compared as strings, so they must be canonical ISO
    fn normalize_date(value: &str) -> QueryResult<String> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(|d| d.format("%Y-%m-%d").to_string())
            .map_err(|e| QueryError::InvalidDate {
                value: value.to_string(),
                reason: e.to_string(),
            })
    }

    fn filters(raw: &[String]) -> QueryResult<Vec<Filter>> {
        let mut filters = Vec::with_capacity(raw.len());
        for option in raw {
            match Filter::parse(option)? {
                Some(filter) => filters.push(filter),
                None => tracing::warn!(event = %Event::FilterDropped, filter = %option),
            }
        }

        if filters.iter().filter(|f| f.is_distance()).count() > 1 {
            return Err(QueryError::DuplicateDistanceFilter);
        }
        Ok(filters)
    }
}
