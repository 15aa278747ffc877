//! Query structures
//!
//! [`QueryParams`] is the raw, external form of a query. Everything else in
//! this file is the normalized vocabulary the builder produces from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::RecordKind;

use super::errors::{QueryError, QueryResult};

fn default_return_object() -> String {
    RecordKind::Object.as_str().to_string()
}

/// Raw query parameters as supplied by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Maximum number of results
    pub number: usize,
    /// Exact approach date; wins over the range when set
    #[serde(default)]
    pub date: Option<String>,
    /// Inclusive range start
    #[serde(default)]
    pub start_date: Option<String>,
    /// Inclusive range end
    #[serde(default)]
    pub end_date: Option<String>,
    /// Filters in `field:operator:value` form, applied in order
    #[serde(default)]
    pub filter: Vec<String>,
    /// `NEO` or `Path`
    #[serde(default = "default_return_object")]
    pub return_object: String,
}

impl QueryParams {
    /// Query for a single approach date
    pub fn on(date: impl Into<String>) -> Self {
        Self {
            number: 10,
            date: Some(date.into()),
            start_date: None,
            end_date: None,
            filter: Vec::new(),
            return_object: default_return_object(),
        }
    }

    /// Query for an inclusive date range
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            number: 10,
            date: None,
            start_date: Some(start.into()),
            end_date: Some(end.into()),
            filter: Vec::new(),
            return_object: default_return_object(),
        }
    }

    /// Sets the result limit
    pub fn with_number(mut self, number: usize) -> Self {
        self.number = number;
        self
    }

    /// Appends a raw filter string
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter.push(filter.into());
        self
    }

    /// Sets the requested result kind by name
    pub fn returning(mut self, return_object: impl Into<String>) -> Self {
        self.return_object = return_object.into();
        self
    }
}

/// Normalized date condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DateSearch {
    /// Approaches on exactly this date
    Equals { date: String },
    /// Approaches with `start <= date <= end`
    Between { start: String, end: String },
}

impl DateSearch {
    pub fn name(&self) -> &'static str {
        match self {
            DateSearch::Equals { .. } => "equals",
            DateSearch::Between { .. } => "between",
        }
    }
}

impl fmt::Display for DateSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSearch::Equals { date } => write!(f, "date = {}", date),
            DateSearch::Between { start, end } => write!(f, "{} <= date <= {}", start, end),
        }
    }
}

/// Filterable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    /// Object minimum estimated diameter, km
    Diameter,
    /// Approach miss distance, km
    Distance,
    /// Object hazard flag
    IsHazardous,
}

impl FilterField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "diameter" => Some(FilterField::Diameter),
            "distance" => Some(FilterField::Distance),
            "is_hazardous" => Some(FilterField::IsHazardous),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Diameter => "diameter",
            FilterField::Distance => "distance",
            FilterField::IsHazardous => "is_hazardous",
        }
    }

    /// The record kind that carries this field
    pub fn owner(&self) -> RecordKind {
        match self {
            FilterField::Distance => RecordKind::Path,
            FilterField::Diameter | FilterField::IsHazardous => RecordKind::Object,
        }
    }

    /// Parses a literal into this field's value type
    pub fn parse_value(&self, literal: &str) -> Option<FilterValue> {
        let literal = literal.trim();
        match self {
            FilterField::Diameter | FilterField::Distance => literal
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(FilterValue::Number),
            FilterField::IsHazardous => match literal.to_ascii_lowercase().as_str() {
                "true" | "1" => Some(FilterValue::Flag(true)),
                "false" | "0" => Some(FilterValue::Flag(false)),
                _ => None,
            },
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FilterOp {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">=")]
    Gte,
}

impl FilterOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(FilterOp::Gt),
            "=" => Some(FilterOp::Eq),
            ">=" => Some(FilterOp::Gte),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            FilterOp::Gt => ">",
            FilterOp::Eq => "=",
            FilterOp::Gte => ">=",
        }
    }

    /// Applies the operator as `actual <op> literal`
    pub fn compare<T: PartialOrd>(&self, actual: &T, literal: &T) -> bool {
        match self {
            FilterOp::Gt => actual > literal,
            FilterOp::Eq => actual == literal,
            FilterOp::Gte => actual >= literal,
        }
    }
}

/// A typed filter literal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Flag(bool),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Number(n) => write!(f, "{}", n),
            FilterValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// A single predicate: `field <op> value`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    field: FilterField,
    op: FilterOp,
    value: FilterValue,
}

impl Filter {
    /// Parses `field:operator:value`.
    ///
    /// Returns `Ok(None)` for an unknown field name; such filters are ignored.
    /// The value is the last `:`-separated segment.
    pub fn parse(raw: &str) -> QueryResult<Option<Self>> {
        let parts: Vec<&str> = raw.split(':').collect();

        let field = match FilterField::from_name(parts[0].trim()) {
            Some(field) => field,
            None => return Ok(None),
        };
        if parts.len() < 3 {
            return Err(QueryError::MalformedFilter(raw.to_string()));
        }

        let op = FilterOp::from_symbol(parts[1].trim()).ok_or_else(|| QueryError::UnknownOperator {
            filter: raw.to_string(),
            op: parts[1].to_string(),
        })?;

        let literal = parts[parts.len() - 1];
        let value = field
            .parse_value(literal)
            .ok_or_else(|| QueryError::InvalidFilterValue {
                filter: raw.to_string(),
                value: literal.to_string(),
            })?;

        Ok(Some(Self { field, op, value }))
    }

    pub fn field(&self) -> FilterField {
        self.field
    }

    pub fn op(&self) -> FilterOp {
        self.op
    }

    pub fn value(&self) -> FilterValue {
        self.value
    }

    /// True for the approach-distance filter
    pub fn is_distance(&self) -> bool {
        self.field == FilterField::Distance
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.field.as_str(), self.op.symbol(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_builder() {
        let params = QueryParams::between("2020-01-01", "2020-01-31")
            .with_number(5)
            .with_filter("distance:>=:10000")
            .returning("Path");

        assert_eq!(params.number, 5);
        assert_eq!(params.date, None);
        assert_eq!(params.filter, vec!["distance:>=:10000"]);
        assert_eq!(params.return_object, "Path");
    }

    #[test]
    fn test_params_deserialize_defaults() {
        let params: QueryParams =
            serde_json::from_str(r#"{"number": 3, "date": "2020-01-01"}"#).unwrap();
        assert_eq!(params.return_object, "NEO");
        assert!(params.filter.is_empty());
        assert_eq!(params.start_date, None);
    }

    #[test]
    fn test_filter_parse() {
        let filter = Filter::parse("diameter:>:0.042").unwrap().unwrap();
        assert_eq!(filter.field(), FilterField::Diameter);
        assert_eq!(filter.op(), FilterOp::Gt);
        assert_eq!(filter.value(), FilterValue::Number(0.042));
        assert!(!filter.is_distance());

        let filter = Filter::parse("is_hazardous:=:True").unwrap().unwrap();
        assert_eq!(filter.value(), FilterValue::Flag(true));
    }

    #[test]
    fn test_filter_unknown_field_is_dropped() {
        assert_eq!(Filter::parse("velocity:>:10").unwrap(), None);
        assert_eq!(Filter::parse("").unwrap(), None);
    }

    #[test]
    fn test_filter_value_is_last_segment() {
        let filter = Filter::parse("distance:>=:ignored:250").unwrap().unwrap();
        assert_eq!(filter.value(), FilterValue::Number(250.0));
    }

    #[test]
    fn test_filter_rejects_malformed() {
        assert_eq!(
            Filter::parse("distance:>").unwrap_err().code(),
            "NEO_QUERY_MALFORMED_FILTER"
        );
        assert_eq!(
            Filter::parse("distance:<:5").unwrap_err().code(),
            "NEO_QUERY_UNKNOWN_OPERATOR"
        );
        assert_eq!(
            Filter::parse("is_hazardous:=:perhaps").unwrap_err().code(),
            "NEO_QUERY_INVALID_FILTER_VALUE"
        );
    }

    #[test]
    fn test_operator_compare() {
        assert!(FilterOp::Gt.compare(&10.0, &9.0));
        assert!(!FilterOp::Gt.compare(&9.0, &9.0));
        assert!(FilterOp::Gte.compare(&9.0, &9.0));
        assert!(FilterOp::Eq.compare(&true, &true));
        assert!(FilterOp::Gt.compare(&true, &false));
    }

    #[test]
    fn test_field_owner() {
        assert_eq!(FilterField::Distance.owner(), RecordKind::Path);
        assert_eq!(FilterField::Diameter.owner(), RecordKind::Object);
        assert_eq!(FilterField::IsHazardous.owner(), RecordKind::Object);
    }

    #[test]
    fn test_filter_display_roundtrips_symbol() {
        let filter = Filter::parse("distance:>=:10000").unwrap().unwrap();
        assert_eq!(filter.to_string(), "distance:>=:10000");
    }
}
