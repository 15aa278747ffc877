//! Row sources and data file loading
//!
//! A row source yields field-keyed rows. The catalog only sees [`RawRow`]s and
//! validates them into [`NeoRow`]s itself, so adding a file format means
//! adding a [`RowSource`] and nothing else.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::catalog::Catalog;
use super::errors::{CatalogResult, LoadError, RecordError};

/// A field-keyed row as read from a data source
pub type RawRow = HashMap<String, String>;

/// Trait for reading rows sequentially during a catalog load
pub trait RowSource {
    /// Read the next row.
    /// Returns None if at end.
    /// Returns Err if the source itself is unreadable.
    fn next_row(&mut self) -> Result<Option<RawRow>, LoadError>;
}

/// In-memory row source
#[derive(Debug, Default)]
pub struct VecSource {
    rows: VecDeque<RawRow>,
}

impl VecSource {
    pub fn new(rows: impl IntoIterator<Item = RawRow>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }
}

impl RowSource for VecSource {
    fn next_row(&mut self) -> Result<Option<RawRow>, LoadError> {
        Ok(self.rows.pop_front())
    }
}

/// CSV row source. The header row supplies the field keys.
pub struct CsvSource<R: Read> {
    reader: csv::Reader<R>,
    headers: Option<csv::StringRecord>,
    row: usize,
}

impl CsvSource<File> {
    /// Opens a CSV file
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> CsvSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: csv::ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .trim(csv::Trim::All)
                .from_reader(reader),
            headers: None,
            row: 0,
        }
    }
}

/// Header is line 1, so data row `row` sits on line `row + 2` when the csv
/// error carries no position.
fn malformed_csv(row: usize, err: csv::Error) -> LoadError {
    let line = err
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(row + 2);
    LoadError::Malformed {
        line,
        reason: err.to_string(),
    }
}

impl<R: Read> RowSource for CsvSource<R> {
    fn next_row(&mut self) -> Result<Option<RawRow>, LoadError> {
        let row = self.row;
        if self.headers.is_none() {
            let headers = self.reader.headers().map_err(|e| malformed_csv(row, e))?.clone();
            self.headers = Some(headers);
        }

        let mut record = csv::StringRecord::new();
        let more = self
            .reader
            .read_record(&mut record)
            .map_err(|e| malformed_csv(row, e))?;
        if !more {
            return Ok(None);
        }
        self.row += 1;

        let row = match &self.headers {
            Some(headers) => headers
                .iter()
                .zip(record.iter())
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            None => RawRow::new(),
        };
        Ok(Some(row))
    }
}

/// JSON row source: either one array of objects or one object per line.
#[derive(Debug)]
pub struct JsonSource {
    rows: VecDeque<RawRow>,
}

impl JsonSource {
    /// Opens a JSON or JSON-lines file
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, LoadError> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| LoadError::Malformed {
                line: 0,
                reason: e.to_string(),
            })?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self, LoadError> {
        let trimmed = content.trim_start();
        let objects: Vec<Map<String, Value>> = if trimmed.starts_with('[') {
            serde_json::from_str(content).map_err(|e| LoadError::Malformed {
                line: e.line(),
                reason: format!("Invalid JSON array: {}", e),
            })?
        } else {
            let mut objects = Vec::new();
            for (index, text) in content.lines().enumerate() {
                if text.trim().is_empty() {
                    continue;
                }
                let object = serde_json::from_str(text).map_err(|e| LoadError::Malformed {
                    line: index + 1,
                    reason: format!("Invalid JSON line: {}", e),
                })?;
                objects.push(object);
            }
            objects
        };

        Ok(Self {
            rows: objects.into_iter().map(Self::flatten).collect(),
        })
    }

    /// Stringifies scalar values. Nulls are treated as absent fields.
    fn flatten(object: Map<String, Value>) -> RawRow {
        object
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::Null => None,
                Value::String(s) => Some((k, s)),
                other => Some((k, other.to_string())),
            })
            .collect()
    }
}

impl RowSource for JsonSource {
    fn next_row(&mut self) -> Result<Option<RawRow>, LoadError> {
        Ok(self.rows.pop_front())
    }
}

/// A validated, typed row
#[derive(Debug, Clone, PartialEq)]
pub struct NeoRow {
    pub name: String,
    pub id: String,
    pub is_potentially_hazardous_asteroid: bool,
    pub diameter_min_km: f64,
    pub diameter_max_km: f64,
    /// Normalized to `YYYY-MM-DD`
    pub close_approach_date: String,
    pub miss_distance_kilometers: f64,
}

impl NeoRow {
    pub const NAME: &'static str = "name";
    pub const ID: &'static str = "id";
    pub const HAZARDOUS: &'static str = "is_potentially_hazardous_asteroid";
    pub const DIAMETER_MIN: &'static str = "estimated_diameter_min_kilometers";
    pub const DIAMETER_MAX: &'static str = "estimated_diameter_max_kilometers";
    pub const APPROACH_DATE: &'static str = "close_approach_date";
    pub const MISS_DISTANCE: &'static str = "miss_distance_kilometers";

    /// Validates a raw row. `row` is only used for error reporting.
    pub fn from_raw(raw: &RawRow, row: usize) -> Result<Self, RecordError> {
        let field = |name| required(raw, row, name);

        Ok(Self {
            name: field(Self::NAME)?.to_string(),
            id: field(Self::ID)?.to_string(),
            is_potentially_hazardous_asteroid: parse_flag(row, Self::HAZARDOUS, field(Self::HAZARDOUS)?)?,
            diameter_min_km: parse_km(row, Self::DIAMETER_MIN, field(Self::DIAMETER_MIN)?)?,
            diameter_max_km: parse_km(row, Self::DIAMETER_MAX, field(Self::DIAMETER_MAX)?)?,
            close_approach_date: parse_date(row, Self::APPROACH_DATE, field(Self::APPROACH_DATE)?)?,
            miss_distance_kilometers: parse_km(row, Self::MISS_DISTANCE, field(Self::MISS_DISTANCE)?)?,
        })
    }
}

fn required<'a>(raw: &'a RawRow, row: usize, field: &'static str) -> Result<&'a str, RecordError> {
    raw.get(field)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or(RecordError::MissingField { row, field })
}

fn invalid(row: usize, field: &'static str, value: &str, reason: impl Into<String>) -> RecordError {
    RecordError::InvalidField {
        row,
        field,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_flag(row: usize, field: &'static str, value: &str) -> Result<bool, RecordError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid(row, field, value, "expected a boolean")),
    }
}

fn parse_km(row: usize, field: &'static str, value: &str) -> Result<f64, RecordError> {
    let km: f64 = value
        .parse()
        .map_err(|_| invalid(row, field, value, "expected a number"))?;
    if !km.is_finite() || km < 0.0 {
        return Err(invalid(row, field, value, "expected a finite, non-negative number"));
    }
    Ok(km)
}

fn parse_date(row: usize, field: &'static str, value: &str) -> Result<String, RecordError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|e| invalid(row, field, value, e.to_string()))
}

/// Supported data file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    /// Picks the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "json" | "jsonl" | "ndjson" => Ok(SourceFormat::Json),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Resolves the data source path and builds a catalog from it
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    default_path: Option<PathBuf>,
}

impl CatalogLoader {
    pub fn new(default_path: Option<PathBuf>) -> Self {
        Self { default_path }
    }

    /// Loads from `path`, falling back to the default path.
    ///
    /// Fails with `NEO_LOAD_NO_SOURCE` if neither is set.
    pub fn load(&self, path: Option<&Path>) -> CatalogResult<Catalog> {
        let path = path
            .or(self.default_path.as_deref())
            .ok_or(LoadError::NoSource)?;

        match SourceFormat::from_path(path)? {
            SourceFormat::Csv => Catalog::load(&mut CsvSource::from_path(path)?),
            SourceFormat::Json => Catalog::load(&mut JsonSource::from_path(path)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_row() -> RawRow {
        raw(&[
            ("name", "433 Eros"),
            ("id", "2000433"),
            ("is_potentially_hazardous_asteroid", "False"),
            ("estimated_diameter_min_kilometers", "10.1"),
            ("estimated_diameter_max_kilometers", "22.6"),
            ("close_approach_date", "2020-01-01"),
            ("miss_distance_kilometers", "26729000.5"),
        ])
    }

    #[test]
    fn test_from_raw_valid() {
        let row = NeoRow::from_raw(&full_row(), 0).unwrap();
        assert_eq!(row.name, "433 Eros");
        assert!(!row.is_potentially_hazardous_asteroid);
        assert_eq!(row.diameter_min_km, 10.1);
        assert_eq!(row.close_approach_date, "2020-01-01");
    }

    #[test]
    fn test_from_raw_missing_field() {
        let mut row = full_row();
        row.remove("close_approach_date");
        let err = NeoRow::from_raw(&row, 4).unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingField {
                row: 4,
                field: "close_approach_date"
            }
        );
    }

    #[test]
    fn test_from_raw_empty_value_is_missing() {
        let mut row = full_row();
        row.insert("name".into(), "  ".into());
        let err = NeoRow::from_raw(&row, 0).unwrap_err();
        assert_eq!(err.code(), "NEO_RECORD_MISSING_FIELD");
    }

    #[test]
    fn test_from_raw_invalid_values() {
        let mut row = full_row();
        row.insert("miss_distance_kilometers".into(), "-5".into());
        assert_eq!(NeoRow::from_raw(&row, 0).unwrap_err().code(), "NEO_RECORD_INVALID_FIELD");

        let mut row = full_row();
        row.insert("is_potentially_hazardous_asteroid".into(), "maybe".into());
        assert!(NeoRow::from_raw(&row, 0).is_err());

        let mut row = full_row();
        row.insert("close_approach_date".into(), "2020-02-30".into());
        assert!(NeoRow::from_raw(&row, 0).is_err());
    }

    #[test]
    fn test_flag_spellings() {
        for (value, expected) in [("True", true), ("true", true), ("1", true), ("FALSE", false), ("0", false)] {
            assert_eq!(parse_flag(0, "f", value).unwrap(), expected);
        }
    }

    #[test]
    fn test_csv_source_reads_rows() {
        let data = "name,id,close_approach_date\nA,1,2020-01-01\nB,2,2020-01-02\n";
        let mut source = CsvSource::from_reader(data.as_bytes());

        let first = source.next_row().unwrap().unwrap();
        assert_eq!(first.get("name").map(String::as_str), Some("A"));
        let second = source.next_row().unwrap().unwrap();
        assert_eq!(second.get("close_approach_date").map(String::as_str), Some("2020-01-02"));
        assert!(source.next_row().unwrap().is_none());
    }

    #[test]
    fn test_csv_source_short_row_omits_trailing_fields() {
        let data = "name,id,close_approach_date\nA,1\n";
        let mut source = CsvSource::from_reader(data.as_bytes());

        let row = source.next_row().unwrap().unwrap();
        assert_eq!(row.get("id").map(String::as_str), Some("1"));
        assert!(!row.contains_key("close_approach_date"));
        assert_eq!(
            NeoRow::from_raw(&row, 0).unwrap_err().code(),
            "NEO_RECORD_MISSING_FIELD"
        );
    }

    #[test]
    fn test_json_source_array_and_lines() {
        let array = r#"[{"name": "A", "id": 1, "is_potentially_hazardous_asteroid": true, "x": null}]"#;
        let mut source = JsonSource::from_reader(array.as_bytes()).unwrap();
        let row = source.next_row().unwrap().unwrap();
        assert_eq!(row.get("id").map(String::as_str), Some("1"));
        assert_eq!(row.get("is_potentially_hazardous_asteroid").map(String::as_str), Some("true"));
        assert!(!row.contains_key("x"));
        assert!(source.next_row().unwrap().is_none());

        let lines = "{\"name\": \"A\"}\n\n{\"name\": \"B\"}\n";
        let mut source = JsonSource::from_reader(lines.as_bytes()).unwrap();
        assert!(source.next_row().unwrap().is_some());
        assert!(source.next_row().unwrap().is_some());
        assert!(source.next_row().unwrap().is_none());
    }

    #[test]
    fn test_json_source_malformed() {
        let err = JsonSource::from_reader("{not json".as_bytes()).unwrap_err();
        assert_eq!(err.code(), "NEO_LOAD_MALFORMED_SOURCE");
    }

    #[test]
    fn test_source_format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("neos.csv")).unwrap(), SourceFormat::Csv);
        assert_eq!(SourceFormat::from_path(Path::new("neos.JSONL")).unwrap(), SourceFormat::Json);
        assert!(SourceFormat::from_path(Path::new("neos.xml")).is_err());
    }

    #[test]
    fn test_loader_without_source() {
        let err = CatalogLoader::default().load(None).unwrap_err();
        assert_eq!(err.code(), "NEO_LOAD_NO_SOURCE");
    }
}
