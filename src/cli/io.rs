//! JSON I/O handling for CLI
//!
//! - Input (batch): one JSON query object per line
//! - Output: one JSON object per response line
//! - UTF-8 only

use std::io::{BufRead, Write};

use serde_json::Value;

use crate::planner::QueryParams;

use super::errors::CliResult;

/// Reads query parameters, one JSON object per line. Blank lines are skipped.
///
/// A request without `number` gets `default_number`.
pub fn read_requests<R: BufRead>(
    input: R,
    default_number: usize,
) -> impl Iterator<Item = CliResult<QueryParams>> {
    input
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .map(move |line| parse_request(&line?, default_number))
}

fn parse_request(line: &str, default_number: usize) -> CliResult<QueryParams> {
    let mut value: Value = serde_json::from_str(line)?;
    if let Some(obj) = value.as_object_mut() {
        obj.entry("number").or_insert(Value::from(default_number));
    }
    Ok(serde_json::from_value(value)?)
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_requests_skips_blank_lines() {
        let input = "{\"number\": 1, \"date\": \"2020-01-01\"}\n\n{\"start_date\": \"2020-01-01\", \"end_date\": \"2020-01-02\"}\n";
        let requests: Vec<_> = read_requests(input.as_bytes(), 7).collect();

        assert_eq!(requests.len(), 2);
        let first = requests[0].as_ref().unwrap();
        assert_eq!(first.number, 1);
        let second = requests[1].as_ref().unwrap();
        assert_eq!(second.number, 7);
        assert_eq!(second.end_date.as_deref(), Some("2020-01-02"));
    }

    #[test]
    fn test_read_requests_reports_bad_json() {
        let requests: Vec<_> = read_requests("{oops}\n".as_bytes(), 10).collect();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].as_ref().unwrap_err().code(), "NEO_CLI_JSON_ERROR");
    }

    #[test]
    fn test_write_response_and_error() {
        let mut out = Vec::new();
        write_response(&mut out, json!({"count": 0})).unwrap();
        write_error(&mut out, "NEO_QUERY_INVALID_DATE", "bad date").unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0]["status"], json!("ok"));
        assert_eq!(lines[0]["data"]["count"], json!(0));
        assert_eq!(lines[1]["status"], json!("error"));
        assert_eq!(lines[1]["code"], json!("NEO_QUERY_INVALID_DATE"));
    }
}
