//! CLI command implementations
//!
//! Every command except `explain` follows the same boot sequence:
//! resolve config, install logging, load the catalog. Query results and
//! errors go to stdout as JSON, logs go to stderr.

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};

use crate::catalog::{Catalog, CatalogLoader};
use crate::executor::{NeoSearcher, SearchResults};
use crate::observability::{self, Event};
use crate::planner::ExplainPlan;

use super::args::{Command, QueryArgs, SourceArgs};
use super::config::Config;
use super::errors::CliResult;
use super::io::{read_requests, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cmd {
        Command::Query { source, query: args } => query(&source, args, &mut out),
        Command::Explain { config, query: args } => {
            let config = boot_config(config.as_deref())?;
            explain(&config, args, &mut out)
        }
        Command::Batch { source } => {
            let stdin = io::stdin();
            batch(&source, stdin.lock(), &mut out)
        }
        Command::Stats { source } => stats(&source, &mut out),
    }
}

/// Execute a single query and exit
///
/// A rejected query is written as an error response and also returned, so
/// the process exits non-zero.
pub fn query<W: Write>(source: &SourceArgs, args: QueryArgs, out: &mut W) -> CliResult<()> {
    let (config, catalog) = boot(source)?;
    let params = args.into_params(config.default_number);

    match NeoSearcher::new(&catalog).search(&params) {
        Ok(results) => write_response(out, results_json(&results)?),
        Err(e) => {
            write_error(out, e.code(), &e.to_string())?;
            Err(e.into())
        }
    }
}

/// Print the normalized request, or the rejection, without loading data
pub fn explain<W: Write>(config: &Config, args: QueryArgs, out: &mut W) -> CliResult<()> {
    let params = args.into_params(config.default_number);
    let plan = ExplainPlan::explain(&params);

    write_response(out, serde_json::to_value(&plan)?)
}

/// Load once, then answer one JSON query per input line
///
/// A bad line produces an error response and processing continues.
pub fn batch<R: BufRead, W: Write>(source: &SourceArgs, input: R, out: &mut W) -> CliResult<()> {
    let (config, catalog) = boot(source)?;
    let searcher = NeoSearcher::new(&catalog);

    for (line, request) in read_requests(input, config.default_number).enumerate() {
        let outcome = request.and_then(|params| searcher.search(&params).map_err(Into::into));

        match outcome {
            Ok(results) => {
                tracing::debug!(event = %Event::BatchRequest, line, returned = results.len());
                write_response(out, results_json(&results)?)?;
            }
            Err(e) => {
                tracing::warn!(event = %Event::BatchRequest, line, code = e.code(), "{}", e);
                write_error(out, e.code(), &e.to_string())?;
            }
        }
    }

    Ok(())
}

/// Print catalog statistics
pub fn stats<W: Write>(source: &SourceArgs, out: &mut W) -> CliResult<()> {
    let (_, catalog) = boot(source)?;
    write_response(out, stats_json(&catalog))
}

fn boot_config(path: Option<&std::path::Path>) -> CliResult<Config> {
    let config = Config::resolve(path)?;
    observability::init_logging(&config.log_level);

    tracing::info!(
        event = %Event::ConfigLoaded,
        data_file = ?config.data_file,
        default_number = config.default_number
    );
    Ok(config)
}

fn boot(source: &SourceArgs) -> CliResult<(Config, Catalog)> {
    let config = boot_config(source.config.as_deref())?;
    let catalog = CatalogLoader::new(config.data_path()).load(source.data.as_deref())?;
    Ok((config, catalog))
}

fn results_json(results: &SearchResults<'_>) -> CliResult<Value> {
    let records = match results {
        SearchResults::Objects(v) => serde_json::to_value(v)?,
        SearchResults::Paths(v) => serde_json::to_value(v)?,
    };

    Ok(json!({
        "kind": results.kind().as_str(),
        "count": results.len(),
        "results": records
    }))
}

fn stats_json(catalog: &Catalog) -> Value {
    let (first_date, last_date) = match catalog.date_span() {
        Some((first, last)) => (Some(first), Some(last)),
        None => (None, None),
    };
    let hazardous = catalog
        .objects()
        .filter(|neo| neo.is_potentially_hazardous_asteroid())
        .count();

    json!({
        "objects": catalog.len(),
        "hazardous": hazardous,
        "orbits": catalog.orbit_count(),
        "dates": catalog.date_count(),
        "first_date": first_date,
        "last_date": last_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const CSV: &str = "\
name,id,is_potentially_hazardous_asteroid,estimated_diameter_min_kilometers,estimated_diameter_max_kilometers,close_approach_date,miss_distance_kilometers
X,1,False,1.0,2.0,2020-01-01,500
Y,2,True,0.1,0.2,2020-01-01,20000
X,1,False,1.0,2.0,2020-01-02,50000
";

    fn data_file(temp_dir: &TempDir) -> PathBuf {
        let path = temp_dir.path().join("neos.csv");
        fs::write(&path, CSV).unwrap();
        path
    }

    fn source(temp_dir: &TempDir) -> SourceArgs {
        SourceArgs {
            data: Some(data_file(temp_dir)),
            config: None,
        }
    }

    fn lines(out: Vec<u8>) -> Vec<Value> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn range_args() -> QueryArgs {
        QueryArgs {
            start_date: Some("2020-01-01".into()),
            end_date: Some("2020-01-02".into()),
            return_object: "NEO".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_query_writes_results() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = range_args();
        args.filter = vec!["distance:>=:10000".into()];

        let mut out = Vec::new();
        query(&source(&temp_dir), args, &mut out).unwrap();

        let response = &lines(out)[0];
        assert_eq!(response["status"], json!("ok"));
        assert_eq!(response["data"]["kind"], json!("NEO"));
        assert_eq!(response["data"]["count"], json!(2));
        assert_eq!(response["data"]["results"][0]["name"], json!("X"));
    }

    #[test]
    fn test_query_rejection_is_reported_and_returned() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = range_args();
        args.return_object = "Comet".into();

        let mut out = Vec::new();
        let err = query(&source(&temp_dir), args, &mut out).unwrap_err();
        assert_eq!(err.code(), "NEO_QUERY_UNKNOWN_RETURN_OBJECT");

        let response = &lines(out)[0];
        assert_eq!(response["status"], json!("error"));
        assert_eq!(response["code"], json!("NEO_QUERY_UNKNOWN_RETURN_OBJECT"));
    }

    #[test]
    fn test_query_without_source_fails() {
        let err = query(&SourceArgs::default(), range_args(), &mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.code(), "NEO_LOAD_NO_SOURCE");
    }

    #[test]
    fn test_config_supplies_data_file() {
        let temp_dir = TempDir::new().unwrap();
        let data = data_file(&temp_dir);
        let config_path = temp_dir.path().join("neoquery.json");
        fs::write(
            &config_path,
            json!({ "data_file": data.to_string_lossy() }).to_string(),
        )
        .unwrap();

        let source = SourceArgs {
            data: None,
            config: Some(config_path),
        };
        let mut out = Vec::new();
        stats(&source, &mut out).unwrap();

        let data = &lines(out)[0]["data"];
        assert_eq!(data["objects"], json!(2));
        assert_eq!(data["hazardous"], json!(1));
        assert_eq!(data["orbits"], json!(3));
        assert_eq!(data["dates"], json!(2));
        assert_eq!(data["first_date"], json!("2020-01-01"));
        assert_eq!(data["last_date"], json!("2020-01-02"));
    }

    #[test]
    fn test_explain_does_not_need_data() {
        let mut args = range_args();
        args.filter = vec!["is_hazardous:=:true".into(), "color:=:red".into()];

        let mut out = Vec::new();
        explain(&Config::default(), args, &mut out).unwrap();

        let data = &lines(out)[0]["data"];
        assert_eq!(data["accepted"], json!(true));
        assert_eq!(data["date_lookup"], json!("INDEX_RANGE"));
        assert_eq!(data["limit"], json!(10));
    }

    #[test]
    fn test_batch_continues_after_errors() {
        let temp_dir = TempDir::new().unwrap();
        let input = concat!(
            "{\"number\": 5, \"date\": \"2020-01-01\", \"return_object\": \"Path\"}\n",
            "not json\n",
            "{\"number\": 5, \"date\": \"2020-13-01\"}\n",
            "{\"start_date\": \"2020-01-01\", \"end_date\": \"2020-01-02\"}\n",
        );

        let mut out = Vec::new();
        batch(&source(&temp_dir), input.as_bytes(), &mut out).unwrap();

        let responses = lines(out);
        assert_eq!(responses.len(), 4);
        assert_eq!(responses[0]["data"]["kind"], json!("Path"));
        assert_eq!(responses[0]["data"]["count"], json!(3));
        assert_eq!(responses[1]["code"], json!("NEO_CLI_JSON_ERROR"));
        assert_eq!(responses[2]["code"], json!("NEO_QUERY_INVALID_DATE"));
        assert_eq!(responses[3]["data"]["count"], json!(2));
    }
}
