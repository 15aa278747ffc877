//! CLI argument definitions using clap
//!
//! Commands:
//! - neoquery query   [--data <path>] [--config <path>] <query options>
//! - neoquery explain [--config <path>] <query options>
//! - neoquery batch   [--data <path>] [--config <path>]
//! - neoquery stats   [--data <path>] [--config <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::planner::QueryParams;

/// neoquery - query near-Earth-object close approaches
#[derive(Parser, Debug)]
#[command(name = "neoquery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the catalog and settings come from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Data file (.csv, .json, .jsonl); overrides `data_file` in the config
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Query options shared by `query` and `explain`
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Maximum number of results (defaults to `default_number` from the config)
    #[arg(short, long)]
    pub number: Option<usize>,

    /// Exact close-approach date, YYYY-MM-DD
    #[arg(short, long, conflicts_with_all = ["start_date", "end_date"])]
    pub date: Option<String>,

    /// Range start, YYYY-MM-DD (inclusive)
    #[arg(long, requires = "end_date")]
    pub start_date: Option<String>,

    /// Range end, YYYY-MM-DD (inclusive)
    #[arg(long, requires = "start_date")]
    pub end_date: Option<String>,

    /// Filter as field:operator:value; repeatable, applied in order
    #[arg(short, long = "filter")]
    pub filter: Vec<String>,

    /// Result kind: NEO or Path
    #[arg(short, long, default_value = "NEO")]
    pub return_object: String,
}

impl QueryArgs {
    /// Converts the options into raw query parameters
    pub fn into_params(self, default_number: usize) -> QueryParams {
        QueryParams {
            number: self.number.unwrap_or(default_number),
            date: self.date,
            start_date: self.start_date,
            end_date: self.end_date,
            filter: self.filter,
            return_object: self.return_object,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one query and print the results
    Query {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Show how a query is normalized, without loading data
    Explain {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Load once, then answer one JSON query per stdin line
    Batch {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print catalog statistics
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::try_parse_from([
            "neoquery",
            "query",
            "--data",
            "neos.csv",
            "--start-date",
            "2020-01-01",
            "--end-date",
            "2020-01-31",
            "-f",
            "distance:>=:10000",
            "--filter",
            "is_hazardous:=:True",
            "--return-object",
            "Path",
        ])
        .unwrap();

        match cli.command {
            Command::Query { source, query } => {
                assert_eq!(source.data, Some(PathBuf::from("neos.csv")));
                let params = query.into_params(10);
                assert_eq!(params.number, 10);
                assert_eq!(params.filter.len(), 2);
                assert_eq!(params.return_object, "Path");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_date_conflicts_with_range() {
        let result = Cli::try_parse_from([
            "neoquery",
            "explain",
            "--date",
            "2020-01-01",
            "--start-date",
            "2020-01-01",
            "--end-date",
            "2020-01-02",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_range_needs_both_bounds() {
        let result = Cli::try_parse_from(["neoquery", "explain", "--start-date", "2020-01-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
