//! CLI module for neoquery
//!
//! Provides command-line interface for:
//! - query: One-shot query execution
//! - explain: Show the normalized request
//! - batch: Load once, answer JSON queries from stdin
//! - stats: Catalog statistics

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, QueryArgs, SourceArgs};
pub use commands::{batch, explain, query, run, run_command, stats};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::{read_requests, write_error, write_response};
