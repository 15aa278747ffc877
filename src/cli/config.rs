//! Configuration file handling
//!
//! The config file is JSON and every field is optional:
//!
//! ```json
//! { "data_file": "data/neos.csv", "log_level": "info", "default_number": 10 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data file used when `--data` is not given
    #[serde(default)]
    pub data_file: Option<String>,

    /// Log filter directive (default "warn"); `RUST_LOG` overrides it
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Result limit used when a query does not set one (default 10)
    #[serde(default = "default_number")]
    pub default_number: usize,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_number() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            log_level: default_log_level(),
            default_number: default_number(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    /// Loads `path` if given, otherwise returns the defaults
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::Config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.default_number == 0 {
            return Err(CliError::Config("default_number must be > 0".into()));
        }

        if !observability::is_valid_level(&self.log_level) {
            return Err(CliError::Config(format!(
                "Invalid log_level: '{}'",
                self.log_level
            )));
        }

        if matches!(&self.data_file, Some(f) if f.trim().is_empty()) {
            return Err(CliError::Config("data_file must not be empty".into()));
        }

        Ok(())
    }

    /// Default data path, if configured
    pub fn data_path(&self) -> Option<PathBuf> {
        self.data_file.as_ref().map(PathBuf::from)
    }
}
