//! Import configuration

use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use domain_import::RowMode;
use serde::Deserialize;

use crate::cli::Args;

/// Import configuration
///
/// Read from `IMPORT_*` environment variables; command line flags take
/// precedence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportConfig {
    /// Database URL
    pub database_url: String,
    /// CSV file to import
    pub source_path: PathBuf,
    /// Treatment of a failing row's writes
    pub row_mode: RowMode,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Pool size
    pub max_connections: u32,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/insurance".to_string(),
            source_path: PathBuf::from("data/insurance_claims_clean.csv"),
            row_mode: RowMode::Atomic,
            log_level: "info".to_string(),
            log_json: false,
            max_connections: 10,
        }
    }
}

impl ImportConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix("IMPORT"))
    }

    fn load(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("database_url", defaults.database_url)?
            .set_default("source_path", defaults.source_path.to_string_lossy().into_owned())?
            .set_default("row_mode", defaults.row_mode.to_string())?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?
            .set_default("max_connections", i64::from(defaults.max_connections))?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Applies the values given on the command line
    pub fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(source) = &args.source {
            self.source_path = source.clone();
        }
        if let Some(url) = &args.database_url {
            self.database_url = url.clone();
        }
        if let Some(mode) = args.row_mode {
            self.row_mode = mode;
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        self.log_json |= args.log_json;
        self
    }
}
