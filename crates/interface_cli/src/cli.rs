//! Command line arguments

use std::path::PathBuf;

use clap::Parser;
use domain_import::RowMode;

/// Import a claims CSV file into the claims database
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "claims-import", version, about)]
pub struct Args {
    /// CSV file to import
    pub source: Option<PathBuf>,

    /// PostgreSQL connection string
    #[arg(long)]
    pub database_url: Option<String>,

    /// What a failing row leaves behind: atomic or best-effort
    #[arg(long)]
    pub row_mode: Option<RowMode>,

    /// Log level used when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_arguments_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let args = Args::parse_from(["claims-import"]);
        assert!(args.source.is_none());
        assert!(args.row_mode.is_none());
        assert!(!args.json);
    }

    #[test]
    fn test_invalid_row_mode() {
        let result = Args::try_parse_from(["claims-import", "--row-mode", "partial"]);
        assert!(result.is_err());
    }
}
