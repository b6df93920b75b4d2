//! Claims Import Binary
//!
//! # Usage
//!
//! ```bash
//! # Import the default file
//! cargo run --bin claims-import
//!
//! # Import another file, keeping partial writes of failing rows
//! cargo run --bin claims-import -- data/claims.csv --row-mode best-effort
//! ```
//!
//! # Environment Variables
//!
//! * `IMPORT_DATABASE_URL` - PostgreSQL connection string
//! * `IMPORT_SOURCE_PATH` - CSV file (default: data/insurance_claims_clean.csv)
//! * `IMPORT_ROW_MODE` - atomic or best-effort (default: atomic)
//! * `IMPORT_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `IMPORT_LOG_JSON` - emit logs as JSON lines (default: false)
//! * `IMPORT_MAX_CONNECTIONS` - pool size (default: 10)
//!
//! Exits with status 1 when the source cannot be read.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use interface_cli::cli::Args;
use interface_cli::config::ImportConfig;
use interface_cli::{init_tracing, run, summary};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = ImportConfig::from_env()
        .context("reading IMPORT_* configuration")?
        .with_overrides(&args);

    init_tracing(&config.log_level, config.log_json);
    tracing::info!(
        source = %config.source_path.display(),
        row_mode = %config.row_mode,
        "Starting claims import"
    );

    if !args.json {
        print!("{}", summary::banner(&config.source_path));
    }

    let outcome = run(&config).await?;

    if args.json {
        println!("{}", outcome.to_json_pretty()?);
    } else {
        print!("{}", summary::render(&outcome));
    }

    Ok(if outcome.is_fatal() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
