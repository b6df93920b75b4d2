//! Claims Import Command
//!
//! Loads a claims CSV file into PostgreSQL. The `claims-import` binary is a
//! thin wrapper over [`run`].
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_cli::{config::ImportConfig, run};
//!
//! let config = ImportConfig::from_env()?;
//! let outcome = run(&config).await?;
//! ```

pub mod cli;
pub mod config;
pub mod summary;

use std::sync::Arc;

use anyhow::Context;
use domain_import::{ImportOutcome, Importer};
use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresClaimsStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ImportConfig;

/// Initializes the tracing subscriber
///
/// `RUST_LOG` wins over `log_level`; an unparsable level falls back to
/// `info`.
pub fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Connects, migrates the schema and imports the configured source
///
/// Connection and migration failures are errors; everything that happens
/// once the import has started is reported in the outcome.
pub async fn run(config: &ImportConfig) -> anyhow::Result<ImportOutcome> {
    let pool = create_pool(
        DatabaseConfig::new(config.database_url.clone()).max_connections(config.max_connections),
    )
    .await
    .context("connecting to the claims database")?;

    run_migrations(&pool)
        .await
        .context("applying database migrations")?;

    let store = Arc::new(PostgresClaimsStore::new(pool));
    let outcome = Importer::new(store)
        .with_mode(config.row_mode)
        .import_csv(&config.source_path)
        .await;

    Ok(outcome)
}
