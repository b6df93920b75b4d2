//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL implementation of the claims storage
//! ports, using SQLx.
//!
//! # Architecture
//!
//! ```text
//! adapters::PostgresClaimsStore      port impls, error translation
//!            │
//!            ▼
//! repositories::{insert, update, ...} generic queries over PgTable
//!            │
//!            ▼
//! repositories::{insured, policy, ...} per-table row types and SQL
//! ```
//!
//! The schema lives in `migrations/` at the workspace root and is applied by
//! [`run_migrations`].
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, PostgresClaimsStore, create_pool, run_migrations};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/insurance")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresClaimsStore::new(pool);
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::{PostgresClaimsStore, PostgresRowScope};
pub use error::DatabaseError;
pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::{PgKeyed, PgTable};
