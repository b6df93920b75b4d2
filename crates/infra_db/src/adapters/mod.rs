//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimsStore;
//! use domain_claims::{ClaimsService, EntityStore, Policy};
//!
//! let store = PostgresClaimsStore::new(pool);
//! let policy = EntityStore::<Policy>::get(&store, policy_id).await?;
//! ```

pub mod claims;

pub use claims::{PostgresClaimsStore, PostgresRowScope};
