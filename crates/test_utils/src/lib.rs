//! Test Utilities for the Claims System
//!
//! Shared fixtures and database helpers used by the integration tests.
//!
//! # Modules
//!
//! - `fixtures`: canonical source rows, record field sets and CSV files
//! - `database`: PostgreSQL testcontainer management
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::fixtures::{CsvFixture, SourceRowFixtures};
//!
//! let file = CsvFixture::write(&[SourceRowFixtures::complete(521585)])?;
//! ```

pub mod database;
pub mod fixtures;

pub use database::{TestDatabase, TestDatabaseConfig};
pub use fixtures::{CsvFixture, PolicyFixtures, SourceRowFixtures};
