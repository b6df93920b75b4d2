//! Claims Data Import
//!
//! Turns flat source rows (one per claim case) into the normalized claims
//! records: each row yields an insured party, a policy and a vehicle that
//! are shared between rows with the same key, a fresh incident and claim,
//! and the case linking all five.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_import::{Importer, RowMode};
//!
//! let importer = Importer::new(store).with_mode(RowMode::Atomic);
//! let outcome = importer.import_csv("data/insurance_claims_clean.csv").await;
//! ```

pub mod columns;
pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod importer;
pub mod mapping;
pub mod normalize;
pub mod report;
pub mod resolver;
pub mod source;

pub use error::{FieldError, ImportError, RowError};
pub use importer::{Importer, RowMode};
pub use normalize::Cell;
pub use report::{FatalReport, ImportOutcome, ImportReport};
pub use resolver::{create_fresh, get_or_create, Resolution};
pub use source::{CsvRowSource, SourceRow};
