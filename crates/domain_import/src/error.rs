//! Import errors
//!
//! Field and row errors are row-scoped: the orchestrator turns them into a
//! message in the report and moves on. Only `ImportError` ends an import.

use std::path::PathBuf;

use thiserror::Error;

use core_kernel::PortError;

/// A cell that could not be normalized to its target type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("invalid date '{raw}' in column {column} (expected YYYY-MM-DD)")]
    MalformedDate { column: &'static str, raw: String },

    #[error("invalid number '{raw}' in column {column}")]
    MalformedNumber { column: &'static str, raw: String },

    #[error("missing required value in column {column}")]
    MissingRequired { column: &'static str },
}

impl FieldError {
    /// The source column the error was raised for
    pub fn column(&self) -> &'static str {
        match self {
            FieldError::MalformedDate { column, .. }
            | FieldError::MalformedNumber { column, .. }
            | FieldError::MissingRequired { column } => column,
        }
    }
}

/// Failure of a single source row
#[derive(Debug, Error)]
pub enum RowError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Store(#[from] PortError),

    #[error("unreadable record: {message}")]
    Source { message: String },
}

impl From<csv::Error> for RowError {
    fn from(err: csv::Error) -> Self {
        RowError::Source {
            message: err.to_string(),
        }
    }
}

/// Failure that ends an import before any row is processed
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read source {path}: {source}")]
    FatalSource {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
