//! Import report

use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// Records created while importing, per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CreatedCounts {
    pub insureds: u64,
    pub policies: u64,
    pub vehicles: u64,
    pub incidents: u64,
    pub claims: u64,
    pub cases: u64,
}

/// Summary of a completed import
///
/// Rows that failed are not counted in `rows_processed`; each contributes
/// one message to `errors`, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub rows_processed: u64,
    pub insureds_created: u64,
    pub policies_created: u64,
    pub vehicles_created: u64,
    pub incidents_created: u64,
    pub claims_created: u64,
    pub cases_created: u64,
    pub errors: Vec<String>,
}

impl ImportReport {
    pub(crate) fn record_created(&mut self, counts: CreatedCounts) {
        self.insureds_created += counts.insureds;
        self.policies_created += counts.policies;
        self.vehicles_created += counts.vehicles;
        self.incidents_created += counts.incidents;
        self.claims_created += counts.claims;
        self.cases_created += counts.cases;
    }

    pub(crate) fn record_error(&mut self, row_number: usize, detail: impl std::fmt::Display) {
        self.errors.push(format!("Error processing row {}: {}", row_number, detail));
    }

    /// True if every row was imported
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Report of an import that could not start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatalReport {
    pub error: String,
    pub rows_processed: u64,
}

impl From<&ImportError> for FatalReport {
    fn from(err: &ImportError) -> Self {
        Self {
            error: err.to_string(),
            rows_processed: 0,
        }
    }
}

/// What the import entry point returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportOutcome {
    Completed(ImportReport),
    Fatal(FatalReport),
}

impl ImportOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ImportOutcome::Fatal(_))
    }

    /// The report of a completed import
    pub fn report(&self) -> Option<&ImportReport> {
        match self {
            ImportOutcome::Completed(report) => Some(report),
            ImportOutcome::Fatal(_) => None,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
