//! Import orchestrator
//!
//! Rows are imported strictly in source order, one at a time. For each row:
//!
//! ```text
//! Insured ─┐
//! Policy  ─┤ get-or-create
//! Vehicle ─┘
//! Incident ─┐ always new
//! Claim    ─┘
//! Case       links the five, then the row counts as processed
//! ```
//!
//! A failing row is reported and skipped; the import carries on with the
//! next one. What happens to the records a failing row already wrote
//! depends on the [`RowMode`].

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use domain_claims::{
    Case, Claim, ClaimsStore, EntityStore, Incident, Insured, NewCase, Policy, UnitOfWork, Vehicle,
};

use crate::error::RowError;
use crate::mapping;
use crate::report::{CreatedCounts, FatalReport, ImportOutcome, ImportReport};
use crate::resolver::{create_fresh, get_or_create};
use crate::source::{CsvRowSource, SourceRow};

/// How the writes of a failing row are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowMode {
    /// Each row is one unit of work; a failing row leaves nothing behind
    #[default]
    Atomic,
    /// Records written before the failure stay, and are counted
    #[serde(alias = "best-effort")]
    BestEffort,
}

impl std::str::FromStr for RowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "atomic" => Ok(RowMode::Atomic),
            "best_effort" => Ok(RowMode::BestEffort),
            other => Err(format!("unknown row mode '{}' (expected atomic or best-effort)", other)),
        }
    }
}

impl std::fmt::Display for RowMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowMode::Atomic => f.write_str("atomic"),
            RowMode::BestEffort => f.write_str("best-effort"),
        }
    }
}

/// Imports source rows into a claims store
pub struct Importer<S: UnitOfWork> {
    store: Arc<S>,
    mode: RowMode,
}

impl<S: UnitOfWork> Importer<S> {
    /// Creates an importer in atomic row mode
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            mode: RowMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: RowMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> RowMode {
        self.mode
    }

    /// Imports a CSV file
    ///
    /// A file that cannot be opened, or whose header row cannot be read,
    /// yields a fatal outcome with no rows processed.
    pub async fn import_csv(&self, path: impl AsRef<Path>) -> ImportOutcome {
        let path = path.as_ref();
        info!(path = %path.display(), "Reading CSV source");

        match CsvRowSource::open(path) {
            Ok(source) => ImportOutcome::Completed(self.import_rows(source).await),
            Err(err) => {
                error!(error = %err, "Fatal error during data loading");
                ImportOutcome::Fatal(FatalReport::from(&err))
            }
        }
    }

    /// Imports rows in order and reports the result
    ///
    /// Row numbers in error messages are 1-based positions in `rows`.
    #[instrument(skip_all, fields(import_id = %Uuid::now_v7(), mode = %self.mode))]
    pub async fn import_rows<I>(&self, rows: I) -> ImportReport
    where
        I: IntoIterator<Item = Result<SourceRow, RowError>>,
    {
        info!("Import started");
        let mut report = ImportReport::default();

        for (offset, item) in rows.into_iter().enumerate() {
            let row_number = offset + 1;
            debug!(row = row_number, "Processing row");

            let result = match item {
                Ok(row) => self.import_one(&row, &mut report).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(()) => report.rows_processed += 1,
                Err(err) => {
                    warn!(row = row_number, error = %err, "Row skipped");
                    report.record_error(row_number, err);
                }
            }
        }

        info!(
            rows_processed = report.rows_processed,
            cases_created = report.cases_created,
            errors = report.errors.len(),
            "Import finished"
        );
        report
    }

    async fn import_one(&self, row: &SourceRow, report: &mut ImportReport) -> Result<(), RowError> {
        let mut counts = CreatedCounts::default();

        match self.mode {
            RowMode::Atomic => {
                let scope = self.store.begin().await?;
                match import_row(&scope, row, &mut counts).await {
                    Ok(()) => {
                        self.store.commit(scope).await?;
                        report.record_created(counts);
                        Ok(())
                    }
                    Err(err) => {
                        if let Err(rollback_err) = self.store.rollback(scope).await {
                            warn!(error = %rollback_err, "Rollback failed");
                        }
                        Err(err)
                    }
                }
            }
            RowMode::BestEffort => {
                let result = import_row(self.store.as_ref(), row, &mut counts).await;
                report.record_created(counts);
                result
            }
        }
    }
}

/// Writes the records of one row, counting what it creates
async fn import_row<T>(store: &T, row: &SourceRow, counts: &mut CreatedCounts) -> Result<(), RowError>
where
    T: ClaimsStore + ?Sized,
{
    let insured = get_or_create::<Insured, _>(store, mapping::insured_fields(row)?).await?;
    counts.insureds += u64::from(insured.created);

    let policy = get_or_create::<Policy, _>(store, mapping::policy_fields(row)?).await?;
    counts.policies += u64::from(policy.created);

    let vehicle = get_or_create::<Vehicle, _>(store, mapping::vehicle_fields(row)?).await?;
    counts.vehicles += u64::from(vehicle.created);

    let incident = create_fresh::<Incident, _>(store, mapping::incident_fields(row)?).await?;
    counts.incidents += 1;

    let claim = create_fresh::<Claim, _>(store, mapping::claim_fields(row)?).await?;
    counts.claims += 1;

    let case = EntityStore::<Case>::insert(
        store,
        NewCase {
            insured_id: Some(insured.entity.id),
            policy_id: Some(policy.entity.id),
            vehicle_id: Some(vehicle.entity.id),
            incident_id: Some(incident.id),
            claim_id: Some(claim.id),
        },
    )
    .await?;
    counts.cases += 1;

    debug!(case_id = %case.id, "Case created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_mode_parsing() {
        assert_eq!("atomic".parse::<RowMode>(), Ok(RowMode::Atomic));
        assert_eq!("best-effort".parse::<RowMode>(), Ok(RowMode::BestEffort));
        assert_eq!("BEST_EFFORT".parse::<RowMode>(), Ok(RowMode::BestEffort));
        assert!("sometimes".parse::<RowMode>().is_err());
    }

    #[test]
    fn test_row_mode_defaults_to_atomic() {
        assert_eq!(RowMode::default(), RowMode::Atomic);
        assert_eq!(RowMode::BestEffort.to_string(), "best-effort");
    }
}
