//! Case table mapping
//!
//! Stored in `case_record`; every reference column is a foreign key, so a
//! dangling reference is rejected by the database.

use sqlx::{FromRow, Postgres, QueryBuilder};

use core_kernel::{CaseId, ClaimId, EntityId, IncidentId, InsuredId, PolicyId, VehicleId};
use domain_claims::{Case, CasePatch, NewCase};

use super::{assign, Assignments, PgTable};

/// Database row for a case
#[derive(Debug, Clone, Copy, FromRow)]
pub struct CaseRow {
    pub id: i64,
    pub insured_id: Option<i64>,
    pub policy_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub incident_id: Option<i64>,
    pub claim_id: Option<i64>,
}

impl From<CaseRow> for Case {
    fn from(row: CaseRow) -> Self {
        Self {
            id: CaseId::from_raw(row.id),
            insured_id: row.insured_id.map(InsuredId::from_raw),
            policy_id: row.policy_id.map(PolicyId::from_raw),
            vehicle_id: row.vehicle_id.map(VehicleId::from_raw),
            incident_id: row.incident_id.map(IncidentId::from_raw),
            claim_id: row.claim_id.map(ClaimId::from_raw),
        }
    }
}

fn raw<I: EntityId>(id: Option<I>) -> Option<i64> {
    id.map(|id| id.raw())
}

impl PgTable for Case {
    type Row = CaseRow;

    const TABLE: &'static str = "case_record";
    const COLUMNS: &'static str = "id, insured_id, policy_id, vehicle_id, incident_id, claim_id";

    fn push_insert(fields: &NewCase, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push("(insured_id, policy_id, vehicle_id, incident_id, claim_id) VALUES (");
        builder
            .separated(", ")
            .push_bind(raw(fields.insured_id))
            .push_bind(raw(fields.policy_id))
            .push_bind(raw(fields.vehicle_id))
            .push_bind(raw(fields.incident_id))
            .push_bind(raw(fields.claim_id))
            .push_unseparated(")");
    }

    fn push_patch(patch: &CasePatch, set: &mut Assignments<'_, '_>) -> usize {
        let mut assigned = 0;
        assign(set, "insured_id", raw(patch.insured_id), &mut assigned);
        assign(set, "policy_id", raw(patch.policy_id), &mut assigned);
        assign(set, "vehicle_id", raw(patch.vehicle_id), &mut assigned);
        assign(set, "incident_id", raw(patch.incident_id), &mut assigned);
        assign(set, "claim_id", raw(patch.claim_id), &mut assigned);
        assigned
    }
}
