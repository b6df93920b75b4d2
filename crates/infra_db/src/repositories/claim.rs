//! Claim table mapping

use sqlx::{FromRow, Postgres, QueryBuilder};

use core_kernel::{ClaimId, EntityId};
use domain_claims::{Claim, ClaimPatch, NewClaim};

use super::{assign, Assignments, PgTable};

/// Database row for a claim
#[derive(Debug, Clone, FromRow)]
pub struct ClaimRow {
    pub id: i64,
    pub total_claim_amount: Option<i64>,
    pub injury_claim: Option<i64>,
    pub property_claim: Option<i64>,
    pub vehicle_claim: Option<i64>,
    pub fraud_reported: Option<bool>,
}

impl From<ClaimRow> for Claim {
    fn from(row: ClaimRow) -> Self {
        Self {
            id: ClaimId::from_raw(row.id),
            total_claim_amount: row.total_claim_amount,
            injury_claim: row.injury_claim,
            property_claim: row.property_claim,
            vehicle_claim: row.vehicle_claim,
            fraud_reported: row.fraud_reported,
        }
    }
}

impl PgTable for Claim {
    type Row = ClaimRow;

    const TABLE: &'static str = "claim";
    const COLUMNS: &'static str =
        "id, total_claim_amount, injury_claim, property_claim, vehicle_claim, fraud_reported";

    fn push_insert(fields: &NewClaim, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(
            "(total_claim_amount, injury_claim, property_claim, vehicle_claim, fraud_reported) VALUES (",
        );
        builder
            .separated(", ")
            .push_bind(fields.total_claim_amount)
            .push_bind(fields.injury_claim)
            .push_bind(fields.property_claim)
            .push_bind(fields.vehicle_claim)
            .push_bind(fields.fraud_reported)
            .push_unseparated(")");
    }

    fn push_patch(patch: &ClaimPatch, set: &mut Assignments<'_, '_>) -> usize {
        let mut assigned = 0;
        assign(set, "total_claim_amount", patch.total_claim_amount, &mut assigned);
        assign(set, "injury_claim", patch.injury_claim, &mut assigned);
        assign(set, "property_claim", patch.property_claim, &mut assigned);
        assign(set, "vehicle_claim", patch.vehicle_claim, &mut assigned);
        assign(set, "fraud_reported", patch.fraud_reported, &mut assigned);
        assigned
    }
}
