//! Claim amounts and fraud flag

use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use crate::entity::{Entity, NoFilter};

/// The amounts claimed for one case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub total_claim_amount: Option<i64>,
    pub injury_claim: Option<i64>,
    pub property_claim: Option<i64>,
    pub vehicle_claim: Option<i64>,
    pub fraud_reported: Option<bool>,
}

/// Field set for creating a claim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClaim {
    pub total_claim_amount: Option<i64>,
    pub injury_claim: Option<i64>,
    pub property_claim: Option<i64>,
    pub vehicle_claim: Option<i64>,
    pub fraud_reported: Option<bool>,
}

/// Partial update for a claim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimPatch {
    pub total_claim_amount: Option<i64>,
    pub injury_claim: Option<i64>,
    pub property_claim: Option<i64>,
    pub vehicle_claim: Option<i64>,
    pub fraud_reported: Option<bool>,
}

impl Claim {
    /// Sum of the injury, property and vehicle components
    pub fn components_sum(&self) -> i128 {
        [self.injury_claim, self.property_claim, self.vehicle_claim]
            .into_iter()
            .map(|amount| i128::from(amount.unwrap_or(0)))
            .sum()
    }

    /// Fraud flag, an unset flag reading as not reported
    pub fn is_fraud_reported(&self) -> bool {
        self.fraud_reported.unwrap_or(false)
    }
}

impl Entity for Claim {
    type Id = ClaimId;
    type Fields = NewClaim;
    type Patch = ClaimPatch;
    type Filter = NoFilter;

    const NAME: &'static str = "Claim";

    fn id(&self) -> ClaimId {
        self.id
    }

    fn from_fields(id: ClaimId, fields: NewClaim) -> Self {
        Self {
            id,
            total_claim_amount: fields.total_claim_amount,
            injury_claim: fields.injury_claim,
            property_claim: fields.property_claim,
            vehicle_claim: fields.vehicle_claim,
            fraud_reported: fields.fraud_reported,
        }
    }

    fn apply_patch(&mut self, patch: ClaimPatch) {
        if patch.total_claim_amount.is_some() {
            self.total_claim_amount = patch.total_claim_amount;
        }
        if patch.injury_claim.is_some() {
            self.injury_claim = patch.injury_claim;
        }
        if patch.property_claim.is_some() {
            self.property_claim = patch.property_claim;
        }
        if patch.vehicle_claim.is_some() {
            self.vehicle_claim = patch.vehicle_claim;
        }
        if patch.fraud_reported.is_some() {
            self.fraud_reported = patch.fraud_reported;
        }
    }

    fn matches(&self, _filter: &NoFilter) -> bool {
        true
    }
}
