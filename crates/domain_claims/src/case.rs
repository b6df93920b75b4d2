//! Case: the record linking one of each entity

use serde::{Deserialize, Serialize};

use core_kernel::{CaseId, ClaimId, IncidentId, InsuredId, PolicyId, VehicleId};
use crate::claim::Claim;
use crate::entity::{Entity, NoFilter};
use crate::incident::Incident;
use crate::insured::Insured;
use crate::policy::Policy;
use crate::vehicle::Vehicle;

/// A claim-processing unit
///
/// Every reference is optional, but a reference that is set points at a
/// record that existed when the case was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    pub insured_id: Option<InsuredId>,
    pub policy_id: Option<PolicyId>,
    pub vehicle_id: Option<VehicleId>,
    pub incident_id: Option<IncidentId>,
    pub claim_id: Option<ClaimId>,
}

/// Field set for creating a case
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCase {
    pub insured_id: Option<InsuredId>,
    pub policy_id: Option<PolicyId>,
    pub vehicle_id: Option<VehicleId>,
    pub incident_id: Option<IncidentId>,
    pub claim_id: Option<ClaimId>,
}

/// Partial update for a case: a `None` reference keeps the stored one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasePatch {
    pub insured_id: Option<InsuredId>,
    pub policy_id: Option<PolicyId>,
    pub vehicle_id: Option<VehicleId>,
    pub incident_id: Option<IncidentId>,
    pub claim_id: Option<ClaimId>,
}

impl From<CasePatch> for NewCase {
    fn from(patch: CasePatch) -> Self {
        Self {
            insured_id: patch.insured_id,
            policy_id: patch.policy_id,
            vehicle_id: patch.vehicle_id,
            incident_id: patch.incident_id,
            claim_id: patch.claim_id,
        }
    }
}

/// A case together with the records it references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDetail {
    pub case: Case,
    pub insured: Option<Insured>,
    pub policy: Option<Policy>,
    pub vehicle: Option<Vehicle>,
    pub incident: Option<Incident>,
    pub claim: Option<Claim>,
}

impl Entity for Case {
    type Id = CaseId;
    type Fields = NewCase;
    type Patch = CasePatch;
    type Filter = NoFilter;

    const NAME: &'static str = "Case";

    fn id(&self) -> CaseId {
        self.id
    }

    fn from_fields(id: CaseId, fields: NewCase) -> Self {
        Self {
            id,
            insured_id: fields.insured_id,
            policy_id: fields.policy_id,
            vehicle_id: fields.vehicle_id,
            incident_id: fields.incident_id,
            claim_id: fields.claim_id,
        }
    }

    fn apply_patch(&mut self, patch: CasePatch) {
        if patch.insured_id.is_some() {
            self.insured_id = patch.insured_id;
        }
        if patch.policy_id.is_some() {
            self.policy_id = patch.policy_id;
        }
        if patch.vehicle_id.is_some() {
            self.vehicle_id = patch.vehicle_id;
        }
        if patch.incident_id.is_some() {
            self.incident_id = patch.incident_id;
        }
        if patch.claim_id.is_some() {
            self.claim_id = patch.claim_id;
        }
    }

    fn matches(&self, _filter: &NoFilter) -> bool {
        true
    }
}
