//! Claims domain service
//!
//! `ClaimsService` is the surface callers outside the import use to read and
//! write records directly. It adds the checks storage alone does not give a
//! clean answer for: a duplicate policy number is reported as such before
//! anything is written, and a case may only reference records that exist.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::{CaseId, ClaimId, InsuredId, Page, PolicyId, PortError};

use crate::case::{Case, CaseDetail, CasePatch, NewCase};
use crate::claim::Claim;
use crate::entity::{Entity, NoFilter};
use crate::error::ClaimsError;
use crate::incident::Incident;
use crate::insured::Insured;
use crate::policy::{CoverageLevel, NewPolicy, Policy, PolicyFilter, PolicyPatch};
use crate::ports::{ClaimsStore, EntityStore, KeyedStore};
use crate::vehicle::Vehicle;

/// Claims are scanned in pages of this size when computing statistics
const STATS_PAGE_SIZE: u64 = 500;

/// Totals over the whole store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsStats {
    pub total_insureds: u64,
    pub total_policies: u64,
    pub total_vehicles: u64,
    pub total_incidents: u64,
    pub total_claims: u64,
    pub total_cases: u64,
    /// Claims with the fraud flag set
    pub fraud_claims: u64,
    /// Sum of total claim amounts, unset amounts counting as 0
    pub total_claim_amount: i128,
}

macro_rules! readers {
    ($entity:ty, $get:ident, $list:ident, $count:ident) => {
        pub async fn $get(
            &self,
            id: <$entity as Entity>::Id,
        ) -> Result<Option<$entity>, ClaimsError> {
            self.get::<$entity>(id).await
        }

        pub async fn $list(
            &self,
            filter: &<$entity as Entity>::Filter,
            page: Page,
        ) -> Result<Vec<$entity>, ClaimsError> {
            self.list::<$entity>(filter, page).await
        }

        pub async fn $count(
            &self,
            filter: &<$entity as Entity>::Filter,
        ) -> Result<u64, ClaimsError> {
            self.count::<$entity>(filter).await
        }
    };
}

macro_rules! writers {
    ($entity:ty, $create:ident, $update:ident) => {
        pub async fn $create(
            &self,
            fields: <$entity as Entity>::Fields,
        ) -> Result<$entity, ClaimsError> {
            let created = EntityStore::<$entity>::insert(self.store.as_ref(), fields).await?;
            debug!(id = %created.id(), "{} created", <$entity as Entity>::NAME);
            Ok(created)
        }

        pub async fn $update(
            &self,
            id: <$entity as Entity>::Id,
            patch: <$entity as Entity>::Patch,
        ) -> Result<Option<$entity>, ClaimsError> {
            Ok(EntityStore::<$entity>::update(self.store.as_ref(), id, patch).await?)
        }
    };
}

/// Direct record operations over a claims store
pub struct ClaimsService<S: ClaimsStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ClaimsStore + ?Sized> Clone for ClaimsService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ClaimsStore + ?Sized> ClaimsService<S> {
    /// Creates a service over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        self.store.as_ref()
    }

    /// Reads any record kind by id
    pub async fn get<E: Entity>(&self, id: E::Id) -> Result<Option<E>, ClaimsError>
    where
        S: EntityStore<E>,
    {
        Ok(EntityStore::<E>::get(self.store.as_ref(), id).await?)
    }

    /// Lists any record kind in insertion order
    pub async fn list<E: Entity>(&self, filter: &E::Filter, page: Page) -> Result<Vec<E>, ClaimsError>
    where
        S: EntityStore<E>,
    {
        Ok(EntityStore::<E>::list(self.store.as_ref(), filter, page).await?)
    }

    /// Counts any record kind
    pub async fn count<E: Entity>(&self, filter: &E::Filter) -> Result<u64, ClaimsError>
    where
        S: EntityStore<E>,
    {
        Ok(EntityStore::<E>::count(self.store.as_ref(), filter).await?)
    }

    readers!(Insured, get_insured, list_insureds, count_insureds);
    readers!(Policy, get_policy, list_policies, count_policies);
    readers!(Vehicle, get_vehicle, list_vehicles, count_vehicles);
    readers!(Incident, get_incident, list_incidents, count_incidents);
    readers!(Claim, get_claim, list_claims, count_claims);
    readers!(Case, get_case, list_cases, count_cases);

    writers!(Insured, create_insured, update_insured);
    writers!(Vehicle, create_vehicle, update_vehicle);
    writers!(Incident, create_incident, update_incident);
    writers!(Claim, create_claim, update_claim);

    /// Creates a policy
    ///
    /// # Errors
    ///
    /// `DuplicateKey` if a policy with the same number exists. Nothing is
    /// written in that case.
    #[instrument(skip(self, policy), fields(policy_number = policy.policy_number))]
    pub async fn create_policy(&self, policy: NewPolicy) -> Result<Policy, ClaimsError> {
        let number = policy.policy_number;
        self.ensure_policy_number_free(number, None).await?;
        let policy = EntityStore::<Policy>::insert(self.store.as_ref(), policy)
            .await
            .map_err(|e| Self::policy_conflict(e, Some(number)))?;
        debug!(id = %policy.id, "Policy created");
        Ok(policy)
    }

    /// Partially updates a policy
    ///
    /// Changing the policy number to one held by another policy is a
    /// `DuplicateKey`.
    pub async fn update_policy(
        &self,
        id: PolicyId,
        patch: PolicyPatch,
    ) -> Result<Option<Policy>, ClaimsError> {
        if let Some(number) = patch.policy_number {
            self.ensure_policy_number_free(number, Some(id)).await?;
        }
        let number = patch.policy_number;
        EntityStore::<Policy>::update(self.store.as_ref(), id, patch)
            .await
            .map_err(|e| Self::policy_conflict(e, number))
    }

    /// Creates a case
    ///
    /// Every supplied reference must point at an existing record; the first
    /// one that does not is reported as `ReferenceNotFound` and nothing is
    /// written.
    #[instrument(skip(self))]
    pub async fn create_case(&self, fields: NewCase) -> Result<Case, ClaimsError> {
        self.check_case_references(&fields).await?;
        let case = EntityStore::<Case>::insert(self.store.as_ref(), fields).await?;
        debug!(id = %case.id, "Case created");
        Ok(case)
    }

    /// Partially updates a case, checking the references it supplies first
    pub async fn update_case(&self, id: CaseId, patch: CasePatch) -> Result<Option<Case>, ClaimsError> {
        self.check_case_references(&NewCase::from(patch)).await?;
        Ok(EntityStore::<Case>::update(self.store.as_ref(), id, patch).await?)
    }

    /// A case with every record it references resolved
    pub async fn get_case_detail(&self, id: CaseId) -> Result<Option<CaseDetail>, ClaimsError> {
        let Some(case) = self.get_case(id).await? else {
            return Ok(None);
        };

        let insured = match case.insured_id {
            Some(id) => self.get_insured(id).await?,
            None => None,
        };
        let policy = match case.policy_id {
            Some(id) => self.get_policy(id).await?,
            None => None,
        };
        let vehicle = match case.vehicle_id {
            Some(id) => self.get_vehicle(id).await?,
            None => None,
        };
        let incident = match case.incident_id {
            Some(id) => self.get_incident(id).await?,
            None => None,
        };
        let claim = match case.claim_id {
            Some(id) => self.get_claim(id).await?,
            None => None,
        };

        Ok(Some(CaseDetail {
            case,
            insured,
            policy,
            vehicle,
            incident,
            claim,
        }))
    }

    /// Coverage band of a policy; `None` if the policy does not exist
    pub async fn coverage_level(&self, policy_id: PolicyId) -> Result<Option<CoverageLevel>, ClaimsError> {
        Ok(self.get_policy(policy_id).await?.map(|p| p.coverage_level()))
    }

    /// Fraud flag of a claim; `None` if the claim does not exist
    pub async fn fraud_check(&self, claim_id: ClaimId) -> Result<Option<bool>, ClaimsError> {
        Ok(self.get_claim(claim_id).await?.map(|c| c.is_fraud_reported()))
    }

    /// Capital gains less capital loss of an insured
    pub async fn financial_score(&self, insured_id: InsuredId) -> Result<Option<i128>, ClaimsError> {
        Ok(self.get_insured(insured_id).await?.map(|i| i.financial_score()))
    }

    /// Totals over the whole store
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<ClaimsStats, ClaimsError> {
        let mut stats = ClaimsStats {
            total_insureds: self.count_insureds(&NoFilter).await?,
            total_policies: self.count_policies(&PolicyFilter::default()).await?,
            total_vehicles: self.count_vehicles(&NoFilter).await?,
            total_incidents: self.count_incidents(&NoFilter).await?,
            total_claims: self.count_claims(&NoFilter).await?,
            total_cases: self.count_cases(&NoFilter).await?,
            ..ClaimsStats::default()
        };

        let mut page = Page::first(STATS_PAGE_SIZE);
        loop {
            let claims = self.list_claims(&NoFilter, page).await?;
            for claim in &claims {
                if claim.is_fraud_reported() {
                    stats.fraud_claims += 1;
                }
                stats.total_claim_amount += i128::from(claim.total_claim_amount.unwrap_or(0));
            }
            if (claims.len() as u64) < page.limit {
                break;
            }
            page = page.next();
        }

        Ok(stats)
    }

    async fn ensure_policy_number_free(
        &self,
        policy_number: i64,
        except: Option<PolicyId>,
    ) -> Result<(), ClaimsError> {
        let existing = KeyedStore::<Policy>::find_by_key(self.store.as_ref(), &policy_number).await?;
        match existing {
            Some(policy) if Some(policy.id) != except => Err(ClaimsError::DuplicateKey {
                entity: Policy::NAME,
                field: "policy_number",
                value: policy_number.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Maps a storage-level uniqueness violation onto `DuplicateKey`
    fn policy_conflict(error: PortError, number: Option<i64>) -> ClaimsError {
        if error.is_conflict() {
            ClaimsError::DuplicateKey {
                entity: Policy::NAME,
                field: "policy_number",
                value: number.map(|n| n.to_string()).unwrap_or_default(),
            }
        } else {
            ClaimsError::Store(error)
        }
    }

    async fn check_case_references(&self, refs: &NewCase) -> Result<(), ClaimsError> {
        if let Some(id) = refs.insured_id {
            self.require::<Insured>(id).await?;
        }
        if let Some(id) = refs.policy_id {
            self.require::<Policy>(id).await?;
        }
        if let Some(id) = refs.vehicle_id {
            self.require::<Vehicle>(id).await?;
        }
        if let Some(id) = refs.incident_id {
            self.require::<Incident>(id).await?;
        }
        if let Some(id) = refs.claim_id {
            self.require::<Claim>(id).await?;
        }
        Ok(())
    }

    async fn require<E: Entity>(&self, id: E::Id) -> Result<(), ClaimsError>
    where
        S: EntityStore<E>,
    {
        match EntityStore::<E>::get(self.store.as_ref(), id).await? {
            Some(_) => Ok(()),
            None => Err(ClaimsError::ReferenceNotFound {
                entity: E::NAME,
                id: id.to_string(),
            }),
        }
    }
}
