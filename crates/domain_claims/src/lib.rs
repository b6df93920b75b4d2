//! Claims Records Domain
//!
//! This crate defines the records of the claims system and the storage port
//! they are read and written through.
//!
//! # Record Model
//!
//! ```text
//!            ┌──────────┐
//!            │   Case   │
//!            └────┬─────┘
//!   ┌────────┬────┴───┬──────────┬────────┐
//!   ▼        ▼        ▼          ▼        ▼
//! Insured  Policy  Vehicle   Incident   Claim
//! (dedup)  (dedup) (dedup)   (fresh)    (fresh)
//! ```
//!
//! Insured, policy and vehicle records are shared between cases and are
//! identified by a dedup key. Incidents and claims are always created fresh,
//! one per case.

pub mod entity;
pub mod insured;
pub mod policy;
pub mod vehicle;
pub mod incident;
pub mod claim;
pub mod case;
pub mod ports;
pub mod service;
pub mod error;

pub use entity::{Entity, Deduplicated, NoFilter};
pub use insured::{Insured, NewInsured, InsuredPatch, InsuredKey};
pub use policy::{Policy, NewPolicy, PolicyPatch, PolicyFilter, CslLimits, CoverageLevel};
pub use vehicle::{Vehicle, NewVehicle, VehiclePatch, VehicleKey};
pub use incident::{Incident, NewIncident, IncidentPatch};
pub use claim::{Claim, NewClaim, ClaimPatch};
pub use case::{Case, NewCase, CasePatch, CaseDetail};
pub use ports::{EntityStore, KeyedStore, ClaimsStore, UnitOfWork};
pub use service::{ClaimsService, ClaimsStats};
pub use error::ClaimsError;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemoryClaimsStore;
