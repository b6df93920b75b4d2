//! Core Kernel - Foundational types shared by the claims records crates
//!
//! This crate provides the building blocks every other layer depends on:
//! - Integer identifiers for the six record kinds (insured, policy, vehicle,
//!   incident, claim, case)
//! - The port error taxonomy used by all storage adapters
//! - Paging parameters for list operations

pub mod identifiers;
pub mod ports;

pub use identifiers::{
    EntityId, InsuredId, PolicyId, VehicleId, IncidentId, ClaimId, CaseId,
};
pub use ports::{PortError, DomainPort, Page};
