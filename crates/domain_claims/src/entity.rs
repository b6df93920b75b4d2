//! Shared shape of stored records
//!
//! Each record kind names its identifier, the field set it is created from,
//! the partial-update set it accepts, and the filter its list operation
//! understands. Storage adapters and the import resolver are written once
//! against these traits instead of once per record kind.

use std::fmt;

use core_kernel::EntityId;

/// A record kind held in storage
pub trait Entity: Clone + fmt::Debug + Send + Sync + 'static {
    /// Identifier assigned by storage on insert
    type Id: EntityId;
    /// Everything except the identity
    type Fields: Clone + fmt::Debug + Send + Sync + 'static;
    /// Partial update: `None` leaves the stored value unchanged
    type Patch: Clone + fmt::Debug + Default + Send + Sync + 'static;
    /// List filter understood by this record kind
    type Filter: Clone + fmt::Debug + Default + Send + Sync + 'static;

    /// Human readable record name used in errors and logs
    const NAME: &'static str;

    /// Returns the storage identity
    fn id(&self) -> Self::Id;

    /// Builds the stored record from a freshly assigned identity
    fn from_fields(id: Self::Id, fields: Self::Fields) -> Self;

    /// Overwrites only the fields supplied in the patch
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Returns true if the record passes the list filter
    fn matches(&self, filter: &Self::Filter) -> bool;
}

/// A record kind that is shared between cases and looked up by key
///
/// Two field sets with equal keys resolve to the same stored record. Key
/// components compare by exact equality, and a missing component only equals
/// another missing component.
pub trait Deduplicated: Entity {
    /// The matching key
    type Key: Clone + fmt::Debug + PartialEq + Send + Sync + 'static;

    /// Whether storage itself rejects a second record with the same key
    const UNIQUE_KEY: bool = false;

    /// Key of a stored record
    fn key(&self) -> Self::Key;

    /// Key a record created from these fields would have
    fn key_of(fields: &Self::Fields) -> Self::Key;
}

/// Filter for record kinds whose lists are never filtered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFilter;
