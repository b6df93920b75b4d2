//! Entity resolution ("get-or-create")
//!
//! Shared records (insured, policy, vehicle) are looked up by their dedup
//! key and created only on a miss. Incidents and claims are always created.
//!
//! The lookup and the insert are two separate storage calls. That is only
//! sound while rows are resolved one at a time against a store no other
//! writer is touching.

use tracing::trace;

use core_kernel::PortError;
use domain_claims::{Deduplicated, Entity, EntityStore, KeyedStore};

/// Outcome of resolving one shared record
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<E> {
    pub entity: E,
    /// True if the record was inserted by this resolution
    pub created: bool,
}

/// Returns the stored record with the same key, or inserts one built from
/// `fields`
///
/// An existing record is returned unchanged; the other fields of `fields`
/// are not merged into it.
pub async fn get_or_create<E, S>(store: &S, fields: E::Fields) -> Result<Resolution<E>, PortError>
where
    E: Deduplicated,
    S: KeyedStore<E> + ?Sized,
{
    let key = E::key_of(&fields);
    if let Some(entity) = KeyedStore::<E>::find_by_key(store, &key).await? {
        trace!(entity = E::NAME, id = %entity.id(), "Reusing existing record");
        return Ok(Resolution {
            entity,
            created: false,
        });
    }

    let entity = EntityStore::<E>::insert(store, fields).await?;
    trace!(entity = E::NAME, id = %entity.id(), "Created record");
    Ok(Resolution {
        entity,
        created: true,
    })
}

/// Inserts a record without looking for an existing one
pub async fn create_fresh<E, S>(store: &S, fields: E::Fields) -> Result<E, PortError>
where
    E: Entity,
    S: EntityStore<E> + ?Sized,
{
    EntityStore::<E>::insert(store, fields).await
}
