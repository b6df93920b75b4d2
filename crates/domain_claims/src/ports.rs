//! Claims Storage Ports
//!
//! This module defines the storage boundary of the claims domain. The
//! import orchestrator and the claims service only ever talk to storage
//! through these traits, so the PostgreSQL adapter (infra_db) and the
//! in-memory store used by tests are interchangeable.
//!
//! # Shape
//!
//! - [`EntityStore<E>`]: insert, read by id, partial update, list and count
//!   for one record kind
//! - [`KeyedStore<E>`]: adds lookup by dedup key for shared record kinds
//! - [`ClaimsStore`]: everything the claims domain needs, for all six kinds
//! - [`UnitOfWork`]: groups writes so a caller can commit or discard them
//!   together
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::{EntityStore, Insured};
//!
//! let insured = EntityStore::<Insured>::insert(&store, fields).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, Page, PortError};

use crate::case::Case;
use crate::claim::Claim;
use crate::entity::{Deduplicated, Entity};
use crate::incident::Incident;
use crate::insured::Insured;
use crate::policy::Policy;
use crate::vehicle::Vehicle;

/// Storage operations for one record kind
#[async_trait]
pub trait EntityStore<E: Entity>: DomainPort {
    /// Persists a new record and assigns its identity
    async fn insert(&self, fields: E::Fields) -> Result<E, PortError>;

    /// Reads a record by identity; `None` on a miss
    async fn get(&self, id: E::Id) -> Result<Option<E>, PortError>;

    /// Overwrites the supplied fields; `None` if the record does not exist
    async fn update(&self, id: E::Id, patch: E::Patch) -> Result<Option<E>, PortError>;

    /// Lists records in insertion order
    async fn list(&self, filter: &E::Filter, page: Page) -> Result<Vec<E>, PortError>;

    /// Counts records passing the filter
    async fn count(&self, filter: &E::Filter) -> Result<u64, PortError>;
}

/// Lookup by dedup key for shared record kinds
#[async_trait]
pub trait KeyedStore<E: Deduplicated>: EntityStore<E> {
    /// Finds the stored record whose key equals `key` component by component
    async fn find_by_key(&self, key: &E::Key) -> Result<Option<E>, PortError>;
}

/// The complete storage boundary of the claims domain
pub trait ClaimsStore:
    KeyedStore<Insured>
    + KeyedStore<Policy>
    + KeyedStore<Vehicle>
    + EntityStore<Incident>
    + EntityStore<Claim>
    + EntityStore<Case>
{
}

impl<T> ClaimsStore for T where
    T: KeyedStore<Insured>
        + KeyedStore<Policy>
        + KeyedStore<Vehicle>
        + EntityStore<Incident>
        + EntityStore<Claim>
        + EntityStore<Case>
        + ?Sized
{
}

/// A store whose writes can be grouped and committed or discarded together
///
/// The scope is itself a full [`ClaimsStore`]; reads through the scope see
/// the writes made through it.
#[async_trait]
pub trait UnitOfWork: ClaimsStore {
    /// Store view that stages writes until commit
    type Scope: ClaimsStore;

    /// Opens a new scope
    async fn begin(&self) -> Result<Self::Scope, PortError>;

    /// Makes every write of the scope durable
    async fn commit(&self, scope: Self::Scope) -> Result<(), PortError>;

    /// Discards every write of the scope
    async fn rollback(&self, scope: Self::Scope) -> Result<(), PortError>;
}

/// In-memory implementation of the claims storage ports
///
/// Records live in plain vectors in insertion order. Identities start at 1
/// per record kind. Policy numbers are unique and case references must
/// exist, mirroring the constraints of the database schema.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use core_kernel::EntityId;
    use tokio::sync::RwLock;

    use crate::case::NewCase;
    use crate::entity::NoFilter;

    #[derive(Debug, Clone)]
    struct Table<E> {
        rows: Vec<E>,
        next_id: i64,
    }

    impl<E> Default for Table<E> {
        fn default() -> Self {
            Self {
                rows: Vec::new(),
                next_id: 1,
            }
        }
    }

    impl<E: Entity> Table<E> {
        fn insert(&mut self, fields: E::Fields) -> E {
            let id = E::Id::from_raw(self.next_id);
            self.next_id += 1;
            let record = E::from_fields(id, fields);
            self.rows.push(record.clone());
            record
        }

        fn get(&self, id: E::Id) -> Option<E> {
            self.rows.iter().find(|row| row.id() == id).cloned()
        }

        fn contains(&self, id: E::Id) -> bool {
            self.rows.iter().any(|row| row.id() == id)
        }

        fn update(&mut self, id: E::Id, patch: E::Patch) -> Option<E> {
            let row = self.rows.iter_mut().find(|row| row.id() == id)?;
            row.apply_patch(patch);
            Some(row.clone())
        }

        fn list(&self, filter: &E::Filter, page: Page) -> Vec<E> {
            self.rows
                .iter()
                .filter(|row| row.matches(filter))
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .cloned()
                .collect()
        }

        fn count(&self, filter: &E::Filter) -> u64 {
            self.rows.iter().filter(|row| row.matches(filter)).count() as u64
        }
    }

    impl<E: Deduplicated> Table<E> {
        fn find_by_key(&self, key: &E::Key) -> Option<E> {
            self.rows.iter().find(|row| &row.key() == key).cloned()
        }

        fn ensure_unique(&self, key: &E::Key, except: Option<E::Id>) -> Result<(), PortError> {
            if !E::UNIQUE_KEY {
                return Ok(());
            }
            let taken = self
                .rows
                .iter()
                .any(|row| &row.key() == key && Some(row.id()) != except);
            if taken {
                return Err(PortError::conflict(format!(
                    "{} with key {:?} already exists",
                    E::NAME,
                    key
                )));
            }
            Ok(())
        }

        fn insert_keyed(&mut self, fields: E::Fields) -> Result<E, PortError> {
            self.ensure_unique(&E::key_of(&fields), None)?;
            Ok(self.insert(fields))
        }

        fn update_keyed(&mut self, id: E::Id, patch: E::Patch) -> Result<Option<E>, PortError> {
            let Some(position) = self.rows.iter().position(|row| row.id() == id) else {
                return Ok(None);
            };
            let mut candidate = self.rows[position].clone();
            candidate.apply_patch(patch);
            self.ensure_unique(&candidate.key(), Some(id))?;
            self.rows[position] = candidate.clone();
            Ok(Some(candidate))
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Tables {
        insureds: Table<Insured>,
        policies: Table<Policy>,
        vehicles: Table<Vehicle>,
        incidents: Table<Incident>,
        claims: Table<Claim>,
        cases: Table<Case>,
    }

    impl Tables {
        fn check_case_references(&self, refs: &NewCase) -> Result<(), PortError> {
            let missing = if refs.insured_id.is_some_and(|id| !self.insureds.contains(id)) {
                Some("insured_id")
            } else if refs.policy_id.is_some_and(|id| !self.policies.contains(id)) {
                Some("policy_id")
            } else if refs.vehicle_id.is_some_and(|id| !self.vehicles.contains(id)) {
                Some("vehicle_id")
            } else if refs.incident_id.is_some_and(|id| !self.incidents.contains(id)) {
                Some("incident_id")
            } else if refs.claim_id.is_some_and(|id| !self.claims.contains(id)) {
                Some("claim_id")
            } else {
                None
            };
            match missing {
                Some(column) => Err(PortError::reference(format!(
                    "case.{} references a missing record",
                    column
                ))),
                None => Ok(()),
            }
        }
    }

    /// In-memory claims store
    #[derive(Debug, Default)]
    pub struct InMemoryClaimsStore {
        tables: RwLock<Tables>,
    }

    impl InMemoryClaimsStore {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Drops every record and restarts identities at 1
        pub async fn reset(&self) {
            *self.tables.write().await = Tables::default();
        }
    }

    impl DomainPort for InMemoryClaimsStore {}

    macro_rules! memory_store {
        (keyed $entity:ty, $table:ident) => {
            #[async_trait]
            impl EntityStore<$entity> for InMemoryClaimsStore {
                async fn insert(&self, fields: <$entity as Entity>::Fields) -> Result<$entity, PortError> {
                    self.tables.write().await.$table.insert_keyed(fields)
                }

                async fn get(&self, id: <$entity as Entity>::Id) -> Result<Option<$entity>, PortError> {
                    Ok(self.tables.read().await.$table.get(id))
                }

                async fn update(
                    &self,
                    id: <$entity as Entity>::Id,
                    patch: <$entity as Entity>::Patch,
                ) -> Result<Option<$entity>, PortError> {
                    self.tables.write().await.$table.update_keyed(id, patch)
                }

                async fn list(
                    &self,
                    filter: &<$entity as Entity>::Filter,
                    page: Page,
                ) -> Result<Vec<$entity>, PortError> {
                    Ok(self.tables.read().await.$table.list(filter, page))
                }

                async fn count(&self, filter: &<$entity as Entity>::Filter) -> Result<u64, PortError> {
                    Ok(self.tables.read().await.$table.count(filter))
                }
            }

            #[async_trait]
            impl KeyedStore<$entity> for InMemoryClaimsStore {
                async fn find_by_key(
                    &self,
                    key: &<$entity as Deduplicated>::Key,
                ) -> Result<Option<$entity>, PortError> {
                    Ok(self.tables.read().await.$table.find_by_key(key))
                }
            }
        };
        (fresh $entity:ty, $table:ident) => {
            #[async_trait]
            impl EntityStore<$entity> for InMemoryClaimsStore {
                async fn insert(&self, fields: <$entity as Entity>::Fields) -> Result<$entity, PortError> {
                    Ok(self.tables.write().await.$table.insert(fields))
                }

                async fn get(&self, id: <$entity as Entity>::Id) -> Result<Option<$entity>, PortError> {
                    Ok(self.tables.read().await.$table.get(id))
                }

                async fn update(
                    &self,
                    id: <$entity as Entity>::Id,
                    patch: <$entity as Entity>::Patch,
                ) -> Result<Option<$entity>, PortError> {
                    Ok(self.tables.write().await.$table.update(id, patch))
                }

                async fn list(
                    &self,
                    filter: &<$entity as Entity>::Filter,
                    page: Page,
                ) -> Result<Vec<$entity>, PortError> {
                    Ok(self.tables.read().await.$table.list(filter, page))
                }

                async fn count(&self, filter: &<$entity as Entity>::Filter) -> Result<u64, PortError> {
                    Ok(self.tables.read().await.$table.count(filter))
                }
            }
        };
    }

    memory_store!(keyed Insured, insureds);
    memory_store!(keyed Policy, policies);
    memory_store!(keyed Vehicle, vehicles);
    memory_store!(fresh Incident, incidents);
    memory_store!(fresh Claim, claims);

    #[async_trait]
    impl EntityStore<Case> for InMemoryClaimsStore {
        async fn insert(&self, fields: NewCase) -> Result<Case, PortError> {
            let mut tables = self.tables.write().await;
            tables.check_case_references(&fields)?;
            Ok(tables.cases.insert(fields))
        }

        async fn get(&self, id: core_kernel::CaseId) -> Result<Option<Case>, PortError> {
            Ok(self.tables.read().await.cases.get(id))
        }

        async fn update(
            &self,
            id: core_kernel::CaseId,
            patch: crate::case::CasePatch,
        ) -> Result<Option<Case>, PortError> {
            let mut tables = self.tables.write().await;
            tables.check_case_references(&NewCase::from(patch))?;
            Ok(tables.cases.update(id, patch))
        }

        async fn list(&self, filter: &NoFilter, page: Page) -> Result<Vec<Case>, PortError> {
            Ok(self.tables.read().await.cases.list(filter, page))
        }

        async fn count(&self, filter: &NoFilter) -> Result<u64, PortError> {
            Ok(self.tables.read().await.cases.count(filter))
        }
    }

    /// Scopes are snapshots of the whole store; commit swaps the snapshot
    /// back in. Only one scope may be open at a time.
    #[async_trait]
    impl UnitOfWork for InMemoryClaimsStore {
        type Scope = InMemoryClaimsStore;

        async fn begin(&self) -> Result<Self::Scope, PortError> {
            let snapshot = self.tables.read().await.clone();
            Ok(InMemoryClaimsStore {
                tables: RwLock::new(snapshot),
            })
        }

        async fn commit(&self, scope: Self::Scope) -> Result<(), PortError> {
            *self.tables.write().await = scope.tables.into_inner();
            Ok(())
        }

        async fn rollback(&self, _scope: Self::Scope) -> Result<(), PortError> {
            Ok(())
        }
    }
}
