//! PostgreSQL Claims Adapter
//!
//! Implements the claims storage ports on PostgreSQL.
//!
//! # Overview
//!
//! - [`PostgresClaimsStore`] runs every operation on the pool; each
//!   statement commits on its own.
//! - [`PostgresRowScope`] is the unit of work handed out by
//!   [`UnitOfWork::begin`]: every operation runs inside one open
//!   transaction, which the store later commits or rolls back.
//!
//! Both are written once against the `PgTable` mapping, for all record
//! kinds.
//!
//! # Error Handling
//!
//! Database errors are translated to `PortError` variants:
//! - unique violation -> `PortError::Conflict`
//! - foreign key violation -> `PortError::ReferenceViolation`
//! - connection and pool errors -> `PortError::Connection`
//! - other errors -> `PortError::Internal`

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, Page, PortError};
use domain_claims::{Entity, EntityStore, KeyedStore, UnitOfWork};

use crate::error::DatabaseError;
use crate::repositories::{self, PgKeyed, PgTable};

/// PostgreSQL-backed implementation of the claims storage ports
#[derive(Debug, Clone)]
pub struct PostgresClaimsStore {
    pool: PgPool,
}

impl PostgresClaimsStore {
    /// Creates a new store over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl DomainPort for PostgresClaimsStore {}

#[async_trait]
impl<E: PgTable> EntityStore<E> for PostgresClaimsStore {
    #[instrument(skip(self, fields), fields(table = E::TABLE))]
    async fn insert(&self, fields: E::Fields) -> Result<E, PortError> {
        let record = repositories::insert::<E, _>(&self.pool, &fields).await?;
        debug!(id = %record.id(), "Inserted record");
        Ok(record)
    }

    #[instrument(skip(self), fields(table = E::TABLE))]
    async fn get(&self, id: E::Id) -> Result<Option<E>, PortError> {
        Ok(repositories::find_by_id::<E, _>(&self.pool, id).await?)
    }

    #[instrument(skip(self, patch), fields(table = E::TABLE))]
    async fn update(&self, id: E::Id, patch: E::Patch) -> Result<Option<E>, PortError> {
        Ok(repositories::update::<E, _>(&self.pool, id, &patch).await?)
    }

    #[instrument(skip(self, filter), fields(table = E::TABLE))]
    async fn list(&self, filter: &E::Filter, page: Page) -> Result<Vec<E>, PortError> {
        Ok(repositories::list::<E, _>(&self.pool, filter, page).await?)
    }

    #[instrument(skip(self, filter), fields(table = E::TABLE))]
    async fn count(&self, filter: &E::Filter) -> Result<u64, PortError> {
        Ok(repositories::count::<E, _>(&self.pool, filter).await?)
    }
}

#[async_trait]
impl<E: PgKeyed> KeyedStore<E> for PostgresClaimsStore {
    #[instrument(skip(self, key), fields(table = E::TABLE))]
    async fn find_by_key(&self, key: &E::Key) -> Result<Option<E>, PortError> {
        Ok(repositories::find_by_key::<E, _>(&self.pool, key).await?)
    }
}

#[async_trait]
impl UnitOfWork for PostgresClaimsStore {
    type Scope = PostgresRowScope;

    async fn begin(&self) -> Result<PostgresRowScope, PortError> {
        let tx = self.pool.begin().await.map_err(DatabaseError::from)?;
        Ok(PostgresRowScope {
            tx: Mutex::new(Some(tx)),
        })
    }

    async fn commit(&self, scope: PostgresRowScope) -> Result<(), PortError> {
        if let Some(tx) = scope.tx.into_inner() {
            tx.commit()
                .await
                .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        }
        Ok(())
    }

    async fn rollback(&self, scope: PostgresRowScope) -> Result<(), PortError> {
        if let Some(tx) = scope.tx.into_inner() {
            tx.rollback()
                .await
                .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        }
        Ok(())
    }
}

/// Claims store view bound to one open transaction
///
/// Reads through the scope see its own uncommitted writes. Dropping a scope
/// without committing it rolls the transaction back.
#[derive(Debug)]
pub struct PostgresRowScope {
    tx: Mutex<Option<Transaction<'static, Postgres>>>,
}

fn scope_closed() -> PortError {
    PortError::internal("transaction scope already finished")
}

impl DomainPort for PostgresRowScope {}

#[async_trait]
impl<E: PgTable> EntityStore<E> for PostgresRowScope {
    async fn insert(&self, fields: E::Fields) -> Result<E, PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(scope_closed)?;
        Ok(repositories::insert::<E, _>(&mut **tx, &fields).await?)
    }

    async fn get(&self, id: E::Id) -> Result<Option<E>, PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(scope_closed)?;
        Ok(repositories::find_by_id::<E, _>(&mut **tx, id).await?)
    }

    async fn update(&self, id: E::Id, patch: E::Patch) -> Result<Option<E>, PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(scope_closed)?;
        Ok(repositories::update::<E, _>(&mut **tx, id, &patch).await?)
    }

    async fn list(&self, filter: &E::Filter, page: Page) -> Result<Vec<E>, PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(scope_closed)?;
        Ok(repositories::list::<E, _>(&mut **tx, filter, page).await?)
    }

    async fn count(&self, filter: &E::Filter) -> Result<u64, PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(scope_closed)?;
        Ok(repositories::count::<E, _>(&mut **tx, filter).await?)
    }
}

#[async_trait]
impl<E: PgKeyed> KeyedStore<E> for PostgresRowScope {
    async fn find_by_key(&self, key: &E::Key) -> Result<Option<E>, PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(scope_closed)?;
        Ok(repositories::find_by_key::<E, _>(&mut **tx, key).await?)
    }
}
