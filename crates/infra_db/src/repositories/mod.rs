//! Table mappings and generic queries for the claims records
//!
//! Each record kind maps onto one table through [`PgTable`]: its row type,
//! its column list, and how its field sets, patches and filters turn into
//! SQL. The query functions here are written once against that trait and
//! take any executor, so the same code runs on the pool and inside a
//! transaction.
//!
//! All queries are built at runtime with `QueryBuilder`; every value is a
//! bind parameter.

use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;
use sqlx::{Encode, FromRow, PgExecutor, Postgres, QueryBuilder, Type};
use tracing::trace;

use core_kernel::{EntityId, Page};
use domain_claims::{Deduplicated, Entity};

use crate::error::DatabaseError;

pub mod case;
pub mod claim;
pub mod incident;
pub mod insured;
pub mod policy;
pub mod vehicle;

pub use case::CaseRow;
pub use claim::ClaimRow;
pub use incident::IncidentRow;
pub use insured::InsuredRow;
pub use policy::PolicyRow;
pub use vehicle::VehicleRow;

/// Clause separator used for SET lists and column lists
pub type Assignments<'qb, 'args> = Separated<'qb, 'args, Postgres, &'static str>;

/// Mapping of a record kind onto its table
pub trait PgTable: Entity {
    /// Row as selected from the table
    type Row: for<'r> FromRow<'r, PgRow> + Into<Self> + Send + Unpin;

    /// Table name
    const TABLE: &'static str;

    /// Select list, identity first
    const COLUMNS: &'static str;

    /// Pushes `(columns) VALUES (binds)` for an insert
    fn push_insert(fields: &Self::Fields, builder: &mut QueryBuilder<'_, Postgres>);

    /// Pushes `column = bind` for every supplied field; returns how many
    fn push_patch(patch: &Self::Patch, set: &mut Assignments<'_, '_>) -> usize;

    /// Pushes a `WHERE` clause for the list filter, if it restricts anything
    fn push_filter(_filter: &Self::Filter, _builder: &mut QueryBuilder<'_, Postgres>) {}
}

/// Key matching for shared record kinds
pub trait PgKeyed: PgTable + Deduplicated {
    /// Pushes a `WHERE` clause matching the key exactly, NULL only matching
    /// NULL
    fn push_key(key: &Self::Key, builder: &mut QueryBuilder<'_, Postgres>);
}

/// Pushes `column = bind` when the patch supplies a value
pub(crate) fn assign<'args, T>(
    set: &mut Assignments<'_, 'args>,
    column: &str,
    value: Option<T>,
    assigned: &mut usize,
) where
    T: 'args + Encode<'args, Postgres> + Type<Postgres>,
{
    if let Some(value) = value {
        set.push(column).push_unseparated(" = ").push_bind_unseparated(value);
        *assigned += 1;
    }
}

/// Pushes `column IS NOT DISTINCT FROM bind`
pub(crate) fn match_exact<'args, T>(clause: &mut Assignments<'_, 'args>, column: &str, value: T)
where
    T: 'args + Encode<'args, Postgres> + Type<Postgres>,
{
    clause
        .push(column)
        .push_unseparated(" IS NOT DISTINCT FROM ")
        .push_bind_unseparated(value);
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Inserts a record and returns it with its assigned identity
pub async fn insert<'e, E, X>(executor: X, fields: &E::Fields) -> Result<E, DatabaseError>
where
    E: PgTable,
    X: PgExecutor<'e>,
{
    let mut builder = QueryBuilder::new(format!("INSERT INTO {} ", E::TABLE));
    E::push_insert(fields, &mut builder);
    builder.push(" RETURNING ").push(E::COLUMNS);

    trace!(sql = builder.sql(), "insert");
    let row = builder.build_query_as::<E::Row>().fetch_one(executor).await?;
    Ok(row.into())
}

/// Reads a record by identity
pub async fn find_by_id<'e, E, X>(executor: X, id: E::Id) -> Result<Option<E>, DatabaseError>
where
    E: PgTable,
    X: PgExecutor<'e>,
{
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {} WHERE id = ", E::COLUMNS, E::TABLE));
    builder.push_bind(id.raw());

    let row = builder.build_query_as::<E::Row>().fetch_optional(executor).await?;
    Ok(row.map(Into::into))
}

/// Overwrites the supplied fields; `None` if no record has the identity
pub async fn update<'e, E, X>(executor: X, id: E::Id, patch: &E::Patch) -> Result<Option<E>, DatabaseError>
where
    E: PgTable,
    X: PgExecutor<'e>,
{
    let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", E::TABLE));
    let assigned = {
        let mut set = builder.separated(", ");
        E::push_patch(patch, &mut set)
    };
    if assigned == 0 {
        return find_by_id::<E, X>(executor, id).await;
    }
    builder
        .push(" WHERE id = ")
        .push_bind(id.raw())
        .push(" RETURNING ")
        .push(E::COLUMNS);

    trace!(sql = builder.sql(), "update");
    let row = builder.build_query_as::<E::Row>().fetch_optional(executor).await?;
    Ok(row.map(Into::into))
}

/// Lists records in identity order
pub async fn list<'e, E, X>(executor: X, filter: &E::Filter, page: Page) -> Result<Vec<E>, DatabaseError>
where
    E: PgTable,
    X: PgExecutor<'e>,
{
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", E::COLUMNS, E::TABLE));
    E::push_filter(filter, &mut builder);
    builder
        .push(" ORDER BY id LIMIT ")
        .push_bind(to_i64(page.limit))
        .push(" OFFSET ")
        .push_bind(to_i64(page.offset));

    let rows = builder.build_query_as::<E::Row>().fetch_all(executor).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Counts records passing the filter
pub async fn count<'e, E, X>(executor: X, filter: &E::Filter) -> Result<u64, DatabaseError>
where
    E: PgTable,
    X: PgExecutor<'e>,
{
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", E::TABLE));
    E::push_filter(filter, &mut builder);

    let total: i64 = builder.build_query_scalar().fetch_one(executor).await?;
    Ok(u64::try_from(total).unwrap_or(0))
}

/// Finds the first record, in identity order, whose key matches exactly
pub async fn find_by_key<'e, E, X>(executor: X, key: &E::Key) -> Result<Option<E>, DatabaseError>
where
    E: PgKeyed,
    X: PgExecutor<'e>,
{
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", E::COLUMNS, E::TABLE));
    E::push_key(key, &mut builder);
    builder.push(" ORDER BY id LIMIT 1");

    let row = builder.build_query_as::<E::Row>().fetch_optional(executor).await?;
    Ok(row.map(Into::into))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::{Insured, InsuredPatch, Policy, PolicyFilter, Vehicle, VehicleKey};

    #[test]
    fn test_patch_only_sets_supplied_columns() {
        let patch = InsuredPatch {
            occupation: Some("sales".to_string()),
            capital_loss: Some(-100),
            ..Default::default()
        };
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE insured SET ");
        let assigned = {
            let mut set = builder.separated(", ");
            Insured::push_patch(&patch, &mut set)
        };

        assert_eq!(assigned, 2);
        assert_eq!(builder.sql(), "UPDATE insured SET occupation = $1, capital_loss = $2");
    }

    #[test]
    fn test_empty_patch_assigns_nothing() {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE policy SET ");
        let assigned = {
            let mut set = builder.separated(", ");
            Policy::push_patch(&Default::default(), &mut set)
        };
        assert_eq!(assigned, 0);
    }

    #[test]
    fn test_key_clause_is_null_safe() {
        let key = VehicleKey {
            make: Some("Saab".to_string()),
            model: None,
            year: Some(2004),
        };
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT id FROM vehicle");
        Vehicle::push_key(&key, &mut builder);

        assert_eq!(
            builder.sql(),
            "SELECT id FROM vehicle WHERE make IS NOT DISTINCT FROM $1 \
             AND model IS NOT DISTINCT FROM $2 AND year IS NOT DISTINCT FROM $3"
        );
    }

    #[test]
    fn test_policy_filter_clause() {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM policy");
        Policy::push_filter(&PolicyFilter::by_state("OH"), &mut builder);
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM policy WHERE policy_state = $1");

        let mut unfiltered: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM policy");
        Policy::push_filter(&PolicyFilter::default(), &mut unfiltered);
        assert_eq!(unfiltered.sql(), "SELECT COUNT(*) FROM policy");
    }
}
