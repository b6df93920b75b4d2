//! Policy table mapping

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, QueryBuilder};

use core_kernel::{EntityId, PolicyId};
use domain_claims::{NewPolicy, Policy, PolicyFilter, PolicyPatch};

use super::{assign, Assignments, PgKeyed, PgTable};

/// Database row for a policy
#[derive(Debug, Clone, FromRow)]
pub struct PolicyRow {
    pub id: i64,
    pub policy_number: i64,
    pub bind_date: Option<NaiveDate>,
    pub policy_state: Option<String>,
    pub csl: Option<String>,
    pub deductible: Option<i64>,
    pub annual_premium: Option<Decimal>,
    pub umbrella_limit: Option<i64>,
}

impl From<PolicyRow> for Policy {
    fn from(row: PolicyRow) -> Self {
        Self {
            id: PolicyId::from_raw(row.id),
            policy_number: row.policy_number,
            bind_date: row.bind_date,
            policy_state: row.policy_state,
            csl: row.csl,
            deductible: row.deductible,
            annual_premium: row.annual_premium,
            umbrella_limit: row.umbrella_limit,
        }
    }
}

impl PgTable for Policy {
    type Row = PolicyRow;

    const TABLE: &'static str = "policy";
    const COLUMNS: &'static str =
        "id, policy_number, bind_date, policy_state, csl, deductible, annual_premium, umbrella_limit";

    fn push_insert(fields: &NewPolicy, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(
            "(policy_number, bind_date, policy_state, csl, deductible, annual_premium, umbrella_limit) VALUES (",
        );
        builder
            .separated(", ")
            .push_bind(fields.policy_number)
            .push_bind(fields.bind_date)
            .push_bind(fields.policy_state.clone())
            .push_bind(fields.csl.clone())
            .push_bind(fields.deductible)
            .push_bind(fields.annual_premium)
            .push_bind(fields.umbrella_limit)
            .push_unseparated(")");
    }

    fn push_patch(patch: &PolicyPatch, set: &mut Assignments<'_, '_>) -> usize {
        let mut assigned = 0;
        assign(set, "policy_number", patch.policy_number, &mut assigned);
        assign(set, "bind_date", patch.bind_date, &mut assigned);
        assign(set, "policy_state", patch.policy_state.clone(), &mut assigned);
        assign(set, "csl", patch.csl.clone(), &mut assigned);
        assign(set, "deductible", patch.deductible, &mut assigned);
        assign(set, "annual_premium", patch.annual_premium, &mut assigned);
        assign(set, "umbrella_limit", patch.umbrella_limit, &mut assigned);
        assigned
    }

    fn push_filter(filter: &PolicyFilter, builder: &mut QueryBuilder<'_, Postgres>) {
        if let Some(state) = &filter.policy_state {
            builder.push(" WHERE policy_state = ").push_bind(state.clone());
        }
    }
}

impl PgKeyed for Policy {
    fn push_key(policy_number: &i64, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(" WHERE policy_number = ").push_bind(*policy_number);
    }
}
