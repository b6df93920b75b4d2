//! Insured table mapping

use sqlx::{FromRow, Postgres, QueryBuilder};

use core_kernel::{EntityId, InsuredId};
use domain_claims::{Insured, InsuredKey, InsuredPatch, NewInsured};

use super::{assign, match_exact, Assignments, PgKeyed, PgTable};

/// Database row for an insured party
#[derive(Debug, Clone, FromRow)]
pub struct InsuredRow {
    pub id: i64,
    pub age: Option<i32>,
    pub sex: Option<String>,
    pub education_level: Option<String>,
    pub occupation: Option<String>,
    pub hobbies: Option<String>,
    pub relationships: Option<String>,
    pub zip_code: Option<i32>,
    pub months_as_customer: Option<i32>,
    pub capital_gains: Option<i64>,
    pub capital_loss: Option<i64>,
}

impl From<InsuredRow> for Insured {
    fn from(row: InsuredRow) -> Self {
        Self {
            id: InsuredId::from_raw(row.id),
            age: row.age,
            sex: row.sex,
            education_level: row.education_level,
            occupation: row.occupation,
            hobbies: row.hobbies,
            relationships: row.relationships,
            zip_code: row.zip_code,
            months_as_customer: row.months_as_customer,
            capital_gains: row.capital_gains,
            capital_loss: row.capital_loss,
        }
    }
}

impl PgTable for Insured {
    type Row = InsuredRow;

    const TABLE: &'static str = "insured";
    const COLUMNS: &'static str = "id, age, sex, education_level, occupation, hobbies, \
        relationships, zip_code, months_as_customer, capital_gains, capital_loss";

    fn push_insert(fields: &NewInsured, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(
            "(age, sex, education_level, occupation, hobbies, relationships, zip_code, \
             months_as_customer, capital_gains, capital_loss) VALUES (",
        );
        builder
            .separated(", ")
            .push_bind(fields.age)
            .push_bind(fields.sex.clone())
            .push_bind(fields.education_level.clone())
            .push_bind(fields.occupation.clone())
            .push_bind(fields.hobbies.clone())
            .push_bind(fields.relationships.clone())
            .push_bind(fields.zip_code)
            .push_bind(fields.months_as_customer)
            .push_bind(fields.capital_gains)
            .push_bind(fields.capital_loss)
            .push_unseparated(")");
    }

    fn push_patch(patch: &InsuredPatch, set: &mut Assignments<'_, '_>) -> usize {
        let mut assigned = 0;
        assign(set, "age", patch.age, &mut assigned);
        assign(set, "sex", patch.sex.clone(), &mut assigned);
        assign(set, "education_level", patch.education_level.clone(), &mut assigned);
        assign(set, "occupation", patch.occupation.clone(), &mut assigned);
        assign(set, "hobbies", patch.hobbies.clone(), &mut assigned);
        assign(set, "relationships", patch.relationships.clone(), &mut assigned);
        assign(set, "zip_code", patch.zip_code, &mut assigned);
        assign(set, "months_as_customer", patch.months_as_customer, &mut assigned);
        assign(set, "capital_gains", patch.capital_gains, &mut assigned);
        assign(set, "capital_loss", patch.capital_loss, &mut assigned);
        assigned
    }
}

impl PgKeyed for Insured {
    fn push_key(key: &InsuredKey, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(" WHERE ");
        let mut clause = builder.separated(" AND ");
        match_exact(&mut clause, "age", key.age);
        match_exact(&mut clause, "sex", key.sex.clone());
        match_exact(&mut clause, "education_level", key.education_level.clone());
        match_exact(&mut clause, "occupation", key.occupation.clone());
        match_exact(&mut clause, "zip_code", key.zip_code);
    }
}
