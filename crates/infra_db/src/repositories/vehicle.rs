//! Vehicle table mapping

use sqlx::{FromRow, Postgres, QueryBuilder};

use core_kernel::{EntityId, VehicleId};
use domain_claims::{NewVehicle, Vehicle, VehicleKey, VehiclePatch};

use super::{assign, match_exact, Assignments, PgKeyed, PgTable};

/// Database row for a vehicle
#[derive(Debug, Clone, FromRow)]
pub struct VehicleRow {
    pub id: i64,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Self {
            id: VehicleId::from_raw(row.id),
            make: row.make,
            model: row.model,
            year: row.year,
        }
    }
}

impl PgTable for Vehicle {
    type Row = VehicleRow;

    const TABLE: &'static str = "vehicle";
    const COLUMNS: &'static str = "id, make, model, year";

    fn push_insert(fields: &NewVehicle, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push("(make, model, year) VALUES (");
        builder
            .separated(", ")
            .push_bind(fields.make.clone())
            .push_bind(fields.model.clone())
            .push_bind(fields.year)
            .push_unseparated(")");
    }

    fn push_patch(patch: &VehiclePatch, set: &mut Assignments<'_, '_>) -> usize {
        let mut assigned = 0;
        assign(set, "make", patch.make.clone(), &mut assigned);
        assign(set, "model", patch.model.clone(), &mut assigned);
        assign(set, "year", patch.year, &mut assigned);
        assigned
    }
}

impl PgKeyed for Vehicle {
    fn push_key(key: &VehicleKey, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(" WHERE ");
        let mut clause = builder.separated(" AND ");
        match_exact(&mut clause, "make", key.make.clone());
        match_exact(&mut clause, "model", key.model.clone());
        match_exact(&mut clause, "year", key.year);
    }
}
