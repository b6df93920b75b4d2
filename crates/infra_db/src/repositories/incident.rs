//! Incident table mapping

use chrono::NaiveDate;
use sqlx::{FromRow, Postgres, QueryBuilder};

use core_kernel::{EntityId, IncidentId};
use domain_claims::{Incident, IncidentPatch, NewIncident};

use super::{assign, Assignments, PgTable};

/// Database row for an incident
#[derive(Debug, Clone, FromRow)]
pub struct IncidentRow {
    pub id: i64,
    pub date: Option<NaiveDate>,
    pub incident_type: Option<String>,
    pub collision_type: Option<String>,
    pub incident_severity: Option<String>,
    pub authorities_contacted: Option<String>,
    pub incident_state: Option<String>,
    pub incident_city: Option<String>,
    pub incident_location: Option<String>,
    pub hour_of_day: Option<i32>,
    pub vehicles_involved: Option<i32>,
    pub property_damage: Option<bool>,
    pub bodily_injuries: Option<i32>,
    pub witnesses: Option<i32>,
    pub police_report_available: Option<bool>,
}

impl From<IncidentRow> for Incident {
    fn from(row: IncidentRow) -> Self {
        Self {
            id: IncidentId::from_raw(row.id),
            date: row.date,
            incident_type: row.incident_type,
            collision_type: row.collision_type,
            incident_severity: row.incident_severity,
            authorities_contacted: row.authorities_contacted,
            incident_state: row.incident_state,
            incident_city: row.incident_city,
            incident_location: row.incident_location,
            hour_of_day: row.hour_of_day,
            vehicles_involved: row.vehicles_involved,
            property_damage: row.property_damage,
            bodily_injuries: row.bodily_injuries,
            witnesses: row.witnesses,
            police_report_available: row.police_report_available,
        }
    }
}

impl PgTable for Incident {
    type Row = IncidentRow;

    const TABLE: &'static str = "incident";
    const COLUMNS: &'static str = "id, date, incident_type, collision_type, incident_severity, \
        authorities_contacted, incident_state, incident_city, incident_location, hour_of_day, \
        vehicles_involved, property_damage, bodily_injuries, witnesses, police_report_available";

    fn push_insert(fields: &NewIncident, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(
            "(date, incident_type, collision_type, incident_severity, authorities_contacted, \
             incident_state, incident_city, incident_location, hour_of_day, vehicles_involved, \
             property_damage, bodily_injuries, witnesses, police_report_available) VALUES (",
        );
        builder
            .separated(", ")
            .push_bind(fields.date)
            .push_bind(fields.incident_type.clone())
            .push_bind(fields.collision_type.clone())
            .push_bind(fields.incident_severity.clone())
            .push_bind(fields.authorities_contacted.clone())
            .push_bind(fields.incident_state.clone())
            .push_bind(fields.incident_city.clone())
            .push_bind(fields.incident_location.clone())
            .push_bind(fields.hour_of_day)
            .push_bind(fields.vehicles_involved)
            .push_bind(fields.property_damage)
            .push_bind(fields.bodily_injuries)
            .push_bind(fields.witnesses)
            .push_bind(fields.police_report_available)
            .push_unseparated(")");
    }

    fn push_patch(patch: &IncidentPatch, set: &mut Assignments<'_, '_>) -> usize {
        let mut assigned = 0;
        assign(set, "date", patch.date, &mut assigned);
        assign(set, "incident_type", patch.incident_type.clone(), &mut assigned);
        assign(set, "collision_type", patch.collision_type.clone(), &mut assigned);
        assign(set, "incident_severity", patch.incident_severity.clone(), &mut assigned);
        assign(set, "authorities_contacted", patch.authorities_contacted.clone(), &mut assigned);
        assign(set, "incident_state", patch.incident_state.clone(), &mut assigned);
        assign(set, "incident_city", patch.incident_city.clone(), &mut assigned);
        assign(set, "incident_location", patch.incident_location.clone(), &mut assigned);
        assign(set, "hour_of_day", patch.hour_of_day, &mut assigned);
        assign(set, "vehicles_involved", patch.vehicles_involved, &mut assigned);
        assign(set, "property_damage", patch.property_damage, &mut assigned);
        assign(set, "bodily_injuries", patch.bodily_injuries, &mut assigned);
        assign(set, "witnesses", patch.witnesses, &mut assigned);
        assign(set, "police_report_available", patch.police_report_available, &mut assigned);
        assigned
    }
}
