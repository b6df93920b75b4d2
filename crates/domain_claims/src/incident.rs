//! Incident that gave rise to a claim

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::IncidentId;
use crate::entity::{Entity, NoFilter};

/// A loss event. Incidents are never shared: every case gets its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub id: IncidentId,
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

/// Field set for creating an incident
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIncident {
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

/// Partial update for an incident
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentPatch {
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

impl Entity for Incident {
    type Id = IncidentId;
    type Fields = NewIncident;
    type Patch = IncidentPatch;
    type Filter = NoFilter;

    const NAME: &'static str = "Incident";

    fn id(&self) -> IncidentId {
        self.id
    }

    fn from_fields(id: IncidentId, fields: NewIncident) -> Self {
        Self {
            id,
            date: fields.date,
            incident_type: fields.incident_type,
            collision_type: fields.collision_type,
            incident_severity: fields.incident_severity,
            authorities_contacted: fields.authorities_contacted,
            incident_state: fields.incident_state,
            incident_city: fields.incident_city,
            incident_location: fields.incident_location,
            hour_of_day: fields.hour_of_day,
            vehicles_involved: fields.vehicles_involved,
            property_damage: fields.property_damage,
            bodily_injuries: fields.bodily_injuries,
            witnesses: fields.witnesses,
            police_report_available: fields.police_report_available,
        }
    }

    fn apply_patch(&mut self, patch: IncidentPatch) {
        if patch.date.is_some() {
            self.date = patch.date;
        }
        if patch.incident_type.is_some() {
            self.incident_type = patch.incident_type;
        }
        if patch.collision_type.is_some() {
            self.collision_type = patch.collision_type;
        }
        if patch.incident_severity.is_some() {
            self.incident_severity = patch.incident_severity;
        }
        if patch.authorities_contacted.is_some() {
            self.authorities_contacted = patch.authorities_contacted;
        }
        if patch.incident_state.is_some() {
            self.incident_state = patch.incident_state;
        }
        if patch.incident_city.is_some() {
            self.incident_city = patch.incident_city;
        }
        if patch.incident_location.is_some() {
            self.incident_location = patch.incident_location;
        }
        if patch.hour_of_day.is_some() {
            self.hour_of_day = patch.hour_of_day;
        }
        if patch.vehicles_involved.is_some() {
            self.vehicles_involved = patch.vehicles_involved;
        }
        if patch.property_damage.is_some() {
            self.property_damage = patch.property_damage;
        }
        if patch.bodily_injuries.is_some() {
            self.bodily_injuries = patch.bodily_injuries;
        }
        if patch.witnesses.is_some() {
            self.witnesses = patch.witnesses;
        }
        if patch.police_report_available.is_some() {
            self.police_report_available = patch.police_report_available;
        }
    }

    fn matches(&self, _filter: &NoFilter) -> bool {
        true
    }
}
