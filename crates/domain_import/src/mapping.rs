//! Source row to record field sets
//!
//! Each record kind is mapped on its own, so a malformed cell fails only the
//! mapping of the record that reads it.

use domain_claims::{NewClaim, NewIncident, NewInsured, NewPolicy, NewVehicle};

use crate::columns::*;
use crate::error::FieldError;
use crate::source::SourceRow;

pub fn insured_fields(row: &SourceRow) -> Result<NewInsured, FieldError> {
    Ok(NewInsured {
        age: row.integer(AGE)?,
        sex: row.text(INSURED_SEX),
        education_level: row.text(INSURED_EDUCATION_LEVEL),
        occupation: row.text(INSURED_OCCUPATION),
        hobbies: row.text(INSURED_HOBBIES),
        relationships: row.text(INSURED_RELATIONSHIP),
        zip_code: row.integer(INSURED_ZIP)?,
        months_as_customer: row.integer(MONTHS_AS_CUSTOMER)?,
        capital_gains: row.integer(CAPITAL_GAINS)?,
        capital_loss: row.integer(CAPITAL_LOSS)?,
    })
}

/// Policy fields; the policy number is the only required cell of a row
pub fn policy_fields(row: &SourceRow) -> Result<NewPolicy, FieldError> {
    let policy_number = row
        .integer(POLICY_NUMBER)?
        .ok_or(FieldError::MissingRequired {
            column: POLICY_NUMBER,
        })?;

    Ok(NewPolicy {
        policy_number,
        bind_date: row.date(POLICY_BIND_DATE)?,
        policy_state: row.text(POLICY_STATE),
        csl: row.text(POLICY_CSL),
        deductible: row.integer(POLICY_DEDUCTABLE)?,
        annual_premium: row.decimal(POLICY_ANNUAL_PREMIUM)?,
        umbrella_limit: row.integer(UMBRELLA_LIMIT)?,
    })
}

pub fn vehicle_fields(row: &SourceRow) -> Result<NewVehicle, FieldError> {
    Ok(NewVehicle {
        make: row.text(AUTO_MAKE),
        model: row.text(AUTO_MODEL),
        year: row.integer(AUTO_YEAR)?,
    })
}

pub fn incident_fields(row: &SourceRow) -> Result<NewIncident, FieldError> {
    Ok(NewIncident {
        date: row.date(INCIDENT_DATE)?,
        incident_type: row.text(INCIDENT_TYPE),
        collision_type: row.text(COLLISION_TYPE),
        incident_severity: row.text(INCIDENT_SEVERITY),
        authorities_contacted: row.text(AUTHORITIES_CONTACTED),
        incident_state: row.text(INCIDENT_STATE),
        incident_city: row.text(INCIDENT_CITY),
        incident_location: row.text(INCIDENT_LOCATION),
        hour_of_day: row.integer(INCIDENT_HOUR_OF_THE_DAY)?,
        vehicles_involved: row.integer(NUMBER_OF_VEHICLES_INVOLVED)?,
        property_damage: row.boolean(PROPERTY_DAMAGE),
        bodily_injuries: row.integer(BODILY_INJURIES)?,
        witnesses: row.integer(WITNESSES)?,
        police_report_available: row.boolean(POLICE_REPORT_AVAILABLE),
    })
}

pub fn claim_fields(row: &SourceRow) -> Result<NewClaim, FieldError> {
    Ok(NewClaim {
        total_claim_amount: row.integer(TOTAL_CLAIM_AMOUNT)?,
        injury_claim: row.integer(INJURY_CLAIM)?,
        property_claim: row.integer(PROPERTY_CLAIM)?,
        vehicle_claim: row.integer(VEHICLE_CLAIM)?,
        fraud_reported: row.boolean(FRAUD_REPORTED),
    })
}
