//! Recognised source column names

// Insured
pub const AGE: &str = "age";
pub const INSURED_SEX: &str = "insured_sex";
pub const INSURED_EDUCATION_LEVEL: &str = "insured_education_level";
pub const INSURED_OCCUPATION: &str = "insured_occupation";
pub const INSURED_HOBBIES: &str = "insured_hobbies";
pub const INSURED_RELATIONSHIP: &str = "insured_relationship";
pub const INSURED_ZIP: &str = "insured_zip";
pub const MONTHS_AS_CUSTOMER: &str = "months_as_customer";
pub const CAPITAL_GAINS: &str = "capital-gains";
pub const CAPITAL_LOSS: &str = "capital-loss";

// Policy
pub const POLICY_NUMBER: &str = "policy_number";
pub const POLICY_BIND_DATE: &str = "policy_bind_date";
pub const POLICY_STATE: &str = "policy_state";
pub const POLICY_CSL: &str = "policy_csl";
/// Spelled as in the source files
pub const POLICY_DEDUCTABLE: &str = "policy_deductable";
pub const POLICY_ANNUAL_PREMIUM: &str = "policy_annual_premium";
pub const UMBRELLA_LIMIT: &str = "umbrella_limit";

// Vehicle
pub const AUTO_MAKE: &str = "auto_make";
pub const AUTO_MODEL: &str = "auto_model";
pub const AUTO_YEAR: &str = "auto_year";

// Incident
pub const INCIDENT_DATE: &str = "incident_date";
pub const INCIDENT_TYPE: &str = "incident_type";
pub const COLLISION_TYPE: &str = "collision_type";
pub const INCIDENT_SEVERITY: &str = "incident_severity";
pub const AUTHORITIES_CONTACTED: &str = "authorities_contacted";
pub const INCIDENT_STATE: &str = "incident_state";
pub const INCIDENT_CITY: &str = "incident_city";
pub const INCIDENT_LOCATION: &str = "incident_location";
pub const INCIDENT_HOUR_OF_THE_DAY: &str = "incident_hour_of_the_day";
pub const NUMBER_OF_VEHICLES_INVOLVED: &str = "number_of_vehicles_involved";
pub const PROPERTY_DAMAGE: &str = "property_damage";
pub const BODILY_INJURIES: &str = "bodily_injuries";
pub const WITNESSES: &str = "witnesses";
pub const POLICE_REPORT_AVAILABLE: &str = "police_report_available";

// Claim
pub const TOTAL_CLAIM_AMOUNT: &str = "total_claim_amount";
pub const INJURY_CLAIM: &str = "injury_claim";
pub const PROPERTY_CLAIM: &str = "property_claim";
pub const VEHICLE_CLAIM: &str = "vehicle_claim";
pub const FRAUD_REPORTED: &str = "fraud_reported";

/// Every recognised column, grouped by the record it feeds
pub const ALL: &[&str] = &[
    AGE,
    INSURED_SEX,
    INSURED_EDUCATION_LEVEL,
    INSURED_OCCUPATION,
    INSURED_HOBBIES,
    INSURED_RELATIONSHIP,
    INSURED_ZIP,
    MONTHS_AS_CUSTOMER,
    CAPITAL_GAINS,
    CAPITAL_LOSS,
    POLICY_NUMBER,
    POLICY_BIND_DATE,
    POLICY_STATE,
    POLICY_CSL,
    POLICY_DEDUCTABLE,
    POLICY_ANNUAL_PREMIUM,
    UMBRELLA_LIMIT,
    AUTO_MAKE,
    AUTO_MODEL,
    AUTO_YEAR,
    INCIDENT_DATE,
    INCIDENT_TYPE,
    COLLISION_TYPE,
    INCIDENT_SEVERITY,
    AUTHORITIES_CONTACTED,
    INCIDENT_STATE,
    INCIDENT_CITY,
    INCIDENT_LOCATION,
    INCIDENT_HOUR_OF_THE_DAY,
    NUMBER_OF_VEHICLES_INVOLVED,
    PROPERTY_DAMAGE,
    BODILY_INJURIES,
    WITNESSES,
    POLICE_REPORT_AVAILABLE,
    TOTAL_CLAIM_AMOUNT,
    INJURY_CLAIM,
    PROPERTY_CLAIM,
    VEHICLE_CLAIM,
    FRAUD_REPORTED,
];
