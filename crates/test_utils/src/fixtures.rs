//! Pre-built Test Fixtures
//!
//! Record field sets modelled on the claims data file. Source rows and CSV
//! files come from `domain_import::fixtures` and are re-exported here.

use chrono::NaiveDate;
use domain_claims::{NewInsured, NewPolicy, NewVehicle};
use rust_decimal_macros::dec;

pub use domain_import::fixtures::{CsvFixture, SourceRowFixtures};

/// Fixture for policy field sets
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// An Ohio policy with a 250/500 combined single limit
    pub fn ohio(policy_number: i64) -> NewPolicy {
        NewPolicy {
            policy_number,
            bind_date: NaiveDate::from_ymd_opt(2014, 10, 17),
            policy_state: Some("OH".to_string()),
            csl: Some("250/500".to_string()),
            deductible: Some(1000),
            annual_premium: Some(dec!(1406.91)),
            umbrella_limit: Some(0),
        }
    }

    /// The insured matching [`SourceRowFixtures::complete`]
    pub fn insured() -> NewInsured {
        NewInsured {
            age: Some(48),
            sex: Some("MALE".to_string()),
            education_level: Some("MD".to_string()),
            occupation: Some("craft-repair".to_string()),
            hobbies: Some("sleeping".to_string()),
            relationships: Some("husband".to_string()),
            zip_code: Some(466132),
            months_as_customer: Some(328),
            capital_gains: Some(53300),
            capital_loss: Some(0),
        }
    }

    /// The vehicle matching [`SourceRowFixtures::complete`]
    pub fn vehicle() -> NewVehicle {
        NewVehicle {
            make: Some("Saab".to_string()),
            model: Some("92x".to_string()),
            year: Some(2004),
        }
    }
}
