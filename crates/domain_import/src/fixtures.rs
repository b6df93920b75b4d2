//! Canonical source rows and CSV files for tests
//!
//! Available to this crate's tests and, with the `fixtures` feature, to
//! other crates' tests.

use std::io;

use tempfile::NamedTempFile;

use crate::columns::{self, ALL};
use crate::source::SourceRow;

/// Fixture for source rows
pub struct SourceRowFixtures;

impl SourceRowFixtures {
    /// A fully populated row; only the policy number varies
    pub fn complete(policy_number: i64) -> SourceRow {
        SourceRow::new()
            .with(columns::MONTHS_AS_CUSTOMER, "328")
            .with(columns::AGE, "48")
            .with(columns::POLICY_NUMBER, policy_number.to_string())
            .with(columns::POLICY_BIND_DATE, "2014-10-17")
            .with(columns::POLICY_STATE, "OH")
            .with(columns::POLICY_CSL, "250/500")
            .with(columns::POLICY_DEDUCTABLE, "1000")
            .with(columns::POLICY_ANNUAL_PREMIUM, "1406.91")
            .with(columns::UMBRELLA_LIMIT, "0")
            .with(columns::INSURED_ZIP, "466132")
            .with(columns::INSURED_SEX, "MALE")
            .with(columns::INSURED_EDUCATION_LEVEL, "MD")
            .with(columns::INSURED_OCCUPATION, "craft-repair")
            .with(columns::INSURED_HOBBIES, "sleeping")
            .with(columns::INSURED_RELATIONSHIP, "husband")
            .with(columns::CAPITAL_GAINS, "53300")
            .with(columns::CAPITAL_LOSS, "0")
            .with(columns::INCIDENT_DATE, "2015-01-25")
            .with(columns::INCIDENT_TYPE, "Single Vehicle Collision")
            .with(columns::COLLISION_TYPE, "Side Collision")
            .with(columns::INCIDENT_SEVERITY, "Major Damage")
            .with(columns::AUTHORITIES_CONTACTED, "Police")
            .with(columns::INCIDENT_STATE, "SC")
            .with(columns::INCIDENT_CITY, "Columbus")
            .with(columns::INCIDENT_LOCATION, "9935 4th Drive")
            .with(columns::INCIDENT_HOUR_OF_THE_DAY, "5")
            .with(columns::NUMBER_OF_VEHICLES_INVOLVED, "1")
            .with(columns::PROPERTY_DAMAGE, "YES")
            .with(columns::BODILY_INJURIES, "1")
            .with(columns::WITNESSES, "2")
            .with(columns::POLICE_REPORT_AVAILABLE, "YES")
            .with(columns::TOTAL_CLAIM_AMOUNT, "71610")
            .with(columns::INJURY_CLAIM, "6510")
            .with(columns::PROPERTY_CLAIM, "13020")
            .with(columns::VEHICLE_CLAIM, "52080")
            .with(columns::AUTO_MAKE, "Saab")
            .with(columns::AUTO_MODEL, "92x")
            .with(columns::AUTO_YEAR, "2004")
            .with(columns::FRAUD_REPORTED, "YES")
    }

    /// A row whose insured and vehicle both differ from [`Self::complete`]
    pub fn other_party(policy_number: i64) -> SourceRow {
        Self::complete(policy_number)
            .with(columns::AGE, "42")
            .with(columns::INSURED_SEX, "FEMALE")
            .with(columns::AUTO_MAKE, "Mercedes")
            .with(columns::AUTO_MODEL, "E400")
            .with(columns::AUTO_YEAR, "2007")
            .with(columns::FRAUD_REPORTED, "NO")
    }

    /// A row that fails on its incident date
    pub fn bad_incident_date(policy_number: i64) -> SourceRow {
        Self::complete(policy_number).with(columns::INCIDENT_DATE, "25/01/2015")
    }
}

/// Source files written to a temporary location
pub struct CsvFixture;

impl CsvFixture {
    /// Writes the rows under the full header; absent cells are left empty
    pub fn write(rows: &[SourceRow]) -> io::Result<NamedTempFile> {
        let file = NamedTempFile::new()?;
        let mut writer = csv::Writer::from_path(file.path())?;
        writer.write_record(ALL)?;
        for row in rows {
            let record = ALL
                .iter()
                .map(|column| row.cell(column).map(ToString::to_string).unwrap_or_default());
            writer.write_record(record)?;
        }
        writer.flush()?;
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CsvRowSource;

    #[test]
    fn test_written_file_reads_back() {
        let file = CsvFixture::write(&[
            SourceRowFixtures::complete(1),
            SourceRowFixtures::other_party(2),
        ])
        .unwrap();

        let rows: Vec<SourceRow> = CsvRowSource::open(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text(columns::INCIDENT_LOCATION).as_deref(), Some("9935 4th Drive"));
        assert_eq!(rows[1].text(columns::AUTO_MAKE).as_deref(), Some("Mercedes"));
    }

    #[test]
    fn test_bad_incident_date_differs_only_in_date() {
        let good = SourceRowFixtures::complete(5);
        let bad = SourceRowFixtures::bad_incident_date(5);

        assert_eq!(bad.text(columns::INCIDENT_DATE).as_deref(), Some("25/01/2015"));
        assert_eq!(good.text(columns::AUTO_MAKE), bad.text(columns::AUTO_MAKE));
    }
}
