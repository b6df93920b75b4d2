//! Insured party

use serde::{Deserialize, Serialize};

use core_kernel::InsuredId;
use crate::entity::{Deduplicated, Entity, NoFilter};

/// The person a policy covers
///
/// Insured records are deduplicated on their demographic profile: age, sex,
/// education level, occupation and zip code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insured {
    pub id: InsuredId,
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

/// Field set for creating an insured party
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewInsured {
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

/// Partial update for an insured party
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsuredPatch {
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

/// Demographic profile an insured party is matched on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InsuredKey {
    pub age: Option<i32>,
    pub sex: Option<String>,
    pub education_level: Option<String>,
    pub occupation: Option<String>,
    pub zip_code: Option<i32>,
}

impl Insured {
    /// Capital gains net of capital losses, missing values counting as zero
    ///
    /// Widened to `i128` so no pair of stored amounts can overflow.
    pub fn financial_score(&self) -> i128 {
        i128::from(self.capital_gains.unwrap_or(0)) - i128::from(self.capital_loss.unwrap_or(0))
    }
}

impl Entity for Insured {
    type Id = InsuredId;
    type Fields = NewInsured;
    type Patch = InsuredPatch;
    type Filter = NoFilter;

    const NAME: &'static str = "Insured";

    fn id(&self) -> InsuredId {
        self.id
    }

    fn from_fields(id: InsuredId, fields: NewInsured) -> Self {
        Self {
            id,
            age: fields.age,
            sex: fields.sex,
            education_level: fields.education_level,
            occupation: fields.occupation,
            hobbies: fields.hobbies,
            relationships: fields.relationships,
            zip_code: fields.zip_code,
            months_as_customer: fields.months_as_customer,
            capital_gains: fields.capital_gains,
            capital_loss: fields.capital_loss,
        }
    }

    fn apply_patch(&mut self, patch: InsuredPatch) {
        if let Some(age) = patch.age {
            self.age = Some(age);
        }
        if let Some(sex) = patch.sex {
            self.sex = Some(sex);
        }
        if let Some(education_level) = patch.education_level {
            self.education_level = Some(education_level);
        }
        if let Some(occupation) = patch.occupation {
            self.occupation = Some(occupation);
        }
        if let Some(hobbies) = patch.hobbies {
            self.hobbies = Some(hobbies);
        }
        if let Some(relationships) = patch.relationships {
            self.relationships = Some(relationships);
        }
        if let Some(zip_code) = patch.zip_code {
            self.zip_code = Some(zip_code);
        }
        if let Some(months) = patch.months_as_customer {
            self.months_as_customer = Some(months);
        }
        if let Some(gains) = patch.capital_gains {
            self.capital_gains = Some(gains);
        }
        if let Some(loss) = patch.capital_loss {
            self.capital_loss = Some(loss);
        }
    }

    fn matches(&self, _filter: &NoFilter) -> bool {
        true
    }
}

impl Deduplicated for Insured {
    type Key = InsuredKey;

    fn key(&self) -> InsuredKey {
        InsuredKey {
            age: self.age,
            sex: self.sex.clone(),
            education_level: self.education_level.clone(),
            occupation: self.occupation.clone(),
            zip_code: self.zip_code,
        }
    }

    fn key_of(fields: &NewInsured) -> InsuredKey {
        InsuredKey {
            age: fields.age,
            sex: fields.sex.clone(),
            education_level: fields.education_level.clone(),
            occupation: fields.occupation.clone(),
            zip_code: fields.zip_code,
        }
    }
}
