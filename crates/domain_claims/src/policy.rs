//! Insurance policy and coverage banding

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::PolicyId;
use crate::entity::{Deduplicated, Entity};

/// Per-accident limit at or above which coverage is banded High
const HIGH_COVERAGE_FLOOR: i64 = 750;
/// Per-accident limit at or above which coverage is banded Medium
const MEDIUM_COVERAGE_FLOOR: i64 = 450;

/// An auto insurance policy
///
/// Policies are identified by their policy number, which is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub policy_number: i64,
    pub bind_date: Option<NaiveDate>,
    pub policy_state: Option<String>,
    /// Combined single limit, "perPerson/perAccident"
    pub csl: Option<String>,
    pub deductible: Option<i64>,
    pub annual_premium: Option<Decimal>,
    pub umbrella_limit: Option<i64>,
}

/// Field set for creating a policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPolicy {
    pub policy_number: i64,
    pub bind_date: Option<NaiveDate>,
    pub policy_state: Option<String>,
    pub csl: Option<String>,
    pub deductible: Option<i64>,
    pub annual_premium: Option<Decimal>,
    pub umbrella_limit: Option<i64>,
}

impl NewPolicy {
    /// Creates a field set with only the policy number populated
    pub fn numbered(policy_number: i64) -> Self {
        Self {
            policy_number,
            bind_date: None,
            policy_state: None,
            csl: None,
            deductible: None,
            annual_premium: None,
            umbrella_limit: None,
        }
    }
}

/// Partial update for a policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyPatch {
    pub policy_number: Option<i64>,
    pub bind_date: Option<NaiveDate>,
    pub policy_state: Option<String>,
    pub csl: Option<String>,
    pub deductible: Option<i64>,
    pub annual_premium: Option<Decimal>,
    pub umbrella_limit: Option<i64>,
}

/// List filter for policies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyFilter {
    /// Only policies written in this state
    pub policy_state: Option<String>,
}

impl PolicyFilter {
    /// Creates a filter on the policy state
    pub fn by_state(state: impl Into<String>) -> Self {
        Self {
            policy_state: Some(state.into()),
        }
    }
}

/// The two limits encoded in a combined single limit string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CslLimits {
    pub per_person: i64,
    pub per_accident: i64,
}

impl CslLimits {
    /// Parses "perPerson/perAccident"
    ///
    /// Returns `None` unless the text is exactly two integers separated by a
    /// single slash.
    pub fn parse(csl: &str) -> Option<Self> {
        let (person, accident) = csl.trim().split_once('/')?;
        Some(Self {
            per_person: person.trim().parse().ok()?,
            per_accident: accident.trim().parse().ok()?,
        })
    }
}

/// Coverage band derived from the per-accident limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageLevel {
    High,
    Medium,
    Low,
    /// The CSL is missing or malformed
    Unknown,
}

impl CoverageLevel {
    /// Bands a per-accident limit
    pub fn for_per_accident(per_accident: i64) -> Self {
        if per_accident >= HIGH_COVERAGE_FLOOR {
            CoverageLevel::High
        } else if per_accident >= MEDIUM_COVERAGE_FLOOR {
            CoverageLevel::Medium
        } else {
            CoverageLevel::Low
        }
    }

    /// Bands a raw CSL string
    pub fn from_csl(csl: Option<&str>) -> Self {
        csl.and_then(CslLimits::parse)
            .map(|limits| Self::for_per_accident(limits.per_accident))
            .unwrap_or(CoverageLevel::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageLevel::High => "High",
            CoverageLevel::Medium => "Medium",
            CoverageLevel::Low => "Low",
            CoverageLevel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CoverageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Policy {
    /// Parsed CSL limits, if the CSL is present and well formed
    pub fn csl_limits(&self) -> Option<CslLimits> {
        self.csl.as_deref().and_then(CslLimits::parse)
    }

    /// Coverage band of this policy
    pub fn coverage_level(&self) -> CoverageLevel {
        CoverageLevel::from_csl(self.csl.as_deref())
    }
}

impl Entity for Policy {
    type Id = PolicyId;
    type Fields = NewPolicy;
    type Patch = PolicyPatch;
    type Filter = PolicyFilter;

    const NAME: &'static str = "Policy";

    fn id(&self) -> PolicyId {
        self.id
    }

    fn from_fields(id: PolicyId, fields: NewPolicy) -> Self {
        Self {
            id,
            policy_number: fields.policy_number,
            bind_date: fields.bind_date,
            policy_state: fields.policy_state,
            csl: fields.csl,
            deductible: fields.deductible,
            annual_premium: fields.annual_premium,
            umbrella_limit: fields.umbrella_limit,
        }
    }

    fn apply_patch(&mut self, patch: PolicyPatch) {
        if let Some(number) = patch.policy_number {
            self.policy_number = number;
        }
        if let Some(bind_date) = patch.bind_date {
            self.bind_date = Some(bind_date);
        }
        if let Some(state) = patch.policy_state {
            self.policy_state = Some(state);
        }
        if let Some(csl) = patch.csl {
            self.csl = Some(csl);
        }
        if let Some(deductible) = patch.deductible {
            self.deductible = Some(deductible);
        }
        if let Some(premium) = patch.annual_premium {
            self.annual_premium = Some(premium);
        }
        if let Some(umbrella) = patch.umbrella_limit {
            self.umbrella_limit = Some(umbrella);
        }
    }

    fn matches(&self, filter: &PolicyFilter) -> bool {
        match &filter.policy_state {
            Some(state) => self.policy_state.as_ref() == Some(state),
            None => true,
        }
    }
}

impl Deduplicated for Policy {
    type Key = i64;

    const UNIQUE_KEY: bool = true;

    fn key(&self) -> i64 {
        self.policy_number
    }

    fn key_of(fields: &NewPolicy) -> i64 {
        fields.policy_number
    }
}
