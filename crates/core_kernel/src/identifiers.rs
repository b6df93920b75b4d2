//! Strongly-typed identifiers for stored records
//!
//! Every record receives a process-unique integer identity from storage when
//! it is created. Wrapping the raw integer in a newtype per record kind keeps
//! an insured id from being passed where a vehicle id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Common behaviour of all record identifiers
///
/// Storage adapters only ever see the raw `i64`; domain code only ever sees
/// the typed wrapper.
pub trait EntityId:
    Copy + Eq + std::hash::Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Wraps a raw identity assigned by storage
    fn from_raw(raw: i64) -> Self;

    /// Returns the raw identity for storage
    fn raw(&self) -> i64;
}

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from a raw storage identity
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the underlying integer
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl EntityId for $name {
            fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            fn raw(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(raw.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(InsuredId, "INS");
define_id!(PolicyId, "POL");
define_id!(VehicleId, "VEH");
define_id!(IncidentId, "INC");
define_id!(ClaimId, "CLM");
define_id!(CaseId, "CASE");
