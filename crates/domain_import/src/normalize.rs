//! Field normalization
//!
//! Every raw cell passes through here before it is matched or stored, so a
//! value is compared the same way whatever whitespace or missing-value marker
//! the source used.
//!
//! | Target  | Missing | Accepted                            | Otherwise         |
//! |---------|---------|-------------------------------------|-------------------|
//! | text    | `None`  | anything, trimmed                   | -                 |
//! | integer | `None`  | integers, integral floats           | `MalformedNumber` |
//! | decimal | `None`  | integers, decimals, finite floats   | `MalformedNumber` |
//! | date    | `None`  | `YYYY-MM-DD`                        | `MalformedDate`   |
//! | boolean | `None`  | "YES" (any case) is true, else false| -                 |

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Date layout of every date column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cell texts read as a missing value, compared after trimming
pub const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "#N/A", "NaN", "nan", "-NaN", "NULL", "null", "None",
];

/// A raw cell as delivered by a row source
///
/// File sources only produce `Text`; programmatic sources may hand over
/// values that are already typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Returns true if the cell carries no value
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Text(text) => is_missing_marker(text),
            Cell::Float(value) => value.is_nan(),
            Cell::Int(_) | Cell::Bool(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Bool(value) => write!(f, "{}", value),
            Cell::Int(value) => write!(f, "{}", value),
            Cell::Float(value) => write!(f, "{}", value),
            Cell::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

fn is_missing_marker(text: &str) -> bool {
    MISSING_MARKERS.contains(&text.trim())
}

/// Drops missing cells; an absent cell and an empty one are the same
fn present(cell: Option<&Cell>) -> Option<&Cell> {
    cell.filter(|c| !c.is_missing())
}

/// Trimmed text, `None` when missing or blank
pub fn text(cell: Option<&Cell>) -> Option<String> {
    match present(cell)? {
        Cell::Text(value) => Some(value.trim().to_string()),
        other => Some(other.to_string()),
    }
}

/// Whole number of any integer width
///
/// Text is parsed as an integer first and as a float second; a float is
/// accepted only when it has no fractional part and fits the target type.
pub fn integer<T>(column: &'static str, cell: Option<&Cell>) -> Result<Option<T>, FieldError>
where
    T: TryFrom<i64>,
{
    let Some(cell) = present(cell) else {
        return Ok(None);
    };
    let malformed = || FieldError::MalformedNumber {
        column,
        raw: cell.to_string(),
    };

    let whole = match cell {
        Cell::Int(value) => *value,
        Cell::Float(value) => integral(*value).ok_or_else(malformed)?,
        Cell::Text(value) => {
            let value = value.trim();
            match value.parse::<i64>() {
                Ok(whole) => whole,
                Err(_) => value
                    .parse::<f64>()
                    .ok()
                    .and_then(integral)
                    .ok_or_else(malformed)?,
            }
        }
        Cell::Bool(_) => return Err(malformed()),
    };

    T::try_from(whole).map(Some).map_err(|_| malformed())
}

fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Exact decimal
pub fn decimal(column: &'static str, cell: Option<&Cell>) -> Result<Option<Decimal>, FieldError> {
    let Some(cell) = present(cell) else {
        return Ok(None);
    };
    let malformed = || FieldError::MalformedNumber {
        column,
        raw: cell.to_string(),
    };

    let value = match cell {
        Cell::Int(value) => Decimal::from(*value),
        Cell::Float(value) => Decimal::try_from(*value).map_err(|_| malformed())?,
        Cell::Text(value) => {
            let value = value.trim();
            Decimal::from_str(value)
                .or_else(|_| Decimal::from_scientific(value))
                .map_err(|_| malformed())?
        }
        Cell::Bool(_) => return Err(malformed()),
    };
    Ok(Some(value))
}

/// Calendar date in `YYYY-MM-DD` form
pub fn date(column: &'static str, cell: Option<&Cell>) -> Result<Option<NaiveDate>, FieldError> {
    let Some(cell) = present(cell) else {
        return Ok(None);
    };
    let malformed = || FieldError::MalformedDate {
        column,
        raw: cell.to_string(),
    };

    match cell {
        Cell::Text(value) => NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
            .map(Some)
            .map_err(|_| malformed()),
        _ => Err(malformed()),
    }
}

/// Yes/no flag: "YES" in any case is true, any other value is false
pub fn boolean(cell: Option<&Cell>) -> Option<bool> {
    match present(cell)? {
        Cell::Bool(value) => Some(*value),
        Cell::Text(value) => Some(value.trim().eq_ignore_ascii_case("YES")),
        Cell::Int(_) | Cell::Float(_) => Some(false),
    }
}
