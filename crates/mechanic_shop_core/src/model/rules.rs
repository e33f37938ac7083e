//! Field rules for shop records.
//!
//! Each rule is a plain function so the console validator and the
//! `validate()` methods apply exactly the same checks.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Oldest model year the shop services.
pub const MIN_MODEL_YEAR: i64 = 1970;
/// Experience is recorded in whole years below this bound.
pub const MAX_EXPERIENCE_YEARS: i64 = 100;

/// A record field that violates its rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trimming.
    EmptyField(&'static str),
    /// Identifier or counter below zero.
    Negative { field: &'static str, value: i64 },
    /// Value outside its allowed range.
    OutOfRange {
        field: &'static str,
        value: i64,
        rule: String,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::OutOfRange { field, value, rule } => {
                write!(f, "{field} must be {rule}, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub fn require_non_negative(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

pub fn require_experience(value: i64) -> Result<(), ValidationError> {
    if !(0..MAX_EXPERIENCE_YEARS).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "experience",
            value,
            rule: format!("between 0 and {}", MAX_EXPERIENCE_YEARS - 1),
        });
    }
    Ok(())
}

pub fn require_model_year(value: i64) -> Result<(), ValidationError> {
    if value < MIN_MODEL_YEAR {
        return Err(ValidationError::OutOfRange {
            field: "year",
            value,
            rule: format!("{MIN_MODEL_YEAR} or later"),
        });
    }
    Ok(())
}

pub fn require_positive(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            rule: "greater than 0".to_string(),
        });
    }
    Ok(())
}

/// Closing date must not precede the date the request was opened.
pub fn require_not_before(
    field: &'static str,
    value: i64,
    earliest: i64,
) -> Result<(), ValidationError> {
    if value < earliest {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            rule: format!("{earliest} or later"),
        });
    }
    Ok(())
}
