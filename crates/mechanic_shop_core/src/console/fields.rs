//! Field parsers and checks shared by every workflow prompt.

use super::Rejection;
use crate::model::rules::{require_non_negative, require_text};
use crate::model::ValidationError;

/// Free text, trimmed.
pub fn text(input: &str) -> Result<String, Rejection> {
    Ok(input.trim().to_string())
}

/// Base-10 signed integer, surrounding whitespace ignored.
pub fn integer(input: &str) -> Result<i64, Rejection> {
    input.trim().parse::<i64>().map_err(|_| Rejection::Parse {
        input: input.to_string(),
        expected: "an integer",
    })
}

/// Accepts any parsed value.
pub fn accept<T>(_: &T) -> Result<(), Rejection> {
    Ok(())
}

pub fn non_empty(field: &'static str) -> impl Fn(&String) -> Result<(), Rejection> {
    move |value: &String| require_text(field, value).map_err(Rejection::from)
}

pub fn non_negative(field: &'static str) -> impl Fn(&i64) -> Result<(), Rejection> {
    move |value: &i64| require_non_negative(field, *value).map_err(Rejection::from)
}

/// Lifts a model rule into a field check.
pub fn rule<T: Copy>(
    check: impl Fn(T) -> Result<(), ValidationError>,
) -> impl Fn(&T) -> Result<(), Rejection> {
    move |value: &T| check(*value).map_err(Rejection::from)
}
