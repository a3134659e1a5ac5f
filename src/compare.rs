//! Value comparison and rendering for step assertions.
//!
//! Script results arrive as JSON while expectations arrive as step text, so
//! assertions compare loosely: `"5"`, `5` and `5.0` are equal, and booleans
//! compare against the truthiness of the other side.

use std::cmp::Ordering;

use serde_json::{Number, Value};

/// Whether a value counts as true in a boolean context.
///
/// `null`, `false`, `0`, `""`, `"0"` and `[]` are falsy; everything else is
/// truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number
            .as_f64()
            .is_some_and(|float| float.partial_cmp(&0.0) != Some(Ordering::Equal)),
        Value::String(text) => !(text.is_empty() || text == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn numbers_equal(left: &Number, right: &Number) -> bool {
    if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (left.as_u64(), right.as_u64()) {
        return a == b;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => a.partial_cmp(&b) == Some(Ordering::Equal),
        _ => false,
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn string_equals_number(text: &str, number: &Number) -> bool {
    match (parse_numeric(text), number.as_f64()) {
        (Some(parsed), Some(float)) => parsed.partial_cmp(&float) == Some(Ordering::Equal),
        _ => text == number.to_string(),
    }
}

fn strings_equal(left: &str, right: &str) -> bool {
    match (parse_numeric(left), parse_numeric(right)) {
        (Some(a), Some(b)) => a.partial_cmp(&b) == Some(Ordering::Equal),
        _ => left == right,
    }
}

/// Compare two values the way step expectations are checked.
///
/// - `null` equals `null` and any falsy value;
/// - a boolean equals any value with the same truthiness;
/// - numbers compare numerically, including against numeric strings;
/// - two numeric strings compare numerically, other strings exactly;
/// - arrays and objects compare element by element with these rules.
#[must_use]
pub fn loosely_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Null, Value::Null) => true,
        (Value::Null, other) | (other, Value::Null) => !is_truthy(other),
        (Value::Bool(flag), other) | (other, Value::Bool(flag)) => *flag == is_truthy(other),
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Number(number), Value::String(text))
        | (Value::String(text), Value::Number(number)) => string_equals_number(text, number),
        (Value::String(a), Value::String(b)) => strings_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| loosely_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| loosely_equal(x, y)))
        }
        _ => false,
    }
}

/// Render scalars as their literal text and structures as compact JSON.
///
/// Strings are returned without quotes, so a table cell such as `Ada` can be
/// compared with a decoded JSON string directly.
#[must_use]
pub fn raw_or_json(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::from("null"),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Render a value for a failure message.
#[must_use]
pub fn render(value: &Value) -> String {
    raw_or_json(value)
}
