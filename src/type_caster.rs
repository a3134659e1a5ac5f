//! Casting of raw step arguments into scalar values.
//!
//! Step text only ever yields strings. Steps that compare against values read
//! back from the browser cast their arguments first, so `5`, `2.5` and
//! `true` compare as a number, a float and a boolean, while a quoted `"5"`
//! stays a string with its quotes removed.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal that is exercised by the unit tests"
)]
static INT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0|-?[1-9]\d*)$").expect("integer pattern should compile"));

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal that is exercised by the unit tests"
)]
static FLOAT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*\.\d+$").expect("float pattern should compile"));

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal that is exercised by the unit tests"
)]
static BOOL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(true|false)$").expect("bool pattern should compile"));

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal that is exercised by the unit tests"
)]
static QUOTED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^('([^']|\\')*'|"([^"]|\\")*")$"#).expect("quoted pattern should compile")
});

/// A step argument after casting.
#[derive(Debug, Clone, PartialEq)]
pub enum StepValue {
    /// An integer within the `i64` range.
    Int(i64),
    /// A non-negative decimal such as `2.5` or `.5`.
    Float(f64),
    /// `true` or `false`, in any letter case.
    Bool(bool),
    /// Any other text, with surrounding quotes removed if present.
    Str(String),
}

impl StepValue {
    /// Convert the value to JSON for comparison against script results.
    ///
    /// Non-finite floats have no JSON form and become `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Int(value) => Value::from(*value),
            Self::Float(value) => Number::from_f64(*value).map_or(Value::Null, Value::Number),
            Self::Bool(value) => Value::Bool(*value),
            Self::Str(value) => Value::String(value.clone()),
        }
    }
}

impl From<StepValue> for Value {
    fn from(value: StepValue) -> Self {
        match value {
            StepValue::Str(text) => Self::String(text),
            other => other.to_json(),
        }
    }
}

impl fmt::Display for StepValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

/// Cast an integer-like string to an `Int`.
///
/// Strings outside the `i64` range are returned unchanged as `Str`.
#[must_use]
pub fn cast_string_to_int(raw: &str) -> StepValue {
    raw.parse::<i64>()
        .ok()
        .filter(|value| value.to_string() == raw)
        .map_or_else(|| StepValue::Str(raw.to_owned()), StepValue::Int)
}

/// Cast a decimal string to a float.
#[must_use]
pub fn cast_string_to_float(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok()
}

/// Cast `true` or `false` (any case) to a bool. Everything else is `false`.
#[must_use]
pub fn cast_string_to_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Strip one pair of matching single or double quotes.
///
/// This lets a step whose pattern captures quotes opt out of the other
/// casts: `"1"` stays the string `1` rather than becoming an integer.
#[must_use]
pub fn cast_quoted_string(raw: &str) -> String {
    ['"', '\'']
        .iter()
        .find_map(|quote| {
            raw.strip_prefix(*quote)
                .and_then(|inner| inner.strip_suffix(*quote))
        })
        .unwrap_or(raw)
        .to_owned()
}

/// Strip the quotes from `raw` only when the whole argument is one quoted
/// string.
///
/// `"a" and "b"` is two quoted strings, so it is returned unchanged.
#[must_use]
pub fn cast_quoted_argument(raw: &str) -> String {
    if QUOTED_PATTERN.is_match(raw) {
        cast_quoted_string(raw)
    } else {
        raw.to_owned()
    }
}

/// Cast a raw step argument by the first pattern it matches.
///
/// Integers are tried first, then floats, booleans and quoted strings. An
/// argument matching none of them is returned as-is.
#[must_use]
pub fn cast_argument(raw: &str) -> StepValue {
    if INT_PATTERN.is_match(raw) {
        return cast_string_to_int(raw);
    }
    if FLOAT_PATTERN.is_match(raw) {
        if let Some(value) = cast_string_to_float(raw) {
            return StepValue::Float(value);
        }
    }
    if BOOL_PATTERN.is_match(raw) {
        return StepValue::Bool(cast_string_to_bool(raw));
    }
    if QUOTED_PATTERN.is_match(raw) {
        return StepValue::Str(cast_quoted_string(raw));
    }
    StepValue::Str(raw.to_owned())
}
