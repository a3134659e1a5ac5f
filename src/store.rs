//! The scenario's key/value store.
//!
//! Earlier steps capture fixtures under a key; later steps reference them
//! with `(the <property> of <key>)` tokens, which [`StoreContext::inject_stored_values`]
//! resolves before the step runs.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::compare::raw_or_json;
use crate::error::StoreError;
use crate::table::StepTable;

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal that is exercised by the unit tests"
)]
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(the (?P<property>[^)]+) of (?:the )?(?P<key>[^)]+)\)")
        .expect("store token pattern should compile")
});

/// Values captured during a scenario, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct StoreContext {
    values: BTreeMap<String, Value>,
}

impl StoreContext {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Store a value, replacing anything already under `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key_name = key.into();
        debug!(key = %key_name, "storing value");
        self.values.insert(key_name, value.into());
    }

    /// Store a two-column table as an object of its `key | value` rows.
    pub fn set_table(&mut self, key: impl Into<String>, table: &StepTable) {
        let object: Map<String, Value> = table
            .rows_hash()
            .into_iter()
            .map(|(field, value)| (field, Value::String(value)))
            .collect();
        self.set(key, Value::Object(object));
    }

    /// Whether anything is stored under `key`.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MissingKey` when nothing is stored under `key`.
    pub fn get(&self, key: &str) -> Result<&Value, StoreError> {
        self.values.get(key).ok_or_else(|| StoreError::MissingKey {
            key: key.to_owned(),
        })
    }

    /// Read one property of the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MissingKey` or `StoreError::MissingProperty`.
    pub fn property(&self, key: &str, property: &str) -> Result<&Value, StoreError> {
        self.get(key)?
            .get(property)
            .ok_or_else(|| StoreError::MissingProperty {
                key: key.to_owned(),
                property: property.to_owned(),
            })
    }

    /// Replace every `(the <property> of <key>)` token in `text`.
    ///
    /// String properties are substituted verbatim; other values are
    /// substituted as compact JSON. Text without tokens is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` when a token names a missing key or property.
    pub fn inject_stored_values(&self, text: &str) -> Result<String, StoreError> {
        let mut injected = String::with_capacity(text.len());
        let mut cursor = 0;

        for captures in TOKEN_PATTERN.captures_iter(text) {
            let (Some(token), Some(property), Some(key)) = (
                captures.get(0),
                captures.name("property"),
                captures.name("key"),
            ) else {
                continue;
            };
            let value = self.property(key.as_str().trim(), property.as_str().trim())?;
            injected.push_str(text.get(cursor..token.start()).unwrap_or_default());
            injected.push_str(&raw_or_json(value));
            cursor = token.end();
        }

        injected.push_str(text.get(cursor..).unwrap_or_default());
        Ok(injected)
    }
}
