//! Steps that inspect the page's JavaScript environment.

use serde_json::Value;
use tracing::debug;

use crate::compare::{loosely_equal, raw_or_json, render};
use crate::error::{DriverError, ExpectationError, Result};
use crate::session::{BrowserSession, SessionContext};
use crate::store::StoreContext;
use crate::table::StepTable;
use crate::type_caster::cast_argument;

/// Steps asserting on JavaScript variables in the browser.
#[derive(Debug)]
pub struct JavaScriptContext<'a, S> {
    session: &'a SessionContext<S>,
    store: &'a StoreContext,
}

impl<'a, S: BrowserSession> JavaScriptContext<'a, S> {
    /// Create the context over a shared session and store.
    #[must_use]
    pub const fn new(session: &'a SessionContext<S>, store: &'a StoreContext) -> Self {
        Self { session, store }
    }

    fn evaluate(&self, script: &str) -> Result<Value> {
        debug!(%script, "evaluating script");
        Ok(self.session.session().evaluate_script(script)?)
    }

    /// Assert that `variable` is defined and not null.
    ///
    /// # Errors
    ///
    /// Returns an `ExpectationError` when the variable evaluates to null or
    /// is undefined.
    pub fn assert_variable_has_value(&self, variable: &str) -> Result<()> {
        let result = self.evaluate(&format!("return {variable};"))?;

        if result.is_null() {
            return Err(ExpectationError::new(format!(
                "The custom variable \"{variable}\" is null or does not exist."
            ))
            .into());
        }
        Ok(())
    }

    /// Assert that `typeof variable` is (or, when `negate` is set, is not)
    /// `type_name`.
    ///
    /// # Errors
    ///
    /// Returns an `ExpectationError` when the type check fails.
    pub fn assert_variable_type(&self, variable: &str, negate: bool, type_name: &str) -> Result<()> {
        let result = self.evaluate(&format!("return typeof({variable});"))?;
        let actual = raw_or_json(&result);

        if (actual != type_name) != negate {
            let not = if negate { " not" } else { "" };
            return Err(ExpectationError::mismatch(
                format!("The variable \"{variable}\" should{not} be type {type_name}, but is {actual}"),
                type_name,
                actual,
            )
            .into());
        }
        Ok(())
    }

    /// Selectively compare a JavaScript object against `key | value` rows.
    ///
    /// The variable is serialised with `JSON.stringify` in the browser.
    /// Only the listed keys are checked; structured values are compared by
    /// their compact JSON form.
    ///
    /// # Errors
    ///
    /// Returns an `ExpectationError` for the first missing key or mismatched
    /// value, and `DriverError::UnexpectedResult` when the browser returns
    /// something other than JSON text.
    pub fn assert_json_contents(&self, variable: &str, values: &StepTable) -> Result<()> {
        let returned = self.evaluate(&format!("return JSON.stringify({variable});"))?;
        let (json_text, response) = decode_json_result(returned)?;

        for row in values.hashes() {
            let key = cell(&row, "key");
            let expected_cell = cell(&row, "value");

            let Some(actual_value) = lookup(&response, key).filter(|value| !value.is_null())
            else {
                return Err(ExpectationError::new(format!(
                    "Expected key \"{key}\" was not in the JS variable \"{variable}\"\nActual: {json_text}"
                ))
                .into());
            };

            let expected = raw_or_json(&Value::String(expected_cell.to_owned()));
            let actual = raw_or_json(actual_value);
            if !loosely_equal(&Value::String(actual.clone()), &Value::String(expected.clone())) {
                return Err(ExpectationError::mismatch(
                    format!("Expected \"{expected}\" in {key} position but got \"{actual}\""),
                    expected,
                    actual,
                )
                .into());
            }
        }
        Ok(())
    }

    /// Assert that `variable` equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns an `ExpectationError` when the values differ.
    pub fn assert_variable(&self, variable: &str, expected: &Value) -> Result<()> {
        let actual = self.evaluate(&format!("return {variable};"))?;

        if loosely_equal(&actual, expected) {
            return Ok(());
        }
        let expected_text = render(expected);
        let actual_text = render(&actual);
        Err(ExpectationError::mismatch(
            format!("Expected {expected_text} but got {actual_text}"),
            expected_text,
            actual_text,
        )
        .into())
    }

    /// Assert a table of `variable | value` rows, in order.
    ///
    /// Stored-value tokens in each value are injected and the result is cast
    /// before comparison.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` for an unresolvable token, or the first
    /// `ExpectationError` raised by [`Self::assert_variable`].
    pub fn assert_variables(&self, table: &StepTable) -> Result<()> {
        for (variable, raw) in table.rows_hash() {
            let injected = self.store.inject_stored_values(&raw)?;
            let expected = cast_argument(&injected).to_json();
            self.assert_variable(&variable, &expected)?;
        }
        Ok(())
    }
}

fn cell<'r>(row: &'r [(String, String)], column: &str) -> &'r str {
    row.iter()
        .find(|(header, _)| header == column)
        .map_or("", |(_, value)| value.as_str())
}

fn lookup<'v>(response: &'v Value, key: &str) -> Option<&'v Value> {
    match response {
        Value::Array(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        other => other.get(key),
    }
}

fn decode_json_result(returned: Value) -> Result<(String, Value)> {
    match returned {
        Value::String(text) => {
            let decoded = serde_json::from_str(&text).map_err(|err| DriverError::UnexpectedResult {
                message: format!("JSON.stringify returned invalid JSON: {err}"),
            })?;
            Ok((text, decoded))
        }
        Value::Null => Ok((String::from("null"), Value::Null)),
        other => Err(DriverError::UnexpectedResult {
            message: format!("expected JSON text, got {other}"),
        }
        .into()),
    }
}
