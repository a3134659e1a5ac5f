//! Semantic error types for browser-steps.
//!
//! Steps report failures through semantic error enums (via `thiserror`) so a
//! host runner can tell an assertion failure apart from a driver that cannot
//! perform the requested action. Opaque errors (`eyre::Report`) are reserved
//! for the binary boundary.

use std::sync::Arc;

use thiserror::Error;

/// The descriptive failure raised when a step's expectation is not met.
///
/// The message is the complete, user-facing description. `expected` and
/// `actual` carry renderings of the compared values where the step has them,
/// so runners can present a diff without parsing the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ExpectationError {
    message: String,
    expected: Option<String>,
    actual: Option<String>,
}

impl ExpectationError {
    /// Create an expectation failure with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Create an expectation failure carrying both compared values.
    #[must_use]
    pub fn mismatch(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            expected: Some(expected.into()),
            actual: Some(actual.into()),
        }
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The expected value, when the failing step compared two values.
    #[must_use]
    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    /// The actual value, when the failing step compared two values.
    #[must_use]
    pub fn actual(&self) -> Option<&str> {
        self.actual.as_deref()
    }
}

/// Errors reported by a browser session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// An alert operation was attempted while no alert was open.
    #[error("no alert is open")]
    NoAlertOpen,

    /// The session's driver cannot perform the requested action.
    #[error("the '{driver}' driver does not support the '{action}' action")]
    UnsupportedAction {
        /// The human-readable name of the step action.
        action: String,
        /// The name of the driver behind the session.
        driver: String,
    },

    /// The session could not be started.
    #[error("failed to start browser session: {message}")]
    StartFailed {
        /// A description of the start failure.
        message: String,
    },

    /// The browser rejected or failed to run a script.
    #[error("script failed: {message}")]
    ScriptFailed {
        /// A description of the script failure.
        message: String,
    },

    /// A script returned a value the step could not interpret.
    #[error("unexpected script result: {message}")]
    UnexpectedResult {
        /// A description of what was expected.
        message: String,
    },
}

/// Errors raised while reading or injecting stored values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Nothing is stored under the key.
    #[error("no value is stored under '{key}'")]
    MissingKey {
        /// The key that was looked up.
        key: String,
    },

    /// The stored value has no such property.
    #[error("the value stored under '{key}' has no property '{property}'")]
    MissingProperty {
        /// The key of the stored value.
        key: String,
        /// The property that was looked up.
        property: String,
    },
}

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The `OrthoConfig` library returned an error while merging layers.
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Top-level error type for step execution.
#[derive(Debug, Error)]
pub enum StepError {
    /// A step's expectation was not met.
    #[error(transparent)]
    Expectation(#[from] ExpectationError),

    /// The browser session failed or refused the action.
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// A stored value could not be resolved.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No step definition matches the step text.
    #[error("undefined step: {text}")]
    UndefinedStep {
        /// The step text as written in the scenario.
        text: String,
    },

    /// A step that needs a table or docstring was run without one.
    #[error("step '{text}' requires a {argument} argument")]
    MissingArgument {
        /// The step text as written in the scenario.
        text: String,
        /// The kind of multiline argument that was expected.
        argument: &'static str,
    },

    /// A captured step argument is outside what the step can act on.
    #[error("invalid step argument '{argument}': {reason}")]
    InvalidArgument {
        /// The argument as captured from the step text.
        argument: String,
        /// Why the argument was rejected.
        reason: String,
    },
}

/// A specialised `Result` type for step operations.
pub type Result<T> = std::result::Result<T, StepError>;
