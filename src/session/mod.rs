//! The browser session seam.
//!
//! Every step delegates to a [`BrowserSession`]: an externally owned handle
//! to a live browser-automation connection. This crate never drives a browser
//! itself; hosts implement the trait over their driver of choice and hand the
//! session to a [`crate::suite::Suite`].

use serde_json::Value;
use tracing::{debug, info};

use crate::error::DriverError;

/// A page element located by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    xpath: String,
}

impl Element {
    /// Wrap the absolute XPath of a located element.
    #[must_use]
    pub fn new(xpath: impl Into<String>) -> Self {
        Self {
            xpath: xpath.into(),
        }
    }

    /// The absolute XPath of the element.
    #[must_use]
    pub fn xpath(&self) -> &str {
        &self.xpath
    }
}

/// Behaviour required from a browser-automation session.
///
/// Calls are synchronous and blocking. Implementors own any interior
/// mutability and connection lifecycle; the contexts only borrow the session
/// for the duration of a step.
pub trait BrowserSession {
    /// A short name for the driver, used in unsupported-action errors.
    fn driver_name(&self) -> String;

    /// Whether the session has been started.
    fn is_started(&self) -> bool;

    /// Start the session.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::StartFailed` when the connection cannot be made.
    fn start(&self) -> Result<(), DriverError>;

    /// Evaluate a script in the page and return its result.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::ScriptFailed` when the browser rejects the script.
    fn evaluate_script(&self, script: &str) -> Result<Value, DriverError>;

    /// Execute a script in the page, discarding its result.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::ScriptFailed` when the browser rejects the script.
    fn execute_script(&self, script: &str) -> Result<(), DriverError>;

    /// Find the first element matching a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns a `DriverError` when the lookup itself fails. A selector that
    /// matches nothing is `Ok(None)`.
    fn find_element(&self, css: &str) -> Result<Option<Element>, DriverError>;

    /// Whether the driver can interact with JavaScript alerts.
    fn supports_alerts(&self) -> bool;

    /// Accept (confirm) the open alert.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::NoAlertOpen` when there is no alert.
    fn accept_alert(&self) -> Result<(), DriverError>;

    /// Dismiss (cancel) the open alert.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::NoAlertOpen` when there is no alert.
    fn dismiss_alert(&self) -> Result<(), DriverError>;

    /// Read the text of the open alert.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::NoAlertOpen` when there is no alert.
    fn alert_text(&self) -> Result<String, DriverError>;

    /// Type text into the open prompt.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::NoAlertOpen` when there is no alert.
    fn send_alert_text(&self, text: &str) -> Result<(), DriverError>;
}

/// Shared access to the scenario's browser session.
///
/// Contexts borrow the session through this wrapper so lazy start-up and the
/// alert-capability check live in one place.
#[derive(Debug)]
pub struct SessionContext<S> {
    session: S,
}

impl<S: BrowserSession> SessionContext<S> {
    /// Wrap a session.
    #[must_use]
    pub const fn new(session: S) -> Self {
        Self { session }
    }

    /// The wrapped session.
    #[must_use]
    pub const fn session(&self) -> &S {
        &self.session
    }

    /// Consume the context and return the wrapped session.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.session
    }

    /// Start the session unless it is already running.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::StartFailed` when the session cannot be started.
    pub fn ensure_started(&self) -> Result<(), DriverError> {
        if self.session.is_started() {
            debug!("browser session already started");
            return Ok(());
        }

        info!(driver = %self.session.driver_name(), "starting browser session");
        self.session.start()
    }

    /// Return the session if its driver can handle alerts.
    ///
    /// `action` names the step being attempted and is reported back when the
    /// driver cannot perform it.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::UnsupportedAction` when the driver has no alert
    /// support.
    pub fn assert_alert_driver(&self, action: &str) -> Result<&S, DriverError> {
        if self.session.supports_alerts() {
            Ok(&self.session)
        } else {
            Err(DriverError::UnsupportedAction {
                action: action.to_owned(),
                driver: self.session.driver_name(),
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod mock;
