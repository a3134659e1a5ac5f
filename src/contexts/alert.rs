//! Steps for JavaScript alerts, confirmations and prompts.

use tracing::debug;

use crate::error::{DriverError, ExpectationError, Result, StepError};
use crate::session::{BrowserSession, SessionContext};

/// Steps that confirm, cancel, read and fill JavaScript alerts.
#[derive(Debug)]
pub struct AlertContext<'a, S> {
    session: &'a SessionContext<S>,
}

impl<'a, S: BrowserSession> AlertContext<'a, S> {
    /// Create the context over a shared session.
    #[must_use]
    pub const fn new(session: &'a SessionContext<S>) -> Self {
        Self { session }
    }

    /// Dismiss any open alert or prompt.
    ///
    /// Does nothing when the session has not been started. An already
    /// closed alert is not an error.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::UnsupportedAction` when the driver cannot handle
    /// alerts, or any other driver failure raised while dismissing.
    pub fn clear_alerts(&self) -> Result<()> {
        if !self.session.session().is_started() {
            debug!("session not started; no alerts to clear");
            return Ok(());
        }

        match self.cancel_alert() {
            Err(StepError::Driver(DriverError::NoAlertOpen)) => {
                debug!("no alert was open");
                Ok(())
            }
            other => other,
        }
    }

    /// Confirm the open alert.
    ///
    /// # Errors
    ///
    /// Returns a `DriverError` when the driver lacks alert support or no
    /// alert is open.
    pub fn confirm_alert(&self) -> Result<()> {
        debug!("confirming alert");
        self.session
            .assert_alert_driver("Confirm Alert")?
            .accept_alert()?;
        Ok(())
    }

    /// Cancel the open alert.
    ///
    /// # Errors
    ///
    /// Returns a `DriverError` when the driver lacks alert support or no
    /// alert is open.
    pub fn cancel_alert(&self) -> Result<()> {
        debug!("cancelling alert");
        self.session
            .assert_alert_driver("Cancel Alert")?
            .dismiss_alert()?;
        Ok(())
    }

    /// Assert that the open alert's text contains `expected`.
    ///
    /// # Errors
    ///
    /// Returns an `ExpectationError` when no alert is open or the text is
    /// missing, and `DriverError::UnsupportedAction` when the driver cannot
    /// read alerts.
    pub fn assert_alert_message(&self, expected: &str) -> Result<()> {
        let session = self.session.assert_alert_driver("Assert Alert")?;
        let actual = match session.alert_text() {
            Ok(text) => text,
            Err(DriverError::NoAlertOpen) => {
                return Err(ExpectationError::new("No alert is open").into());
            }
            Err(other) => return Err(other.into()),
        };
        debug!(%actual, %expected, "checking alert text");

        if actual.contains(expected) {
            Ok(())
        } else {
            Err(ExpectationError::mismatch(
                format!("Text '{expected}' not found in alert"),
                expected,
                actual,
            )
            .into())
        }
    }

    /// Type `message` into the open prompt.
    ///
    /// # Errors
    ///
    /// Returns a `DriverError` when the driver lacks alert support or no
    /// prompt is open.
    pub fn set_alert_text(&self, message: &str) -> Result<()> {
        debug!(%message, "filling prompt");
        self.session
            .assert_alert_driver("Set Alert")?
            .send_alert_text(message)?;
        Ok(())
    }
}
