//! `mockall` double for [`BrowserSession`] shared by unit tests.

use mockall::mock;
use serde_json::Value;

use super::{BrowserSession, Element};
use crate::error::DriverError;

mock! {
    #[derive(Debug)]
    pub Session {}

    impl BrowserSession for Session {
        fn driver_name(&self) -> String;
        fn is_started(&self) -> bool;
        fn start(&self) -> Result<(), DriverError>;
        fn evaluate_script(&self, script: &str) -> Result<Value, DriverError>;
        fn execute_script(&self, script: &str) -> Result<(), DriverError>;
        fn find_element(&self, css: &str) -> Result<Option<Element>, DriverError>;
        fn supports_alerts(&self) -> bool;
        fn accept_alert(&self) -> Result<(), DriverError>;
        fn dismiss_alert(&self) -> Result<(), DriverError>;
        fn alert_text(&self) -> Result<String, DriverError>;
        fn send_alert_text(&self, text: &str) -> Result<(), DriverError>;
    }
}

/// A started session whose driver supports alerts.
pub(crate) fn alert_capable_session() -> MockSession {
    let mut session = MockSession::new();
    session.expect_supports_alerts().return_const(true);
    session.expect_is_started().return_const(true);
    session
        .expect_driver_name()
        .returning(|| String::from("selenium2"));
    session
}

/// A session that answers every script with `result`.
pub(crate) fn session_evaluating(expected_script: &'static str, result: Value) -> MockSession {
    let mut session = MockSession::new();
    session
        .expect_evaluate_script()
        .withf(move |script| script == expected_script)
        .times(1)
        .returning(move |_| Ok(result.clone()));
    session
}
