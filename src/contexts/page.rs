//! Steps that drive the page directly: popups, delayed navigation and image
//! loading checks.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::compare::is_truthy;
use crate::error::{ExpectationError, Result, StepError};
use crate::session::{BrowserSession, SessionContext};

/// The longest delay a browser timer honours; longer ones fire immediately.
const MAX_TIMER_MILLIS: u64 = 2_147_483_647;

/// The three kinds of JavaScript popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    /// `window.alert`.
    Alert,
    /// `window.confirm`.
    Confirm,
    /// `window.prompt`.
    Prompt,
}

impl PopupKind {
    /// The JavaScript function name for the popup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Confirm => "confirm",
            Self::Prompt => "prompt",
        }
    }
}

impl fmt::Display for PopupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PopupKind {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "alert" => Ok(Self::Alert),
            "confirm" => Ok(Self::Confirm),
            "prompt" => Ok(Self::Prompt),
            other => Err(format!("unknown popup kind '{other}'")),
        }
    }
}

/// Steps acting on the page through scripts and element lookups.
#[derive(Debug)]
pub struct PageContext<'a, S> {
    session: &'a SessionContext<S>,
}

impl<'a, S: BrowserSession> PageContext<'a, S> {
    /// Create the context over a shared session.
    #[must_use]
    pub const fn new(session: &'a SessionContext<S>) -> Self {
        Self { session }
    }

    fn execute(&self, script: &str) -> Result<()> {
        debug!(%script, "executing script");
        Ok(self.session.session().execute_script(script)?)
    }

    fn evaluate(&self, script: &str) -> Result<Value> {
        debug!(%script, "evaluating script");
        Ok(self.session.session().evaluate_script(script)?)
    }

    /// Schedule navigation to `path` after `seconds`.
    ///
    /// # Errors
    ///
    /// Returns `StepError::InvalidArgument` when the delay is longer than a
    /// browser timer can hold, and a `DriverError` when the browser rejects
    /// the script.
    pub fn visit_path_delayed(&self, path: &str, seconds: u64) -> Result<()> {
        let target = Value::String(path.to_owned());
        let millis = seconds
            .checked_mul(1000)
            .filter(|millis| *millis <= MAX_TIMER_MILLIS)
            .ok_or_else(|| StepError::InvalidArgument {
                argument: seconds.to_string(),
                reason: format!("a delay must be at most {} seconds", MAX_TIMER_MILLIS / 1000),
            })?;
        self.execute(&format!(
            "window.setTimeout(function() {{ window.location = {target}; }}, {millis});"
        ))
    }

    /// Open a popup showing `text` and keep its return value in
    /// `<kind>_result`.
    ///
    /// # Errors
    ///
    /// Returns a `DriverError` when the browser rejects the script.
    pub fn open_popup(&self, kind: PopupKind, text: &str) -> Result<()> {
        let message = Value::String(text.to_owned());
        self.execute(&format!("{kind}_result = {kind}({message})"))
    }

    /// Assert the value a popup opened by [`Self::open_popup`] returned.
    ///
    /// The comparison is strict: `"1"` does not equal `1`.
    ///
    /// # Errors
    ///
    /// Returns an `ExpectationError` when the values differ.
    pub fn assert_popup_result(&self, kind: PopupKind, expected: &Value) -> Result<()> {
        let actual = self.evaluate(&format!("return {kind}_result;"))?;

        if &actual == expected {
            return Ok(());
        }
        Err(ExpectationError::mismatch(
            format!("Expected {expected}, got {actual}"),
            expected.to_string(),
            actual.to_string(),
        )
        .into())
    }

    /// Assert that `img#<locator>` exists and finished loading `src`.
    ///
    /// # Errors
    ///
    /// Returns an `ExpectationError` when the image is missing or did not
    /// load.
    pub fn assert_image_loaded(&self, src: &str, locator: &str) -> Result<()> {
        let xpath = self.find_image(locator)?;
        if self.check_image_loaded(&xpath, Some(src))? {
            Ok(())
        } else {
            Err(ExpectationError::new(format!(
                "Expected img '{locator}' to load. Instead it did not!"
            ))
            .into())
        }
    }

    /// Assert that `img#<locator>` exists but did not load.
    ///
    /// # Errors
    ///
    /// Returns an `ExpectationError` when the image is missing or did load.
    pub fn assert_image_not_loaded(&self, locator: &str) -> Result<()> {
        let xpath = self.find_image(locator)?;
        if self.check_image_loaded(&xpath, None)? {
            Err(ExpectationError::new(format!(
                "Expected img '{locator}' to not load. Instead it did load!"
            ))
            .into())
        } else {
            Ok(())
        }
    }

    fn find_image(&self, locator: &str) -> Result<String> {
        self.session
            .session()
            .find_element(&format!("img#{locator}"))?
            .map(|element| element.xpath().to_owned())
            .ok_or_else(|| {
                ExpectationError::new(format!(
                    "Expected an img tag with id '{locator}'. Found none!"
                ))
                .into()
            })
    }

    /// Whether the image at `xpath` completed loading with a non-zero
    /// natural width, and, when `src` is given, whether its source ends with
    /// `src`.
    ///
    /// # Errors
    ///
    /// Returns a `DriverError` when the browser rejects the script.
    pub fn check_image_loaded(&self, xpath: &str, src: Option<&str>) -> Result<bool> {
        let xpath_literal = Value::String(xpath.to_owned());
        let src_literal = src.map_or(Value::Null, |value| Value::String(value.to_owned()));
        let script = format!(
            "return (function (xpath, src) {{ \
             var img = document.evaluate(xpath, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue; \
             if (!img || !img.complete || img.naturalWidth === 0) {{ return false; }} \
             return src === null || img.src.slice(-src.length) === src; \
             }})({xpath_literal}, {src_literal});"
        );
        Ok(is_truthy(&self.evaluate(&script)?))
    }
}
