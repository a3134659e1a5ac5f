//! An in-memory browser implementing `BrowserSession` for behavioural tests.
//!
//! The fake understands exactly the scripts the step contexts send: variable
//! reads, `typeof`, `JSON.stringify`, popup results, the image-load probe,
//! delayed navigation and popup creation. Clones share one model, so the
//! scenario state and the suite under test observe the same browser.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use browser_steps::error::DriverError;
use browser_steps::session::{BrowserSession, Element};
use serde_json::Value;

/// How the last alert was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AlertOutcome {
    Accepted,
    Dismissed,
}

/// An image element on the fake page.
#[derive(Debug, Clone)]
struct Image {
    xpath: String,
    src: String,
    loaded: bool,
}

/// An open popup and what opened it.
#[derive(Debug, Clone)]
struct Popup {
    kind: Option<String>,
    text: String,
    typed: Option<String>,
}

#[derive(Debug)]
struct Model {
    driver: String,
    started: bool,
    supports_alerts: bool,
    popup: Option<Popup>,
    last_outcome: Option<AlertOutcome>,
    last_typed: Option<String>,
    variables: HashMap<String, Value>,
    images: HashMap<String, Image>,
    executed: Vec<String>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            driver: String::from("selenium2"),
            started: false,
            supports_alerts: true,
            popup: None,
            last_outcome: None,
            last_typed: None,
            variables: HashMap::new(),
            images: HashMap::new(),
            executed: Vec::new(),
        }
    }
}

/// Shared handle to the fake browser.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeBrowser {
    model: Arc<Mutex<Model>>,
}

impl FakeBrowser {
    fn model(&self) -> MutexGuard<'_, Model> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set_driver(&self, driver: &str, supports_alerts: bool) {
        let mut model = self.model();
        model.driver = driver.to_owned();
        model.supports_alerts = supports_alerts;
    }

    pub(crate) fn set_started(&self, started: bool) {
        self.model().started = started;
    }

    pub(crate) fn show_alert(&self, text: &str) {
        self.model().popup = Some(Popup {
            kind: None,
            text: text.to_owned(),
            typed: None,
        });
    }

    pub(crate) fn set_variable(&self, name: &str, value: Value) {
        self.model().variables.insert(name.to_owned(), value);
    }

    pub(crate) fn add_image(&self, id: &str, src: &str, loaded: bool) {
        let mut model = self.model();
        let xpath = format!("(//html/body/img)[{}]", model.images.len() + 1);
        model.images.insert(
            id.to_owned(),
            Image {
                xpath,
                src: src.to_owned(),
                loaded,
            },
        );
    }

    pub(crate) fn is_alert_open(&self) -> bool {
        self.model().popup.is_some()
    }

    pub(crate) fn last_outcome(&self) -> Option<AlertOutcome> {
        self.model().last_outcome.clone()
    }

    pub(crate) fn last_typed(&self) -> Option<String> {
        self.model().last_typed.clone()
    }

    pub(crate) fn executed_scripts(&self) -> Vec<String> {
        self.model().executed.clone()
    }

    fn close_popup(&self, outcome: AlertOutcome) -> Result<(), DriverError> {
        let mut model = self.model();
        let popup = model.popup.take().ok_or(DriverError::NoAlertOpen)?;
        if let Some(kind) = popup.kind {
            let result = match (kind.as_str(), &outcome) {
                ("confirm", AlertOutcome::Accepted) => Value::Bool(true),
                ("confirm", AlertOutcome::Dismissed) => Value::Bool(false),
                ("prompt", AlertOutcome::Accepted) => {
                    Value::String(popup.typed.clone().unwrap_or_default())
                }
                _ => Value::Null,
            };
            model.variables.insert(format!("{kind}_result"), result);
        }
        model.last_typed = popup.typed;
        model.last_outcome = Some(outcome);
        Ok(())
    }
}

fn type_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Null | Value::Array(_) | Value::Object(_)) => "object",
    }
}

fn read_variable<'m>(model: &'m Model, expression: &str) -> Option<&'m Value> {
    let mut segments = expression.split('.');
    let root = model.variables.get(segments.next()?)?;
    segments.try_fold(root, |value, segment| match value {
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        other => other.get(segment),
    })
}

impl BrowserSession for FakeBrowser {
    fn driver_name(&self) -> String {
        self.model().driver.clone()
    }

    fn is_started(&self) -> bool {
        self.model().started
    }

    fn start(&self) -> Result<(), DriverError> {
        self.model().started = true;
        Ok(())
    }

    fn evaluate_script(&self, script: &str) -> Result<Value, DriverError> {
        let model = self.model();
        if script.contains("document.evaluate(xpath") {
            let loaded = model.images.values().any(|image| {
                script.contains(&format!("\"{}\"", image.xpath))
                    && image.loaded
                    && (script.ends_with("null);")
                        || script.contains(&format!("\"{}\");", image.src)))
            });
            return Ok(Value::Bool(loaded));
        }

        let body = script
            .strip_prefix("return ")
            .and_then(|rest| rest.strip_suffix(';'))
            .ok_or_else(|| DriverError::ScriptFailed {
                message: format!("unsupported script: {script}"),
            })?;

        if let Some(inner) = body.strip_prefix("typeof(").and_then(|r| r.strip_suffix(')')) {
            return Ok(Value::String(type_of(read_variable(&model, inner)).to_owned()));
        }
        if let Some(inner) = body
            .strip_prefix("JSON.stringify(")
            .and_then(|r| r.strip_suffix(')'))
        {
            return Ok(read_variable(&model, inner)
                .map_or(Value::Null, |value| Value::String(value.to_string())));
        }
        Ok(read_variable(&model, body).cloned().unwrap_or(Value::Null))
    }

    fn execute_script(&self, script: &str) -> Result<(), DriverError> {
        let mut model = self.model();
        model.executed.push(script.to_owned());

        if let Some((target, call)) = script.split_once("_result = ") {
            let text = call
                .strip_prefix(target)
                .and_then(|rest| rest.strip_prefix('('))
                .and_then(|rest| rest.strip_suffix(')'))
                .and_then(|json| serde_json::from_str::<String>(json).ok())
                .ok_or_else(|| DriverError::ScriptFailed {
                    message: format!("malformed popup script: {script}"),
                })?;
            model.popup = Some(Popup {
                kind: Some(target.to_owned()),
                text,
                typed: None,
            });
        }
        Ok(())
    }

    fn find_element(&self, css: &str) -> Result<Option<Element>, DriverError> {
        let model = self.model();
        Ok(css
            .strip_prefix("img#")
            .and_then(|id| model.images.get(id))
            .map(|image| Element::new(image.xpath.clone())))
    }

    fn supports_alerts(&self) -> bool {
        self.model().supports_alerts
    }

    fn accept_alert(&self) -> Result<(), DriverError> {
        self.close_popup(AlertOutcome::Accepted)
    }

    fn dismiss_alert(&self) -> Result<(), DriverError> {
        self.close_popup(AlertOutcome::Dismissed)
    }

    fn alert_text(&self) -> Result<String, DriverError> {
        self.model()
            .popup
            .as_ref()
            .map(|popup| popup.text.clone())
            .ok_or(DriverError::NoAlertOpen)
    }

    fn send_alert_text(&self, text: &str) -> Result<(), DriverError> {
        let mut model = self.model();
        let popup = model.popup.as_mut().ok_or(DriverError::NoAlertOpen)?;
        popup.typed = Some(text.to_owned());
        Ok(())
    }
}
