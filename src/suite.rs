//! Composition of the contexts into a runnable suite.
//!
//! A [`Suite`] owns the scenario's session, store and configuration. Hosts
//! call [`Suite::before_scenario`] and [`Suite::after_scenario`] from their
//! runner's hooks and route step text through [`Suite::run_step`].

use std::num::ParseIntError;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::SuiteConfig;
use crate::contexts::{AlertContext, JavaScriptContext, PageContext, PopupKind};
use crate::error::{Result, StepError};
use crate::session::{BrowserSession, SessionContext};
use crate::steps::{ArgumentKind, StepAction, StepMatch, find_match};
use crate::store::StoreContext;
use crate::table::StepTable;
use crate::type_caster::{cast_argument, cast_quoted_argument};

/// The multiline argument attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StepArgument {
    /// The step has no multiline argument.
    #[default]
    None,
    /// A data table.
    Table(StepTable),
    /// A docstring.
    DocString(String),
}

/// The session, store and configuration for one scenario at a time.
#[derive(Debug)]
pub struct Suite<S> {
    session: SessionContext<S>,
    store: StoreContext,
    config: SuiteConfig,
}

impl<S: BrowserSession> Suite<S> {
    /// Create a suite over `session`.
    #[must_use]
    pub const fn new(session: S, config: SuiteConfig) -> Self {
        Self {
            session: SessionContext::new(session),
            store: StoreContext::new(),
            config,
        }
    }

    /// The suite configuration.
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// The shared session.
    #[must_use]
    pub const fn session(&self) -> &SessionContext<S> {
        &self.session
    }

    /// The scenario's store.
    #[must_use]
    pub const fn store(&self) -> &StoreContext {
        &self.store
    }

    /// Mutable access to the scenario's store.
    pub const fn store_mut(&mut self) -> &mut StoreContext {
        &mut self.store
    }

    /// Consume the suite and return the session.
    #[must_use]
    pub fn into_session(self) -> S {
        self.session.into_inner()
    }

    /// Alert steps.
    #[must_use]
    pub const fn alerts(&self) -> AlertContext<'_, S> {
        AlertContext::new(&self.session)
    }

    /// JavaScript variable steps.
    #[must_use]
    pub const fn javascript(&self) -> JavaScriptContext<'_, S> {
        JavaScriptContext::new(&self.session, &self.store)
    }

    /// Page steps.
    #[must_use]
    pub const fn page(&self) -> PageContext<'_, S> {
        PageContext::new(&self.session)
    }

    /// Prepare for a scenario: empty the store and, if configured, start the
    /// session.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::StartFailed` when the session cannot start.
    pub fn before_scenario(&mut self) -> Result<()> {
        self.store = StoreContext::new();
        if self.config.start_session {
            self.session.ensure_started()?;
        }
        Ok(())
    }

    /// Finish a scenario, clearing alerts when its tags ask for it.
    ///
    /// # Errors
    ///
    /// Returns any driver failure raised while dismissing the alert.
    pub fn after_scenario<T: AsRef<str>>(&self, tags: &[T]) -> Result<()> {
        if self.config.clears_alerts_for(tags) {
            info!(tag = %self.config.clear_alerts_tag, "clearing alerts after scenario");
            self.alerts().clear_alerts()?;
        }
        Ok(())
    }

    /// Match `text` against the vocabulary and run the step.
    ///
    /// # Errors
    ///
    /// Returns `StepError::UndefinedStep` when nothing matches,
    /// `StepError::MissingArgument` when a table or docstring step is given
    /// the wrong argument, `StepError::InvalidArgument` for a delay that does
    /// not fit a browser timer, and otherwise whatever the step raises.
    pub fn run_step(&mut self, text: &str, argument: StepArgument) -> Result<()> {
        let step = find_match(text).ok_or_else(|| StepError::UndefinedStep {
            text: text.to_owned(),
        })?;
        let action = step.definition().action();
        debug!(?action, %text, "running step");

        match (action.argument(), argument) {
            (None, _) => self.run_simple(action, &step, text),
            (Some(ArgumentKind::Table), StepArgument::Table(table)) => {
                self.run_with_table(action, &step, &table)
            }
            (Some(ArgumentKind::DocString), StepArgument::DocString(content)) => {
                self.store.set(capture(&step, "key"), Value::String(content));
                Ok(())
            }
            (Some(kind), _) => Err(StepError::MissingArgument {
                text: text.to_owned(),
                argument: kind.as_str(),
            }),
        }
    }

    fn run_with_table(
        &mut self,
        action: StepAction,
        step: &StepMatch<'_>,
        table: &StepTable,
    ) -> Result<()> {
        match action {
            StepAction::AssertJsonContents => self
                .javascript()
                .assert_json_contents(capture(step, "variable"), table),
            StepAction::AssertVariables => self.javascript().assert_variables(table),
            _ => {
                self.store.set_table(capture(step, "key"), table);
                Ok(())
            }
        }
    }

    fn run_simple(
        &mut self,
        action: StepAction,
        step: &StepMatch<'_>,
        text: &str,
    ) -> Result<()> {
        match action {
            StepAction::ClearAlerts => self.alerts().clear_alerts(),
            StepAction::ConfirmAlert => self.alerts().confirm_alert(),
            StepAction::CancelAlert => self.alerts().cancel_alert(),
            StepAction::AssertAlertMessage => {
                self.alerts().assert_alert_message(capture(step, "expected"))
            }
            StepAction::SetAlertText => self.alerts().set_alert_text(capture(step, "message")),
            StepAction::AssertVariableHasValue => self
                .javascript()
                .assert_variable_has_value(capture(step, "variable")),
            StepAction::AssertVariableType => self.javascript().assert_variable_type(
                capture(step, "variable"),
                !capture(step, "not").is_empty(),
                capture(step, "type"),
            ),
            StepAction::AssertVariable => {
                let expected = cast_argument(capture(step, "expected")).to_json();
                self.javascript()
                    .assert_variable(capture(step, "variable"), &expected)
            }
            StepAction::StoreValue => {
                let value = cast_argument(capture(step, "value")).to_json();
                self.store.set(capture(step, "key"), value);
                Ok(())
            }
            StepAction::VisitPathDelayed => {
                let seconds = match step.capture("timeout") {
                    Some(raw) => raw.parse::<u64>().map_err(|error: ParseIntError| {
                        StepError::InvalidArgument {
                            argument: raw.to_owned(),
                            reason: error.to_string(),
                        }
                    })?,
                    None => self.config.default_wait_seconds,
                };
                self.page()
                    .visit_path_delayed(capture(step, "path"), seconds)
            }
            StepAction::OpenPopup => {
                let kind = popup_kind(step)?;
                self.page()
                    .open_popup(kind, &cast_quoted_argument(capture(step, "text")))
            }
            StepAction::AssertPopupResult => {
                let kind = popup_kind(step)?;
                let expected = popup_expectation(capture(step, "value"));
                self.page().assert_popup_result(kind, &expected)
            }
            StepAction::AssertImageLoaded => self
                .page()
                .assert_image_loaded(capture(step, "src"), capture(step, "locator")),
            StepAction::AssertImageNotLoaded => self
                .page()
                .assert_image_not_loaded(capture(step, "locator")),
            StepAction::AssertJsonContents
            | StepAction::AssertVariables
            | StepAction::StoreTable
            | StepAction::StoreString => Err(StepError::MissingArgument {
                text: text.to_owned(),
                argument: action.argument().map_or("multiline", ArgumentKind::as_str),
            }),
        }
    }
}

fn capture<'m>(step: &'m StepMatch<'_>, name: &str) -> &'m str {
    step.capture(name).unwrap_or_default()
}

fn popup_kind(step: &StepMatch<'_>) -> Result<PopupKind> {
    let raw = capture(step, "type");
    raw.parse()
        .map_err(|_| StepError::UndefinedStep { text: raw.to_owned() })
}

/// The value a popup is expected to have returned.
///
/// `null` is what a cancelled prompt returns, so it is read as JSON null
/// rather than the text "null".
fn popup_expectation(raw: &str) -> Value {
    if raw == "null" {
        Value::Null
    } else {
        cast_argument(raw).to_json()
    }
}
