//! Scenario state for step-suite behavioural tests.

use browser_steps::config::SuiteConfig;
use browser_steps::store::StoreContext;
use browser_steps::suite::Suite;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

use super::StepResult;
use super::browser::FakeBrowser;

/// State shared across step-suite scenarios.
#[derive(Default, ScenarioState)]
pub(crate) struct StepsState {
    /// The fake browser the suite drives.
    pub(crate) browser: Slot<FakeBrowser>,
    /// Suite configuration for the scenario.
    pub(crate) config: Slot<SuiteConfig>,
    /// Store contents carried between steps.
    pub(crate) store: Slot<StoreContext>,
    /// Outcome of the most recent step or hook, with errors rendered.
    pub(crate) outcome: Slot<Result<(), String>>,
}

impl StepsState {
    /// The scenario's browser.
    pub(crate) fn browser(&self) -> StepResult<FakeBrowser> {
        self.browser
            .get()
            .ok_or_else(|| String::from("browser should be set"))
    }

    /// Run `operation` against a suite built from the current state, then
    /// keep its store and record the outcome.
    pub(crate) fn run<F>(&self, operation: F) -> StepResult<()>
    where
        F: FnOnce(&mut Suite<FakeBrowser>) -> browser_steps::error::Result<()>,
    {
        let mut suite = Suite::new(self.browser()?, self.config.get().unwrap_or_default());
        *suite.store_mut() = self.store.get().unwrap_or_default();

        let outcome = operation(&mut suite).map_err(|error| error.to_string());

        self.store.set(suite.store().clone());
        self.outcome.set(outcome);
        Ok(())
    }

    /// The recorded outcome.
    pub(crate) fn outcome(&self) -> StepResult<Result<(), String>> {
        self.outcome
            .get()
            .ok_or_else(|| String::from("no step has run"))
    }
}

#[fixture]
pub(crate) fn steps_state() -> StepsState {
    let state = StepsState::default();
    state.browser.set(FakeBrowser::default());
    state.config.set(SuiteConfig::default());
    state.store.set(StoreContext::new());
    state
}
