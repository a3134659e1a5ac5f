//! Given/when steps for step-suite scenarios.

use browser_steps::config::SuiteConfig;
use browser_steps::suite::StepArgument;
use browser_steps::table::StepTable;
use rstest_bdd_macros::{given, when};
use serde_json::Value;

use super::StepResult;
use super::state::StepsState;

#[given("a started browser")]
fn given_started_browser(steps_state: &StepsState) -> StepResult<()> {
    steps_state.browser()?.set_started(true);
    Ok(())
}

#[given("a browser that has not been started")]
fn given_idle_browser(steps_state: &StepsState) -> StepResult<()> {
    steps_state.browser()?.set_started(false);
    Ok(())
}

#[given("the browser is driven by {driver} without alert support")]
fn given_driver_without_alerts(steps_state: &StepsState, driver: String) -> StepResult<()> {
    steps_state.browser()?.set_driver(&driver, false);
    Ok(())
}

#[given("the browser shows an alert reading {text}")]
fn given_alert(steps_state: &StepsState, text: String) -> StepResult<()> {
    steps_state.browser()?.show_alert(&text);
    Ok(())
}

#[given("the javascript variable {name} holds {json}")]
fn given_variable(steps_state: &StepsState, name: String, json: String) -> StepResult<()> {
    let value: Value =
        serde_json::from_str(&json).map_err(|e| format!("invalid JSON '{json}': {e}"))?;
    steps_state.browser()?.set_variable(&name, value);
    Ok(())
}

#[given("the page has a loaded image {id} showing {src}")]
fn given_loaded_image(steps_state: &StepsState, id: String, src: String) -> StepResult<()> {
    steps_state.browser()?.add_image(&id, &src, true);
    Ok(())
}

#[given("the page has a broken image {id} showing {src}")]
fn given_broken_image(steps_state: &StepsState, id: String, src: String) -> StepResult<()> {
    steps_state.browser()?.add_image(&id, &src, false);
    Ok(())
}

#[given("the suite waits {seconds} seconds by default")]
fn given_default_wait(steps_state: &StepsState, seconds: u64) {
    let config = steps_state.config.get().unwrap_or_default();
    steps_state.config.set(SuiteConfig {
        default_wait_seconds: seconds,
        ..config
    });
}

#[given("the suite does not start sessions")]
fn given_no_session_start(steps_state: &StepsState) {
    let config = steps_state.config.get().unwrap_or_default();
    steps_state.config.set(SuiteConfig {
        start_session: false,
        ..config
    });
}

#[when("the scenario starts")]
fn when_scenario_starts(steps_state: &StepsState) -> StepResult<()> {
    steps_state.run(|suite| suite.before_scenario())
}

#[when("the scenario tagged {tags} finishes")]
fn when_scenario_finishes(steps_state: &StepsState, tags: String) -> StepResult<()> {
    let tag_list: Vec<&str> = tags.split_whitespace().collect();
    steps_state.run(|suite| suite.after_scenario(&tag_list))
}

#[when("the step runs: {text}")]
fn when_step_runs(steps_state: &StepsState, text: String) -> StepResult<()> {
    steps_state.run(|suite| suite.run_step(&text, StepArgument::None))
}

#[when("the table step runs: {text}")]
fn when_table_step_runs(
    steps_state: &StepsState,
    text: String,
    datatable: Vec<Vec<String>>,
) -> StepResult<()> {
    let table = StepTable::new(datatable);
    steps_state.run(|suite| suite.run_step(&text, StepArgument::Table(table)))
}

#[when("the docstring step runs: {text}")]
fn when_docstring_step_runs(
    steps_state: &StepsState,
    text: String,
    docstring: String,
) -> StepResult<()> {
    steps_state.run(|suite| suite.run_step(&text, StepArgument::DocString(docstring)))
}
