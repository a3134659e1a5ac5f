//! Behavioural helpers for step-suite scenarios.
//!
//! Scenarios drive a real [`browser_steps::suite::Suite`] over an in-memory
//! browser, so the feature files read as the step text a host would run.

mod browser;
mod state;
mod steps;

pub(crate) type StepResult<T> = Result<T, String>;

#[expect(
    unused_imports,
    reason = "rstest-bdd discovers step functions via attributes, not runtime usage"
)]
pub(crate) use assertions::*;
pub(crate) use state::{StepsState, steps_state};
#[expect(
    unused_imports,
    reason = "rstest-bdd discovers step functions via attributes, not runtime usage"
)]
pub(crate) use steps::*;
