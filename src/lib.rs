//! Reusable step definitions for behaviour-driven browser tests.
//!
//! `browser-steps` bundles step contexts for JavaScript alerts, JavaScript
//! variable assertions, step-argument casting and a per-scenario value store.
//! Every step delegates to an injected [`session::BrowserSession`] and raises
//! a descriptive [`error::ExpectationError`] when the browser disagrees with
//! the scenario.
//!
//! # Architecture
//!
//! The crate drives no browser itself. Hosts implement
//! [`session::BrowserSession`] over their driver, wrap it in a
//! [`suite::Suite`], call the scenario hooks from their runner, and route
//! step text through [`suite::Suite::run_step`].
//!
//! # Modules
//!
//! - [`config`]: Suite configuration with layered precedence (CLI > env > file > defaults)
//! - [`contexts`]: Alert, JavaScript and page step contexts
//! - [`error`]: Semantic error types
//! - [`session`]: The browser session seam
//! - [`steps`]: The step vocabulary and matcher
//! - [`store`]: Scenario store and stored-value injection
//! - [`suite`]: Composition root and step dispatch
//! - [`type_caster`]: Casting of raw step arguments

pub mod compare;
pub mod config;
pub mod contexts;
pub mod error;
pub mod session;
pub mod steps;
pub mod store;
pub mod suite;
pub mod table;
pub mod type_caster;
