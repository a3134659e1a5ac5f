//! Configuration for a step suite.
//!
//! Configuration loading and precedence merging is handled by the
//! `ortho_config` crate. Precedence, lowest to highest: defaults,
//! configuration file, environment variables, command-line flags.
//!
//! The configuration file is discovered at `.browser-steps.toml` or
//! `~/.config/browser-steps/config.toml` unless a path is given.
//!
//! # Example Configuration
//!
//! ```toml
//! start_session = true
//! clear_alerts_tag = "clearAlertsWhenFinished"
//! default_wait_seconds = 0
//! ```

mod cli;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Cli, Commands, KeywordArg, ListArgs, MatchArgs};
pub use loader::{env_var_names, load_config, load_config_with_env};
pub use types::SuiteConfig;
