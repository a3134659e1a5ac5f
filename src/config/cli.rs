//! Command-line argument definitions for browser-steps.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};

use crate::steps::StepKeyword;

/// Command-line interface for browser-steps.
#[derive(Debug, Parser)]
#[command(name = "browser-steps")]
#[command(
    author,
    version,
    about = "Inspect the browser step vocabulary"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Scenario tag that clears open alerts after the scenario.
    #[arg(long, global = true)]
    pub clear_alerts_tag: Option<String>,

    /// Log at debug level.
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every step definition.
    List(ListArgs),

    /// Show which definition a step matches and its cast arguments.
    Match(MatchArgs),
}

/// Keyword filter accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeywordArg {
    /// `Given` steps.
    Given,
    /// `When` steps.
    When,
    /// `Then` steps.
    Then,
}

impl From<KeywordArg> for StepKeyword {
    fn from(value: KeywordArg) -> Self {
        match value {
            KeywordArg::Given => Self::Given,
            KeywordArg::When => Self::When,
            KeywordArg::Then => Self::Then,
        }
    }
}

/// Arguments for the `list` subcommand.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Only list definitions for this keyword.
    #[arg(long, value_enum)]
    pub keyword: Option<KeywordArg>,
}

/// Arguments for the `match` subcommand.
#[derive(Debug, Parser)]
pub struct MatchArgs {
    /// Step text, with or without its leading keyword.
    #[arg(required = true, trailing_var_arg = true)]
    pub text: Vec<String>,
}
