//! `browser-steps` entry point.
//!
//! Lists the step vocabulary and shows how a line of step text resolves. It
//! uses `eyre` for opaque error handling at the application boundary,
//! converting domain-specific errors into human-readable reports.
//!
//! Configuration is loaded with layered precedence via `OrthoConfig`:
//! 1. Application defaults
//! 2. Configuration file (`.browser-steps.toml` or path from `BROWSER_STEPS_CONFIG_PATH`)
//! 3. Environment variables (`BROWSER_STEPS_*`)
//! 4. Command-line arguments

use browser_steps::config::{Cli, Commands, ListArgs, MatchArgs, SuiteConfig, load_config};
use browser_steps::error::{Result as StepsResult, StepError};
use browser_steps::steps::{StepKeyword, find_match, vocabulary};
use browser_steps::type_caster::cast_argument;
use clap::Parser;
use eyre::{Report, Result as EyreResult};
use tracing::Level;

fn main() -> EyreResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli).map_err(Report::from)?;

    run(&cli, &config).map_err(Report::from)
}

/// Execute the CLI command, returning domain-specific errors.
fn run(cli: &Cli, config: &SuiteConfig) -> StepsResult<()> {
    match &cli.command {
        Commands::List(args) => {
            list_steps(args, config);
            Ok(())
        }
        Commands::Match(args) => match_step(args),
    }
}

/// Print every step definition, optionally filtered by keyword.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn list_steps(args: &ListArgs, config: &SuiteConfig) {
    let filter = args.keyword.map(StepKeyword::from);
    for definition in vocabulary()
        .iter()
        .filter(|definition| filter.is_none_or(|keyword| definition.keyword() == keyword))
    {
        println!(
            "{:<5} {}  # {}",
            definition.keyword(),
            definition.pattern().as_str(),
            definition.description()
        );
    }
    println!(
        "Scenarios tagged @{} clear open alerts when they finish.",
        config.clear_alerts_tag
    );
}

/// Print the definition `args.text` resolves to and its cast arguments.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn match_step(args: &MatchArgs) -> StepsResult<()> {
    let text = args.text.join(" ");
    let step = find_match(&text).ok_or_else(|| StepError::UndefinedStep { text: text.clone() })?;
    let definition = step.definition();

    println!("{} {}", definition.keyword(), definition.pattern().as_str());
    println!("  action: {:?}", definition.action());
    for (name, raw) in step.captures() {
        println!("  {name} = {raw} => {}", cast_argument(raw).to_json());
    }
    Ok(())
}
