//! Configuration loading with layered precedence.
//!
//! Layers are composed manually with `MergeComposer` rather than through the
//! derived `load()`. The CLI owns subcommand dispatch, so `SuiteConfig`
//! cannot own the whole argument parse, and typed environment variables
//! must fail fast instead of being silently ignored.
//!
//! # Environment Variable Handling
//!
//! `BROWSER_STEPS_START_SESSION=maybe` is an error, not a silent fallback to
//! the default. String fields such as `BROWSER_STEPS_CLEAR_ALERTS_TAG` are
//! always accepted.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use ortho_config::discovery::ConfigDiscovery;
use ortho_config::serde_json::{self, Map, Value};
use ortho_config::{MergeComposer, toml};
use tracing::debug;

use crate::config::{Cli, SuiteConfig};
use crate::error::{ConfigError, Result};

/// The type of value expected from an environment variable.
#[derive(Clone, Copy)]
enum EnvVarType {
    /// String value (always accepted).
    String,
    /// Boolean value (`true`/`false`). Invalid values return an error.
    Bool,
    /// Unsigned 64-bit integer. Invalid values return an error.
    U64,
}

/// Mapping from one environment variable to a config field.
struct EnvVarSpec {
    env_var: &'static str,
    field: &'static str,
    var_type: EnvVarType,
}

const ENV_VAR_SPECS: &[EnvVarSpec] = &[
    EnvVarSpec {
        env_var: "BROWSER_STEPS_START_SESSION",
        field: "start_session",
        var_type: EnvVarType::Bool,
    },
    EnvVarSpec {
        env_var: "BROWSER_STEPS_CLEAR_ALERTS_TAG",
        field: "clear_alerts_tag",
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "BROWSER_STEPS_DEFAULT_WAIT_SECONDS",
        field: "default_wait_seconds",
        var_type: EnvVarType::U64,
    },
];

/// Returns the environment variable names recognised by the loader.
#[must_use]
pub fn env_var_names() -> Vec<&'static str> {
    ENV_VAR_SPECS.iter().map(|spec| spec.env_var).collect()
}

/// Read a TOML configuration file through `cap_std` and push it as the file
/// layer.
fn load_config_file(path: &Utf8PathBuf, composer: &mut MergeComposer) -> Result<()> {
    let current_dir = Utf8PathBuf::from(".");
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| current_dir.as_ref());
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to open directory {parent}: {e}"),
        }
    })?;

    let content = dir
        .read_to_string(file_name)
        .map_err(|e| ConfigError::ParseError {
            message: format!("failed to read {path}: {e}"),
        })?;

    let value =
        toml::from_str::<serde_json::Value>(&content).map_err(|e| ConfigError::ParseError {
            message: format!("failed to parse {path}: {e}"),
        })?;

    debug!(%path, "loaded configuration file");
    composer.push_file(value, Some(path.clone()));
    Ok(())
}

fn discover_config_path(cli: &Cli) -> Option<Utf8PathBuf> {
    cli.config.clone().filter(|p| p.exists()).or_else(|| {
        let discovery = ConfigDiscovery::builder("browser-steps")
            .env_var("BROWSER_STEPS_CONFIG_PATH")
            .config_file_name("config.toml")
            .dotfile_name(".browser-steps.toml")
            .build();
        discovery
            .candidates()
            .into_iter()
            .filter(|p| p.exists())
            .find_map(|p| Utf8PathBuf::try_from(p).ok())
    })
}

/// Load configuration with full layer precedence from the process
/// environment.
///
/// # Errors
///
/// Returns `ConfigError` for malformed files, unparseable typed environment
/// variables or an empty clear-alerts tag.
pub fn load_config(cli: &Cli) -> Result<SuiteConfig> {
    load_config_with_env(cli, &mockable::DefaultEnv::new())
}

/// Load configuration with full layer precedence, reading environment
/// variables through `env`.
///
/// # Errors
///
/// Returns `ConfigError` for malformed files, unparseable typed environment
/// variables or an empty clear-alerts tag.
pub fn load_config_with_env<E: mockable::Env>(cli: &Cli, env: &E) -> Result<SuiteConfig> {
    let mut composer = MergeComposer::new();

    let defaults =
        serde_json::to_value(SuiteConfig::default()).map_err(|e| ConfigError::ParseError {
            message: format!("failed to serialise defaults: {e}"),
        })?;
    composer.push_defaults(defaults);

    if let Some(ref path) = discover_config_path(cli) {
        load_config_file(path, &mut composer)?;
    }

    let env_values = collect_env_vars(env)?;
    if !env_values.is_null() {
        composer.push_environment(env_values);
    }

    let cli_overrides = build_cli_overrides(cli);
    if !cli_overrides.is_null() {
        composer.push_cli(cli_overrides);
    }

    let config =
        SuiteConfig::merge_from_layers(composer.layers()).map_err(ConfigError::OrthoConfig)?;

    if config.clear_alerts_tag.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: String::from("clear_alerts_tag"),
            reason: String::from("cannot be empty"),
        }
        .into());
    }
    Ok(config)
}

/// Collect `BROWSER_STEPS_*` environment variables into a JSON object.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if a typed variable has an
/// unparseable value.
pub(crate) fn collect_env_vars<E: mockable::Env>(env: &E) -> Result<Value> {
    let mut root = Map::new();

    for spec in ENV_VAR_SPECS {
        let Some(raw_value) = env.string(spec.env_var) else {
            continue;
        };

        let json_value = match spec.var_type {
            EnvVarType::String => Value::String(raw_value),
            EnvVarType::Bool => match raw_value.parse::<bool>() {
                Ok(b) => Value::Bool(b),
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        field: spec.env_var.to_owned(),
                        reason: format!("expected bool (true/false), got '{raw_value}'"),
                    }
                    .into());
                }
            },
            EnvVarType::U64 => match raw_value.parse::<u64>() {
                Ok(n) => Value::Number(n.into()),
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        field: spec.env_var.to_owned(),
                        reason: format!("expected unsigned integer, got '{raw_value}'"),
                    }
                    .into());
                }
            },
        };

        root.insert(spec.field.to_owned(), json_value);
    }

    if root.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Object(root))
    }
}

/// Build a JSON value containing CLI overrides.
fn build_cli_overrides(cli: &Cli) -> Value {
    let mut overrides = Map::new();

    if let Some(ref tag) = cli.clear_alerts_tag {
        overrides.insert(
            "clear_alerts_tag".to_owned(),
            Value::String(tag.clone()),
        );
    }

    if overrides.is_empty() {
        Value::Null
    } else {
        Value::Object(overrides)
    }
}
