//! Shared fixtures and helper functions for config tests.

use std::sync::Arc;

use mockable::MockEnv;
use ortho_config::MergeComposer;
use ortho_config::serde_json::json;

use crate::config::{Cli, Commands, ListArgs, SuiteConfig};

/// Helper: Creates a `MergeComposer` with the defaults layer already pushed.
pub fn create_composer_with_defaults() -> Result<MergeComposer, serde_json::Error> {
    let mut composer = MergeComposer::new();
    let defaults = ortho_config::serde_json::to_value(SuiteConfig::default())?;
    composer.push_defaults(defaults);
    Ok(composer)
}

/// Helper: Merges layers from a composer into `SuiteConfig`.
pub fn merge_config(
    composer: MergeComposer,
) -> Result<SuiteConfig, Arc<ortho_config::OrthoError>> {
    SuiteConfig::merge_from_layers(composer.layers())
}

/// Helper: Creates a composer with defaults, file and env layers.
pub fn create_composer_with_file_and_env() -> Result<MergeComposer, serde_json::Error> {
    let mut composer = create_composer_with_defaults()?;
    composer.push_file(
        json!({
            "clear_alerts_tag": "fromFile",
            "default_wait_seconds": 3
        }),
        None,
    );
    composer.push_environment(json!({
        "clear_alerts_tag": "fromEnv"
    }));
    Ok(composer)
}

/// Creates a `MockEnv` answering from a fixed table of variables.
pub fn env_with_vars(mappings: &[(&str, &str)]) -> MockEnv {
    let owned: Vec<(String, String)> = mappings
        .iter()
        .map(|(k, v)| (String::from(*k), String::from(*v)))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string().returning(move |key| {
        owned
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    });
    env
}

/// Creates a CLI running `list` with the given overrides.
pub fn cli_with(config: Option<&str>, clear_alerts_tag: Option<&str>) -> Cli {
    Cli {
        command: Commands::List(ListArgs { keyword: None }),
        config: config.map(camino::Utf8PathBuf::from),
        clear_alerts_tag: clear_alerts_tag.map(String::from),
        verbose: false,
    }
}
