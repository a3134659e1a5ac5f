//! Configuration data types for a step suite.

use ortho_config::{OrthoConfig, OrthoResult, PostMergeContext, PostMergeHook};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Root suite configuration.
///
/// Configuration files are discovered in this order:
/// 1. Path given with `--config`
/// 2. Path in the `BROWSER_STEPS_CONFIG_PATH` environment variable
/// 3. `.browser-steps.toml` in the current or home directory
/// 4. `~/.config/browser-steps/config.toml` (XDG default)
#[derive(Debug, Clone, PartialEq, Eq, SmartDefault, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "BROWSER_STEPS",
    post_merge_hook,
    discovery(
        app_name = "browser-steps",
        env_var = "BROWSER_STEPS_CONFIG_PATH",
        config_file_name = "config.toml",
        dotfile_name = ".browser-steps.toml",
        config_cli_long = "config",
        config_cli_visible = true,
    )
)]
pub struct SuiteConfig {
    /// Start the browser session before each scenario.
    #[default = true]
    pub start_session: bool,

    /// Scenario tag (without `@`) that clears open alerts after the scenario.
    #[default = "clearAlertsWhenFinished"]
    pub clear_alerts_tag: String,

    /// Delay for delayed navigation steps that give no explicit delay.
    #[default = 0]
    pub default_wait_seconds: u64,
}

impl SuiteConfig {
    /// Whether a scenario's tags request alert clean-up.
    ///
    /// Tags match with or without their leading `@`.
    #[must_use]
    pub fn clears_alerts_for<T: AsRef<str>>(&self, tags: &[T]) -> bool {
        tags.iter()
            .any(|tag| tag.as_ref().trim_start_matches('@') == self.clear_alerts_tag)
    }
}

impl PostMergeHook for SuiteConfig {
    fn post_merge(&mut self, _ctx: &PostMergeContext) -> OrthoResult<()> {
        // Accept tags written the way they appear in feature files.
        let normalised = self.clear_alerts_tag.trim().trim_start_matches('@').to_owned();
        self.clear_alerts_tag = normalised;
        Ok(())
    }
}
