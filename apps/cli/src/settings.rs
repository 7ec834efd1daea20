//! Layered configuration: defaults → `shapeguard.toml` (or `--config`) →
//! `SHAPEGUARD_*` environment. Command-line flags are applied by the caller.
//! The logger follows the same order, with `-v` last.

use anyhow::{Context, Result, ensure};
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::{Deserialize, Serialize};
use shapeguard_log::{Config as LogConfig, Format, Level};
use shapeguard_validator::schema::UnknownFields;
use std::path::Path;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "shapeguard.toml";

const ENV_PREFIX: &str = "SHAPEGUARD_";

/// Environment keys (after the prefix) that belong to the settings tree.
/// `SHAPEGUARD_LOG` and friends are read by the logger itself.
const ENV_KEYS: &[&str] = &["unknown_fields", "pretty", "log__level", "log__format"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Overrides every object's unknown-field policy in `validate` and `create`.
    pub unknown_fields: Option<UnknownFields>,

    /// Pretty-print JSON written to stdout.
    pub pretty: bool,

    pub log: LogSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: Option<String>,
    pub format: Option<Format>,
}

impl Settings {
    /// Loads settings. An explicit `config` path must exist; the default file
    /// is optional.
    pub fn load(config: Option<&Path>) -> Result<Self> {
        Self::figment(config)?
            .extract()
            .context("invalid configuration")
    }

    fn figment(config: Option<&Path>) -> Result<Figment> {
        let file = match config {
            Some(path) => {
                ensure!(path.is_file(), "config file {} not found", path.display());
                path
            }
            None => Path::new(DEFAULT_CONFIG_FILE),
        };

        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS).split("__")))
    }

    /// Logger configuration: defaults, then the `[log]` table, then the
    /// `SHAPEGUARD_LOG*` variables that are set, then `-v`.
    pub fn log_config(&self, verbosity: u8) -> Result<LogConfig> {
        self.log_config_from(verbosity, |key| std::env::var(key).ok())
    }

    fn log_config_from(
        &self,
        verbosity: u8,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<LogConfig> {
        let mut config = LogConfig::default();
        if let Some(level) = &self.log.level {
            config.level.clone_from(level);
        }
        if let Some(format) = self.log.format {
            config.format = format;
        }
        let mut config = config
            .with_env_overrides_from(lookup)
            .context("invalid logging environment")?;
        if let Some(level) = Level::from_verbosity(verbosity) {
            config = config.with_level(level);
        }
        Ok(config)
    }

    /// Renders a value for stdout.
    pub fn render(&self, value: &impl Serialize) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.context("failed to render output")
    }
}
