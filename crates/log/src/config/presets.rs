//! Configuration presets for common scenarios

use super::{Config, DisplayConfig, Format};
use crate::error::{LogError, LogResult};
use crate::{ENV_FILTER, ENV_FORMAT};

impl Config {
    /// Create configuration from environment variables
    ///
    /// # Errors
    ///
    /// [`LogError::Config`] if `SHAPEGUARD_LOG_FORMAT` names no known format.
    pub fn from_env() -> LogResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Overlays the `SHAPEGUARD_LOG*` variables (and `RUST_LOG`) that are set
    /// onto this configuration. Unset variables leave their field alone.
    ///
    /// # Errors
    ///
    /// [`LogError::Config`] if `SHAPEGUARD_LOG_FORMAT` names no known format.
    pub fn with_env_overrides(self) -> LogResult<Self> {
        self.with_env_overrides_from(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::with_env_overrides`], reading variables through
    /// `lookup`.
    ///
    /// # Errors
    ///
    /// [`LogError::Config`] if the format variable names no known format.
    pub fn with_env_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> LogResult<Self> {
        // SHAPEGUARD_LOG, then RUST_LOG
        if let Some(level) = lookup(ENV_FILTER).or_else(|| lookup("RUST_LOG")) {
            self.level = level;
        }

        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = format.parse().map_err(|error| match error {
                LogError::Config(reason) => LogError::Config(format!("{ENV_FORMAT}: {reason}")),
                other => other,
            })?;
        }

        self.display.parse_env(lookup);
        Ok(self)
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                colors: true,
                source: true,
                ..DisplayConfig::default()
            },
        }
    }

    /// Production configuration (JSON, warn level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "warn".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                flatten: true,
                ..DisplayConfig::default()
            },
        }
    }
}
