//! Logger builder implementation

#[macro_use]
mod format;

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Returned by [`LoggerBuilder::build`]; keep it alive for as long as the
/// logger is in use.
#[derive(Debug)]
#[must_use = "dropping the guard right away discards the installed configuration"]
pub struct LoggerGuard {
    config: Config,
}

impl LoggerGuard {
    /// The configuration that was installed.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Parses the filter directive without installing anything.
    pub fn filter(&self) -> LogResult<EnvFilter> {
        EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter {
            filter: self.config.level.clone(),
            reason: e.to_string(),
        })
    }

    /// Build and install the global subscriber
    ///
    /// # Errors
    ///
    /// - [`LogError::Filter`] if the directive cannot be parsed
    /// - [`LogError::AlreadyInitialized`] if a global subscriber exists
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = self.filter()?;
        let display = &self.config.display;

        let installed = match self.config.format {
            Format::Pretty => Registry::default()
                .with(filter)
                .with(create_fmt_layer!(pretty, display))
                .try_init(),
            Format::Compact => Registry::default()
                .with(filter)
                .with(create_fmt_layer!(compact, display))
                .try_init(),
            Format::Json => Registry::default()
                .with(filter)
                .with(create_json_layer!(display))
                .try_init(),
        };
        installed.map_err(|e| LogError::AlreadyInitialized(e.to_string()))?;

        tracing::debug!(
            level = %self.config.level,
            format = ?self.config.format,
            "logger installed"
        );
        Ok(LoggerGuard {
            config: self.config,
        })
    }
}
