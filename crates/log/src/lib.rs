//! # shapeguard-log
//!
//! Logging setup shared by the shapeguard tools: a serde-friendly
//! [`Config`], presets for development and production, and a
//! [`LoggerBuilder`] that installs a `tracing` subscriber writing to stderr.
//!
//! Library crates only emit `tracing` events; installing a subscriber is the
//! binary's job.
//!
//! ```no_run
//! use shapeguard_log::{Config, Format};
//!
//! let mut config = Config::from_env()?;
//! config.format = Format::Json;
//! let _guard = shapeguard_log::init_with(config)?;
//!
//! tracing::info!(schema = "port.json", "schema loaded");
//! # Ok::<(), shapeguard_log::LogError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod error;
mod format;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format, Level};
pub use error::{LogError, LogResult};

/// Environment variable holding the filter directive.
pub const ENV_FILTER: &str = "SHAPEGUARD_LOG";

/// Environment variable selecting the output format.
pub const ENV_FORMAT: &str = "SHAPEGUARD_LOG_FORMAT";

// ============================================================================
// Initialization Functions
// ============================================================================

/// Picks a configuration from the environment and installs it.
///
/// An explicit `SHAPEGUARD_LOG` or `RUST_LOG` wins; otherwise debug builds
/// get [`Config::development`] and release builds [`Config::production`].
pub fn auto_init() -> LogResult<LoggerGuard> {
    if std::env::var_os(ENV_FILTER).is_some() || std::env::var_os("RUST_LOG").is_some() {
        init_with(Config::from_env()?)
    } else if cfg!(debug_assertions) {
        init_with(Config::development())
    } else {
        init_with(Config::production())
    }
}

/// Installs the default configuration.
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Installs `config`.
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
