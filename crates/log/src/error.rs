//! Error type for logger setup

use thiserror::Error;

/// Result alias for logger operations.
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while installing a logger.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LogError {
    /// The filter directive could not be parsed.
    #[error("Invalid filter '{filter}': {reason}")]
    Filter {
        /// The directive as given.
        filter: String,
        /// Parser message.
        reason: String,
    },

    /// A value in the configuration was not understood.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A global subscriber is already installed.
    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(String),
}
