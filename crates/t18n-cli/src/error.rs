//! Application-wide error types using thiserror.

use t18n_config::ConfigError;
use t18n_core::I18nError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Translation loading or export error.
    #[error(transparent)]
    I18n(#[from] I18nError),

    /// Logging or other shared error.
    #[error(transparent)]
    Common(#[from] t18n_common::T18nError),

    /// The blocking load task did not complete.
    #[error("Background load failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type for the command line application.
pub type CliResult<T> = Result<T, CliError>;
