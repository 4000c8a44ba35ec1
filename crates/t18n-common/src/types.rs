//! Workspace-wide error type.

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum T18nError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging bootstrap error.
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl T18nError {
    /// Creates a configuration error from anything displayable.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
