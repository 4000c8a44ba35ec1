//! Error types for translation loading and payload decoding

use thiserror::Error;

/// Errors that can occur while loading translations or decoding payloads.
///
/// Lookups never produce these: a missing translation resolves to a marker
/// value chosen by the container's [`MissingStrategy`](crate::MissingStrategy).
#[derive(Error, Debug)]
pub enum I18nError {
    /// The file source could not enumerate or read a resource
    #[error("Resource source unavailable: {locator}")]
    SourceUnavailable {
        /// File, directory or object the source failed on
        locator: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A resource file's content could not be parsed
    #[error("Failed to parse resource file {locator}: {source}")]
    ParseError {
        /// File whose content was rejected
        locator: String,
        /// Parser failure
        #[source]
        source: ContentError,
    },

    /// A localized string payload is not a JSON object of strings
    #[error("Malformed localized string payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// JSON export found neither the requested nor the primary language set
    #[error("No translation found for language '{language}' in namespace '{namespace}'")]
    NoTranslationFound {
        /// Requested language code
        language: String,
        /// Requested namespace, empty for the default one
        namespace: String,
    },

    /// A file mask could not be compiled
    #[error("Invalid file mask: {0}")]
    InvalidMask(#[from] regex::Error),

    /// Serializing an export failed
    #[error("Failed to serialize translations: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Failure reported by a [`ContentParser`](crate::ContentParser).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ContentError {
    /// 1-based line number, 0 when the whole buffer is rejected
    pub line: usize,
    /// Human readable reason
    pub message: String,
}

impl ContentError {
    /// Creates a content error for the given line.
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
