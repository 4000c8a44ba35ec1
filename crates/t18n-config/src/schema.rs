//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use t18n_common::LoggingConfig;
use t18n_core::MissingStrategy;

/// Main configuration structure for t18n.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Translation loading configuration.
    pub translations: TranslationsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Where translations come from and how lookups behave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationsConfig {
    /// Directories scanned for resource files.
    pub directories: Vec<PathBuf>,
    /// Shell-style file name mask, `*` and `?` only.
    pub mask: String,
    /// Code of the language consulted when the requested one lacks a key.
    pub primary_language: String,
    /// Symbol wrapped around keys, e.g. `%` for `%Save%`.
    pub brackets: String,
    /// Result for keys missing in every fallback language.
    pub strategy: MissingStrategy,
    /// Namespace suffixes in load order.
    pub namespaces: Vec<String>,
    /// Codes registered before any file is read, fixing their identifiers.
    pub preload_languages: Vec<String>,
    /// Language used by localized strings when a fallback chain is exhausted.
    pub no_match_language: Option<String>,
}

impl TranslationsConfig {
    /// Whether a primary language is configured.
    pub fn has_primary_language(&self) -> bool {
        !self.primary_language.is_empty()
    }
}
