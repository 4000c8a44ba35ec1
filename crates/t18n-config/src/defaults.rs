//! Default values.

use crate::schema::{Config, TranslationsConfig};
use std::path::PathBuf;
use t18n_common::LoggingConfig;
use t18n_core::MissingStrategy;

/// Directory scanned when none is configured.
pub const DEFAULT_LOCALES_DIR: &str = "./locales";

/// File mask used when none is configured.
pub const DEFAULT_MASK: &str = "*.t18n";

impl Default for Config {
    fn default() -> Self {
        Self {
            translations: TranslationsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TranslationsConfig {
    fn default() -> Self {
        Self {
            directories: vec![PathBuf::from(DEFAULT_LOCALES_DIR)],
            mask: DEFAULT_MASK.to_string(),
            primary_language: "en".to_string(),
            brackets: String::new(),
            strategy: MissingStrategy::ReturnResourceCode,
            namespaces: Vec::new(),
            preload_languages: Vec::new(),
            no_match_language: None,
        }
    }
}
