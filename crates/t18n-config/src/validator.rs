//! Configuration validation.

use crate::loader::ConfigError;
use crate::schema::Config;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting every problem at once.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let translations = &config.translations;
        let mut problems = Vec::new();

        if translations.directories.is_empty() {
            problems.push("translations.directories must not be empty".to_string());
        }
        if translations
            .directories
            .iter()
            .any(|dir| dir.as_os_str().is_empty())
        {
            problems.push("translations.directories contains an empty path".to_string());
        }
        if translations.mask.trim().is_empty() {
            problems.push("translations.mask must not be empty".to_string());
        }

        let codes = std::iter::once(("primary_language", translations.primary_language.as_str()))
            .chain(
                translations
                    .no_match_language
                    .as_deref()
                    .map(|code| ("no_match_language", code)),
            )
            .chain(
                translations
                    .preload_languages
                    .iter()
                    .map(|code| ("preload_languages", code.as_str())),
            );
        for (field, code) in codes {
            if code.chars().any(char::is_whitespace) {
                problems.push(format!("translations.{field} '{code}' contains whitespace"));
            }
        }

        if translations.brackets.chars().any(char::is_whitespace) {
            problems.push("translations.brackets must not contain whitespace".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems))
        }
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate(self)
    }
}
