//! Configuration loading with environment overrides.

use crate::schema::Config;
use crate::validator::ConfigValidator;
use std::path::{Path, PathBuf};
use t18n_common::T18nError;
use t18n_core::MissingStrategy;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "T18N_CONFIG_PATH";

/// File names tried in the working directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["t18n.yaml", "t18n.yml"];

/// Configuration loading error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for the schema.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// An environment override holds an unusable value.
    #[error("Invalid value for {var}: {message}")]
    EnvParse {
        /// Environment variable name
        var: String,
        /// Why the value was rejected
        message: String,
    },

    /// The configuration failed validation.
    #[error("Invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl From<ConfigError> for T18nError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Loads, overrides and validates configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader for an explicit configuration file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Creates a loader that looks for `T18N_CONFIG_PATH`, then `t18n.yaml`,
    /// then `t18n.yml`, and falls back to defaults.
    pub fn discover() -> Self {
        Self {
            path: std::env::var_os(CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .or_else(|| {
                    CONFIG_FILE_NAMES
                        .iter()
                        .map(PathBuf::from)
                        .find(|candidate| candidate.is_file())
                }),
        }
    }

    /// Configuration file this loader reads, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads the configuration, applies process environment overrides and
    /// validates the result.
    pub async fn load(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.path {
            Some(path) => Self::load_from_file(path).await?,
            None => {
                debug!("no configuration file found, using defaults");
                Config::default()
            }
        };

        apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
        ConfigValidator::validate(&config)?;

        info!(
            directories = config.translations.directories.len(),
            primary_language = %config.translations.primary_language,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Reads and parses one YAML file without overrides or validation.
    pub async fn load_from_file(path: &Path) -> Result<Config, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), "read configuration file");
        Self::parse(&content)
    }

    /// Parses YAML; missing sections and fields take their defaults.
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Applies `T18N_*` overrides read through `lookup`.
///
/// `T18N_LOCALES_DIR` replaces the directory list and accepts several
/// directories separated like `PATH`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(code) = lookup("T18N_PRIMARY_LANGUAGE") {
        config.translations.primary_language = code;
    }

    if let Some(dirs) = lookup("T18N_LOCALES_DIR") {
        config.translations.directories = std::env::split_paths(&dirs).collect();
    }

    if let Some(brackets) = lookup("T18N_BRACKETS") {
        config.translations.brackets = brackets;
    }

    if let Some(strategy) = lookup("T18N_STRATEGY") {
        config.translations.strategy = parse_strategy(&strategy)?;
    }

    if let Some(level) = lookup("T18N_LOG_LEVEL") {
        config.logging.level = level;
    }

    Ok(())
}

fn parse_strategy(value: &str) -> Result<MissingStrategy, ConfigError> {
    serde_yaml::from_str(value.trim()).map_err(|_| ConfigError::EnvParse {
        var: "T18N_STRATEGY".to_string(),
        message: format!(
            "expected return_resource_code, return_not_found_variable or return_empty_string, got '{value}'"
        ),
    })
}
