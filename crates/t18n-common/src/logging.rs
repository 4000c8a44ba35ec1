//! Structured logging infrastructure for t18n

use crate::types::T18nError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "t18n_core=trace")
    pub level: String,
    /// Whether to emit one JSON object per event
    pub json: bool,
    /// Optional file path for log output, stdout when absent
    pub file: Option<String>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
            include_targets: true,
        }
    }
}

/// Keeps the background log writer alive.
///
/// Dropping the guard flushes and stops the file writer, so hold it for the
/// lifetime of `main`.
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over `config.level` when it is set.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, T18nError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| T18nError::Logging(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let (writer, guard) = match &config.file {
        Some(file_path) => {
            let path = Path::new(file_path);
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| T18nError::Logging(format!("invalid log file path: {file_path}")))?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let result = match (config.json, writer) {
        (true, Some(writer)) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.include_targets)
                    .with_writer(writer),
            )
            .try_init(),
        (true, None) => registry
            .with(fmt::layer().json().with_target(config.include_targets))
            .try_init(),
        (false, Some(writer)) => registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(config.include_targets)
                    .with_writer(writer),
            )
            .try_init(),
        (false, None) => registry
            .with(fmt::layer().with_target(config.include_targets))
            .try_init(),
    };

    result.map_err(|e| T18nError::Logging(e.to_string()))?;

    tracing::debug!(level = %config.level, json = config.json, "logging initialized");

    Ok(LoggingGuard { _file_guard: guard })
}
