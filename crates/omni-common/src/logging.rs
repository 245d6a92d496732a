//! Structured logging infrastructure for Omni Bot

use crate::error::{OmniError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "omni_commands=debug")
    pub level: String,
    /// Whether to emit JSON lines on the console
    pub json_format: bool,
    /// Whether to enable pretty formatting with colors
    pub pretty_format: bool,
    /// Optional file path for an additional log output
    pub file_path: Option<PathBuf>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_format: false,
            file_path: None,
            include_targets: true,
        }
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// When a log file is configured the returned guard owns the background
/// writer; dropping it flushes and stops file logging, so the caller keeps it
/// alive for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_new(&config.level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| OmniError::config_with_source("Invalid log filter", e))?;

    let (file_layer, guard) = match &config.file_path {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(path)?);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(config.include_targets)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let json_layer = config
        .json_format
        .then(|| fmt::layer().json().with_target(config.include_targets));
    let pretty_layer = (!config.json_format && config.pretty_format)
        .then(|| fmt::layer().pretty().with_target(config.include_targets));
    let compact_layer = (!config.json_format && !config.pretty_format)
        .then(|| fmt::layer().compact().with_target(config.include_targets));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .with(compact_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| OmniError::config_with_source("Logging was already initialized", e))?;

    Ok(guard)
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<Option<WorkerGuard>> {
    init_logging(&LoggingConfig::default())
}

fn file_appender(path: &Path) -> Result<tracing_appender::rolling::RollingFileAppender> {
    let file_name = path
        .file_name()
        .ok_or_else(|| OmniError::config(format!("Log file path {:?} has no file name", path)))?;
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    std::fs::create_dir_all(directory)?;
    Ok(tracing_appender::rolling::never(directory, file_name))
}
