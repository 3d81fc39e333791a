//! Structured logging infrastructure for speechgraph.
//!
//! This module provides a configurable logging system based on the tracing crate,
//! supporting different output formats, log levels, and optional file output.


use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

// Keeps the non-blocking writer alive for the process lifetime so file
// logs are flushed
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Error type for logging operations
#[derive(Debug)]
pub enum LogError {
    /// IO error occurred
    IoError(std::io::Error),

    /// Error parsing log level
    InvalidLogLevel(String),

    /// Error in subscriber setup
    SubscriberError(Box<dyn std::error::Error + Send + Sync>),

    /// General error
    Other(String),
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::IoError(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for LogError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        LogError::SubscriberError(err)
    }
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the logging system with the given configuration.
///
/// The configured level acts as the default; a `RUST_LOG` environment
/// variable overrides it with a full filter directive.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let result = match config.format {
        LogFormat::Json => init_json_logging(config),
        LogFormat::Compact => init_compact_logging(config),
        _ => init_pretty_logging(config),
    };

    // If the error is "already set", ignore it
    if let Err(LogError::SubscriberError(ref e)) = result
        && e.to_string().contains("has already been set")
    {
        return Ok(());
    }

    result
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
}

/// Initialize logging with JSON formatting
fn init_json_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(config))
        .with_level(true)
        .with_target(true)
        .with_line_number(true)
        .with_thread_ids(true);

    if let Some(file_path) = &config.file {
        let (writer, guard) = create_non_blocking_file(file_path)?;
        let _ = FILE_GUARD.set(guard);

        if config.stdout {
            subscriber.with_writer(std::io::stdout).try_init()?;
            tracing::warn!("Configured for stdout only; file logging ignored");
        } else {
            subscriber.with_writer(writer).try_init()?;
        }
    } else if config.stdout {
        subscriber.try_init()?;
    }

    Ok(())
}

/// Initialize logging with compact formatting
fn init_compact_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter(config))
        .with_level(true)
        .with_target(true)
        .with_line_number(true)
        .with_thread_ids(true);

    if let Some(file_path) = &config.file {
        let (writer, guard) = create_non_blocking_file(file_path)?;
        let _ = FILE_GUARD.set(guard);

        if config.stdout {
            subscriber.with_writer(std::io::stdout).try_init()?;
            tracing::warn!("Configured for stdout only; file logging ignored");
        } else {
            subscriber.with_writer(writer).try_init()?;
        }
    } else if config.stdout {
        subscriber.try_init()?;
    }

    Ok(())
}

/// Initialize logging with pretty formatting
fn init_pretty_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(env_filter(config))
        .with_level(true)
        .with_target(true)
        .with_line_number(true)
        .with_thread_ids(true);

    if let Some(file_path) = &config.file {
        let (writer, guard) = create_non_blocking_file(file_path)?;
        let _ = FILE_GUARD.set(guard);

        if config.stdout {
            subscriber.with_writer(std::io::stdout).try_init()?;
            tracing::warn!("Configured for stdout only; file logging ignored");
        } else {
            subscriber.with_writer(writer).try_init()?;
        }
    } else if config.stdout {
        subscriber.try_init()?;
    }

    Ok(())
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    // Ensure the directory exists
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        path.parent().unwrap_or_else(|| Path::new(".")),
        path.file_name().unwrap_or_default(),
    );

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    Ok((non_blocking, guard))
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(LogLevel::Trace),
        "debug" => Ok(LogLevel::Debug),
        "info" => Ok(LogLevel::Info),
        "warn" => Ok(LogLevel::Warn),
        "error" => Ok(LogLevel::Error),
        _ => Err(LogError::InvalidLogLevel(level.to_string())),
    }
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}

impl std::fmt::Display for LogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogError::IoError(e) => write!(f, "IO error: {}", e),
            LogError::SubscriberError(e) => write!(f, "Subscriber error: {}", e),
            LogError::InvalidLogLevel(s) => write!(f, "Invalid log level: {}", s),
            LogError::Other(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for LogError {}
