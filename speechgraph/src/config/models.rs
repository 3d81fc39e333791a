//! Configuration model definitions.
//!
//! This module contains the configuration structures for all speechgraph
//! components.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure for speechgraph.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SpeechGraphConfig {
    /// Annotation server configuration
    pub servers: ServersConfig,

    /// Pipeline edge-inclusion policy
    pub pipeline: PipelineSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Endpoints of the two annotation servers the pipeline depends on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServersConfig {
    /// Dependency annotator (CoreNLP server)
    pub corenlp: EndpointConfig,

    /// Open-domain relation extractor (OpenIE server)
    pub openie: EndpointConfig,
}

impl Default for ServersConfig {
    fn default() -> Self {
        Self {
            corenlp: EndpointConfig {
                url: "http://localhost:9000".to_string(),
                timeout_secs: 120,
            },
            openie: EndpointConfig {
                url: "http://localhost:6000".to_string(),
                timeout_secs: 60,
            },
        }
    }
}

/// A single annotation server endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL of the server
    pub url: String,

    /// Request timeout in seconds. Dependency annotation of a long
    /// transcript can take a while, so this is generous by default.
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 60,
        }
    }
}

/// Edge-inclusion policy for the attachment families.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PipelineSettings {
    /// Add every adjective edge, rather than only those touching a node
    /// already in the backbone
    pub add_adjective_edges: bool,

    /// Add every preposition edge, rather than only those touching a
    /// node already in the backbone
    pub add_all_preposition_edges: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            add_adjective_edges: true,
            add_all_preposition_edges: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any)
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default format
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}
