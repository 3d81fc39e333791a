//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{models::*, validation, Result};
use std::path::Path;

/// Builder for creating SpeechGraphConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: SpeechGraphConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: SpeechGraphConfig::default(),
        }
    }

    /// Set the dependency annotator URL.
    pub fn with_corenlp_url(mut self, url: impl Into<String>) -> Self {
        self.config.servers.corenlp.url = url.into();
        self
    }

    /// Set the open-domain extractor URL.
    pub fn with_openie_url(mut self, url: impl Into<String>) -> Self {
        self.config.servers.openie.url = url.into();
        self
    }

    /// Set the request timeout for both annotation servers.
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.config.servers.corenlp.timeout_secs = secs;
        self.config.servers.openie.timeout_secs = secs;
        self
    }

    /// Control whether all adjective edges join the graph or only those
    /// touching an existing backbone node.
    pub fn with_adjective_edges(mut self, add_all: bool) -> Self {
        self.config.pipeline.add_adjective_edges = add_all;
        self
    }

    /// Control whether all preposition edges join the graph or only
    /// those touching an existing backbone node.
    pub fn with_all_preposition_edges(mut self, add_all: bool) -> Self {
        self.config.pipeline.add_all_preposition_edges = add_all;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Create a configuration for development.
    ///
    /// Uses the default local server endpoints with debug-level logging.
    pub fn development() -> Self {
        Self::new().with_log_level(LogLevel::Debug)
    }

    /// Create a configuration for testing.
    ///
    /// Like development, but with short server timeouts so a missing
    /// server fails a test quickly instead of hanging it.
    pub fn testing() -> Self {
        Self::development().with_request_timeout(5)
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<SpeechGraphConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
