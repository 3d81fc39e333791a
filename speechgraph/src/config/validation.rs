//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::models::*;
use super::ConfigError;

/// Validate the entire configuration.
pub fn validate_config(config: &SpeechGraphConfig) -> Result<(), ConfigError> {
    validate_endpoint("corenlp", &config.servers.corenlp)?;
    validate_endpoint("openie", &config.servers.openie)?;

    Ok(())
}

/// Validate a single server endpoint.
fn validate_endpoint(name: &str, endpoint: &EndpointConfig) -> Result<(), ConfigError> {
    if endpoint.url.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{} server URL cannot be empty",
            name
        )));
    }

    if !endpoint.url.starts_with("http://") && !endpoint.url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "{} server URL must start with http:// or https://: {}",
            name, endpoint.url
        )));
    }

    if endpoint.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(format!(
            "{} server timeout must be greater than 0",
            name
        )));
    }

    Ok(())
}
