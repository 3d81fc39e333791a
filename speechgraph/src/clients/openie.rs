//! Blocking client for the OpenIE relation extraction server.

use super::{normalize_endpoint, ClientError, RelationExtractor, Result};
use crate::annotation::ExtractionInstance;
use crate::config::EndpointConfig;
use std::time::Duration;

/// Client for a running OpenIE standalone server. Extraction is
/// per-sentence; the caller decides which sentences are worth sending.
#[derive(Debug, Clone)]
pub struct OpenIeClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl OpenIeClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = normalize_endpoint(&endpoint.into())?;
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { endpoint, http })
    }

    pub fn from_config(config: &EndpointConfig) -> Result<Self> {
        Self::new(&config.url, Duration::from_secs(config.timeout_secs))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RelationExtractor for OpenIeClient {
    fn extract(&self, sentence: &str) -> Result<Vec<ExtractionInstance>> {
        let url = format!("{}/getExtraction", self.endpoint);

        tracing::debug!(endpoint = %url, chars = sentence.len(), "requesting open-domain extraction");
        let response = self.http.post(&url).body(sentence.to_string()).send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<ExtractionInstance>>()
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_endpoint_without_scheme() {
        let client = OpenIeClient::new("openie.internal:6000", Duration::from_secs(5));
        assert!(matches!(client, Err(ClientError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_from_config() {
        let config = EndpointConfig {
            url: "http://localhost:6000".to_string(),
            timeout_secs: 10,
        };
        let client = OpenIeClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:6000");
    }
}
