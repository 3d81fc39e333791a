//! Blocking client for the CoreNLP dependency annotation server.

use super::{normalize_endpoint, ClientError, DependencyAnnotator, Result};
use crate::annotation::Annotation;
use crate::config::EndpointConfig;
use std::time::Duration;

/// Annotators requested for every transcript. Coreference is the
/// expensive one, but the synonym resolver cannot work without it.
const ANNOTATORS: &str = "tokenize,ssplit,pos,lemma,parse,depparse,coref";

/// Client for a running CoreNLP server. The whole transcript goes up in
/// one request; CoreNLP performs its own sentence splitting.
#[derive(Debug, Clone)]
pub struct CoreNlpClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl CoreNlpClient {
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

impl DependencyAnnotator for CoreNlpClient {
    fn annotate(&self, text: &str) -> Result<Annotation> {
        let properties = serde_json::json!({
            "annotators": ANNOTATORS,
            "outputFormat": "json",
        });

        tracing::debug!(endpoint = %self.endpoint, chars = text.len(), "requesting dependency annotation");
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("properties", properties.to_string())])
            .body(text.to_string())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Annotation>()
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_endpoint_without_scheme() {
        let client = CoreNlpClient::new("corenlp.internal:9000", Duration::from_secs(5));
        assert!(matches!(client, Err(ClientError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_from_config_trims_trailing_slash() {
        let config = EndpointConfig {
            url: "http://localhost:9000/".to_string(),
            timeout_secs: 5,
        };
        let client = CoreNlpClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000");
    }
}
