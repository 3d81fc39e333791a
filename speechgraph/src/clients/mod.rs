//! Clients for the two annotation servers the pipeline consumes.
//!
//! The pipeline core never talks to a server itself; it goes through the
//! [`DependencyAnnotator`] and [`RelationExtractor`] traits, so tests can
//! substitute canned annotations and the HTTP clients stay at the edge.

mod corenlp;
mod openie;

pub use corenlp::CoreNlpClient;
pub use openie::OpenIeClient;

use crate::annotation::{Annotation, ExtractionInstance};

/// Error type for annotation server interactions
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never completed
    #[error("request to annotation server failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("annotation server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not parse as the expected shape
    #[error("malformed annotation response: {0}")]
    MalformedResponse(String),

    /// The configured endpoint is not usable
    #[error("invalid server endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Whole-transcript dependency annotation: tokens, part-of-speech tags,
/// dependency trees, and coreference chains in one pass.
#[cfg_attr(test, mockall::automock)]
pub trait DependencyAnnotator {
    fn annotate(&self, text: &str) -> Result<Annotation>;
}

/// Per-sentence open-domain triple extraction.
#[cfg_attr(test, mockall::automock)]
pub trait RelationExtractor {
    fn extract(&self, sentence: &str) -> Result<Vec<ExtractionInstance>>;
}

/// Check and normalize a configured endpoint URL.
pub(crate) fn normalize_endpoint(url: &str) -> Result<String> {
    let trimmed = url.trim();
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ClientError::InvalidEndpoint(url.to_string()));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
