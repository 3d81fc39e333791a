//! # Speechgraph
//!
//! Turns speech transcripts into directed labeled multigraphs for language
//! coherence analysis. A transcript is cleaned, annotated by external NLP
//! services (dependency parsing, coreference resolution, open-domain relation
//! extraction), and normalized into a graph whose nodes are the entities the
//! speaker mentioned and whose edges are the relations between them.
//!
//! ## Quick Start
//!
//! ```no_run
//! use speechgraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // Point the pipeline at running CoreNLP and OpenIE services
//!     let config = ConfigBuilder::new()
//!         .with_corenlp_url("http://localhost:9000")
//!         .with_openie_url("http://localhost:6000")
//!         .build()?;
//!
//!     speechgraph::init(&config)?;
//!
//!     let graph = speechgraph::process_transcript(
//!         "I see a man. He is wearing a hat.",
//!         &config,
//!     )?;
//!
//!     println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **preprocess**: transcript cleaning (contractions, interjections,
//!   transcriber annotations) before anything is sent to the annotators
//! - **clients**: blocking HTTP clients for the dependency annotator and the
//!   relation extractor, behind traits so tests can substitute fixtures
//! - **graph**: the normalization pipeline itself, from raw extractions to
//!   the assembled [`SpeechGraph`](graph::SpeechGraph)
//! - **analyzer**: per-transcript orchestration plus file-based persistence
//!   of finished graphs
//!
//! Both services are expected to speak the CoreNLP wire format; nothing in
//! the pipeline depends on how they are hosted.

pub mod analyzer;
pub mod annotation;
pub mod clients;
pub mod config;
pub mod graph;
pub mod logging;
pub mod preprocess;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    // Re-export the per-transcript API
    pub use crate::analyzer::{TranscriptAnalysis, TranscriptFile};

    // Re-export core initialization functions
    pub use crate::{init, process_transcript};

    // Re-export config types
    pub use crate::config::{
        ConfigBuilder, LogFormat, LogLevel, PipelineSettings, SpeechGraphConfig,
    };

    // Re-export the graph types callers inspect
    pub use crate::graph::{EdgeAttributes, EdgeOrigin, SpeechGraph};

    // Re-export the client traits for custom annotator backends
    pub use crate::clients::{DependencyAnnotator, RelationExtractor};

    // Re-export essential result type
    pub use crate::{Result, SpeechGraphError};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for speechgraph operations
#[derive(Debug, thiserror::Error)]
pub enum SpeechGraphError {
    /// The annotation services failed or returned nothing usable
    #[error(
        "Annotation error: {0}. Check that the CoreNLP and OpenIE services are running and reachable"
    )]
    UpstreamAnnotation(String),

    /// A graph was requested before the transcript was processed
    #[error("No graph available. Call process() before asking for the graph")]
    GraphNotReady,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// File IO error while reading transcripts or writing graphs
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Graph artifact could not be serialized or deserialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for SpeechGraphError {
    fn from(err: crate::config::ConfigError) -> Self {
        SpeechGraphError::Configuration(err.to_string())
    }
}

impl From<crate::clients::ClientError> for SpeechGraphError {
    fn from(err: crate::clients::ClientError) -> Self {
        SpeechGraphError::UpstreamAnnotation(err.to_string())
    }
}

impl From<serde_json::Error> for SpeechGraphError {
    fn from(err: serde_json::Error) -> Self {
        SpeechGraphError::Serialization(err.to_string())
    }
}

/// Result type for speechgraph operations
pub type Result<T> = std::result::Result<T, SpeechGraphError>;

/// Initialize the library with the provided configuration
///
/// Sets up logging per the configuration. Safe to call more than once; a
/// subscriber that is already installed is left in place.
///
/// # Examples
///
/// ```rust
/// use speechgraph::prelude::*;
///
/// fn example() -> Result<()> {
///     let config = SpeechGraphConfig::default();
///     speechgraph::init(&config)?;
///     Ok(())
/// }
/// ```
pub fn init(config: &config::SpeechGraphConfig) -> Result<()> {
    // Ignore errors if tracing is already initialized
    let _ = logging::init(&config.logging);
    Ok(())
}

/// Process one transcript end to end with the configured services
///
/// Builds the HTTP clients from the configuration, runs the full
/// clean/annotate/extract/normalize pipeline, and returns the finished
/// graph. For repeated runs or custom annotator backends, use
/// [`analyzer::TranscriptAnalysis`] directly.
///
/// # Arguments
/// * `transcript` - The transcript text as the speaker produced it
/// * `config` - Service endpoints and pipeline settings
///
/// # Examples
///
/// ```no_run
/// use speechgraph::prelude::*;
///
/// fn example() -> Result<()> {
///     let config = SpeechGraphConfig::default();
///     let graph = speechgraph::process_transcript("The dog ran.", &config)?;
///     assert!(graph.node_count() > 0);
///     Ok(())
/// }
/// ```
pub fn process_transcript(
    transcript: &str,
    config: &config::SpeechGraphConfig,
) -> Result<graph::SpeechGraph> {
    let annotator = clients::CoreNlpClient::from_config(&config.servers.corenlp)?;
    let extractor = clients::OpenIeClient::from_config(&config.servers.openie)?;

    let mut analysis = analyzer::TranscriptAnalysis::new(transcript);
    analysis.process(&annotator, &extractor, config)?;
    analysis.into_graph()
}
