//! Graph construction: normalization and merging of the two extraction
//! streams into one directed labeled multigraph.
//!
//! The pipeline reconciles open-domain triples with dependency-parse
//! patterns into a single node-identity space: edge extraction, backbone
//! selection, synonym resolution from coreference, compound-node
//! splitting, coreference merging, attachment folding, and cleanup.
//! [`pipeline::run`] wires the stages in order; the submodules expose
//! each stage for direct use and testing.

pub mod assembler;
pub mod augment;
pub mod cleaner;
pub mod dependency;
pub mod merge;
pub mod openie;
pub mod pipeline;
pub mod splitter;
pub mod synonyms;
pub mod types;
pub mod unconnected;
pub mod word_types;

// Re-export the shapes the rest of the crate works with
pub use assembler::{EdgeAttributes, SpeechGraph};
pub use synonyms::SynonymMap;
pub use types::{normalize_label, EdgeOrigin, OneNodeRelation, RelationEdge};
pub use word_types::WordTypes;
