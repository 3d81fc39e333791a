//! Wire-format models for the two annotation services.
//!
//! The dependency/coreference annotator and the open-domain relation
//! extractor both speak JSON. The structs here mirror those payloads
//! closely (camelCase field names, 1-based token indices) so responses
//! deserialize directly with serde; everything downstream of this module
//! works on these types and never touches raw JSON again.

mod extraction;
mod types;

pub use extraction::{ExtractionInstance, ExtractionSet, ExtractionSpan, ExtractionTriple};
pub use types::{Annotation, CorefMention, DependencyEdge, Sentence, Token};
