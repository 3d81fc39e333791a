//! Edge and node types shared by every pipeline stage.

use serde::{Deserialize, Serialize};

/// Which extractor family an edge came from.
///
/// Augmentation policy is expressed over this tag: open-domain and
/// dependency edges form the backbone, oblique edges are folded in
/// unconditionally, adjective and preposition edges are folded in under
/// configurable flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeOrigin {
    /// Subject-relation-object triple from the open-domain extractor
    OpenIe,

    /// Subject/object attachment of a predicate in the dependency tree
    Dependency,

    /// Adjective-modifier attachment
    Adjective,

    /// Prepositional attachment
    Preposition,

    /// Oblique (prepositional-object) attachment
    Oblique,
}

/// A directed, labeled edge between two node labels.
///
/// Labels are normalized at construction (lowercased, whitespace
/// collapsed) so that equality means identity throughout the pipeline.
/// `original_source`/`original_target` hold the labels the edge had
/// before coreference merging; the unconnected-node detector needs them
/// to tell "never had an edge" apart from "merged away".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationEdge {
    pub source: String,
    pub target: String,
    pub relation: String,
    pub origin: EdgeOrigin,

    /// 0-based index of the sentence the edge was extracted from
    pub sentence: usize,

    /// Extractor confidence, present only for open-domain edges.
    /// Retained for downstream consumers, never used for filtering.
    pub confidence: Option<f32>,

    pub original_source: String,
    pub original_target: String,
}

impl RelationEdge {
    /// Build an edge with normalized endpoint and relation labels. The
    /// original endpoints start out equal to the live ones; the merger
    /// rewrites the live labels and leaves these behind.
    pub fn new(
        source: &str,
        relation: &str,
        target: &str,
        origin: EdgeOrigin,
        sentence: usize,
    ) -> Self {
        let source = normalize_label(source);
        let target = normalize_label(target);
        Self {
            original_source: source.clone(),
            original_target: target.clone(),
            source,
            target,
            relation: normalize_label(relation),
            origin,
            sentence,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Whether either endpoint carries the given label.
    pub fn touches(&self, label: &str) -> bool {
        self.source == label || self.target == label
    }

    /// Identity used for parallel-edge deduplication.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.source, &self.target, &self.relation)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// True when merging is what made this edge a self-loop, i.e. the
    /// endpoints referred to the same entity through coreference. Such
    /// loops are genuine reflexive relations and survive cleaning.
    pub fn had_distinct_endpoints(&self) -> bool {
        self.original_source != self.original_target
    }
}

/// An extraction that produced a relation but no second endpoint. It
/// cannot be placed in the graph, so it is kept on a side list for
/// logging and inspection rather than discarded silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneNodeRelation {
    pub node: String,
    pub relation: String,
    pub sentence: usize,
    pub confidence: Option<f32>,
}

impl OneNodeRelation {
    pub fn new(node: &str, relation: &str, sentence: usize) -> Self {
        Self {
            node: normalize_label(node),
            relation: normalize_label(relation),
            sentence,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Normalize a node or relation label: lowercase, collapse whitespace
/// runs, trim. Labels are never stemmed.
pub fn normalize_label(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    words.join(" ").to_lowercase()
}

/// Whether an equal edge (same source, target, and relation) is already
/// present in the list.
pub(crate) fn contains_edge(edges: &[RelationEdge], edge: &RelationEdge) -> bool {
    edges.iter().any(|e| e.key() == edge.key())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_normalized_at_construction() {
        let edge = RelationEdge::new("  The   Dog ", "Chased", "the CAT", EdgeOrigin::OpenIe, 0);
        assert_eq!(edge.source, "the dog");
        assert_eq!(edge.relation, "chased");
        assert_eq!(edge.target, "the cat");
        assert_eq!(edge.original_source, "the dog");
        assert_eq!(edge.original_target, "the cat");
        assert_eq!(edge.confidence, None);
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("Dog"), "dog");
        assert_eq!(normalize_label("  the  \t big   dog "), "the big dog");
        assert_eq!(normalize_label(""), "");
    }

    #[test]
    fn test_self_loop_provenance() {
        let mut edge = RelationEdge::new("the man", "washed", "himself", EdgeOrigin::OpenIe, 0);
        edge.source = "man".to_string();
        edge.target = "man".to_string();
        assert!(edge.is_self_loop());
        assert!(edge.had_distinct_endpoints());

        let degenerate = RelationEdge::new("dog", "is", "dog", EdgeOrigin::Dependency, 1);
        assert!(degenerate.is_self_loop());
        assert!(!degenerate.had_distinct_endpoints());
    }

    #[test]
    fn test_contains_edge_matches_on_key() {
        let edges = vec![RelationEdge::new("dog", "chased", "cat", EdgeOrigin::OpenIe, 0)];

        let same = RelationEdge::new("dog", "chased", "cat", EdgeOrigin::Oblique, 3);
        assert!(contains_edge(&edges, &same), "origin and sentence are not part of the key");

        let different = RelationEdge::new("dog", "bit", "cat", EdgeOrigin::OpenIe, 0);
        assert!(!contains_edge(&edges, &different));
    }
}
