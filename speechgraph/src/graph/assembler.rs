//! Assembly of the final multigraph artifact.

use super::types::{EdgeOrigin, RelationEdge};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Attributes carried by every graph edge. The original endpoints are
/// the labels the edge had before coreference merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttributes {
    pub relation: String,
    pub origin: EdgeOrigin,
    pub sentence: usize,
    pub confidence: Option<f32>,
    pub original_source: String,
    pub original_target: String,
}

impl From<&RelationEdge> for EdgeAttributes {
    fn from(edge: &RelationEdge) -> Self {
        Self {
            relation: edge.relation.clone(),
            origin: edge.origin,
            sentence: edge.sentence,
            confidence: edge.confidence,
            original_source: edge.original_source.clone(),
            original_target: edge.original_target.clone(),
        }
    }
}

/// The final artifact: a directed labeled multigraph over normalized
/// node labels, with transcript-level metadata attached. Metadata is
/// present even when the transcript produced no edges at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechGraph {
    graph: DiGraph<String, EdgeAttributes>,
    transcript: String,
    sentence_count: usize,
    token_count: usize,
    unconnected_nodes: BTreeSet<String>,
}

impl SpeechGraph {
    pub fn graph(&self) -> &DiGraph<String, EdgeAttributes> {
        &self.graph
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn unconnected_nodes(&self) -> &BTreeSet<String> {
        &self.unconnected_nodes
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node labels in insertion order.
    pub fn node_labels(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    pub fn contains_node(&self, label: &str) -> bool {
        self.graph.node_weights().any(|w| w == label)
    }

    /// All edges as `(source label, target label, attributes)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &EdgeAttributes)> {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].as_str(),
                self.graph[e.target()].as_str(),
                e.weight(),
            )
        })
    }
}

/// Build the final graph. Nodes enter in first-appearance order over
/// the edge list; repeated labels reuse the existing node, and parallel
/// edges between a node pair are preserved.
pub fn assemble(
    transcript: &str,
    edges: &[RelationEdge],
    unconnected_nodes: BTreeSet<String>,
    sentence_count: usize,
    token_count: usize,
) -> SpeechGraph {
    let mut graph = DiGraph::new();
    let mut indices: BTreeMap<&str, NodeIndex> = BTreeMap::new();

    for edge in edges {
        let source = *indices
            .entry(edge.source.as_str())
            .or_insert_with(|| graph.add_node(edge.source.clone()));
        let target = *indices
            .entry(edge.target.as_str())
            .or_insert_with(|| graph.add_node(edge.target.clone()));
        graph.add_edge(source, target, EdgeAttributes::from(edge));
    }

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        unconnected = unconnected_nodes.len(),
        "assembled speech graph"
    );

    SpeechGraph {
        graph,
        transcript: transcript.to_string(),
        sentence_count,
        token_count,
        unconnected_nodes,
    }
}
