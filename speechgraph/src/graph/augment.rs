//! Folding attachment-edge families into the backbone.

use super::types::{contains_edge, RelationEdge};
use std::collections::BTreeSet;

/// Add oblique attachments directly into the backbone. Obliques carry
/// the argument a preposition introduces ("ran to the park"), which the
/// open-domain extractor frequently misses, so they are treated as
/// backbone-equivalent rather than optional attributes and join before
/// synonym resolution runs.
pub fn add_oblique_edges(edges: &mut Vec<RelationEdge>, oblique_edges: &[RelationEdge]) {
    for oblique in oblique_edges {
        if !contains_edge(edges, oblique) {
            edges.push(oblique.clone());
        }
    }
}

/// Add adjective attachments. With `add_all` set every edge joins;
/// otherwise only edges touching a node already present in the backbone
/// do, so attribute-only islands stay out of the graph.
pub fn add_adjective_edges(
    edges: &mut Vec<RelationEdge>,
    adjective_edges: &[RelationEdge],
    add_all: bool,
) {
    add_family(edges, adjective_edges, add_all);
}

/// Add prepositional attachments, under the same inclusion policy as
/// [`add_adjective_edges`].
pub fn add_preposition_edges(
    edges: &mut Vec<RelationEdge>,
    preposition_edges: &[RelationEdge],
    add_all: bool,
) {
    add_family(edges, preposition_edges, add_all);
}

fn add_family(edges: &mut Vec<RelationEdge>, family: &[RelationEdge], add_all: bool) {
    let backbone_nodes: BTreeSet<String> = edges
        .iter()
        .flat_map(|e| [e.source.clone(), e.target.clone()])
        .collect();

    for candidate in family {
        let connects = add_all
            || backbone_nodes.contains(&candidate.source)
            || backbone_nodes.contains(&candidate.target);
        if connects && !contains_edge(edges, candidate) {
            edges.push(candidate.clone());
        }
    }
}
