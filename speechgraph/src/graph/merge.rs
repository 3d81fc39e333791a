//! Coreference merging: rewrite edge endpoints to canonical labels.

use super::synonyms::SynonymMap;
use super::types::RelationEdge;

/// Rewrite every endpoint to its canonical synonym-group label, keeping
/// the pre-merge label in the edge's original endpoint fields. Called
/// once per edge family.
///
/// Returns the merged edges together with the untouched originals; the
/// unconnected-node detector needs the originals to tell "never had an
/// edge" apart from "merged away". Merging relabels but never creates
/// nodes, so the node count cannot grow.
pub fn merge_corefs(
    edges: Vec<RelationEdge>,
    synonyms: &SynonymMap,
) -> (Vec<RelationEdge>, Vec<RelationEdge>) {
    let originals = edges.clone();
    let merged = edges
        .into_iter()
        .map(|mut edge| {
            edge.original_source = edge.source.clone();
            edge.original_target = edge.target.clone();
            let source = synonyms.resolve(&edge.source);
            let target = synonyms.resolve(&edge.target);
            if source != edge.source {
                tracing::debug!(from = %edge.source, to = %source, "merged source node");
            }
            if target != edge.target {
                tracing::debug!(from = %edge.target, to = %target, "merged target node");
            }
            edge.source = source;
            edge.target = target;
            edge
        })
        .collect();
    (merged, originals)
}
