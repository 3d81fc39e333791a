//! Final node-label cleanup and parallel-edge deduplication.

use super::types::RelationEdge;
use super::word_types::WordTypes;
use std::collections::BTreeSet;

/// Strip residual determiners and possessive pronouns from the ends of
/// every node label and restore the original surface case of nouns.
/// Edges whose endpoint becomes empty are dropped, as are self-loops the
/// extractors produced directly; self-loops created by merging stay,
/// since their endpoints genuinely denoted the same entity.
///
/// Cleaning an already-clean edge list is a fixed point.
pub fn clean_nodes(edges: Vec<RelationEdge>, word_types: &WordTypes) -> Vec<RelationEdge> {
    edges
        .into_iter()
        .filter_map(|mut edge| {
            let source = clean_label(&edge.source, word_types);
            let target = clean_label(&edge.target, word_types);
            if source.is_empty() || target.is_empty() {
                tracing::debug!(
                    source = %edge.source,
                    target = %edge.target,
                    "dropping edge with empty endpoint after cleaning"
                );
                return None;
            }
            edge.source = source;
            edge.target = target;
            if edge.is_self_loop() && !edge.had_distinct_endpoints() {
                tracing::debug!(node = %edge.source, relation = %edge.relation, "dropping degenerate self-loop");
                return None;
            }
            Some(edge)
        })
        .collect()
}

/// Collapse edges sharing `(source, target, relation)`, keeping the
/// first. Edges between the same endpoints with different relations are
/// retained; the graph is a multigraph.
pub fn clean_parallel_edges(edges: Vec<RelationEdge>) -> Vec<RelationEdge> {
    let mut seen: BTreeSet<(String, String, String)> = BTreeSet::new();
    edges
        .into_iter()
        .filter(|edge| {
            seen.insert((
                edge.source.clone(),
                edge.target.clone(),
                edge.relation.clone(),
            ))
        })
        .collect()
}

fn clean_label(label: &str, word_types: &WordTypes) -> String {
    let words: Vec<&str> = label.split_whitespace().collect();

    let strippable =
        |word: &str| word_types.is_determiner(word) || word_types.is_possessive_pronoun(word);
    let mut start = 0;
    let mut end = words.len();
    while start < end && strippable(words[start]) {
        start += 1;
    }
    while end > start && strippable(words[end - 1]) {
        end -= 1;
    }

    words[start..end]
        .iter()
        .map(|word| word_types.noun_surface(word).unwrap_or(word).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
