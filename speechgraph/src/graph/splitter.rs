//! Splitting of compound nodes joined by an embedded preposition.

use super::synonyms::SynonymMap;
use super::types::{contains_edge, RelationEdge};

/// Split node labels that match a prepositional attachment's source span,
/// e.g. "the dog in the yard" with attachment ("the dog in the yard",
/// "in", "the yard"). The compound label shrinks to its head phrase and
/// the attachment itself joins the backbone as an edge from the head, so
/// no content is lost. The synonym map learns the rewrite so coreference
/// merging later maps any remaining occurrence of the compound to the
/// head.
///
/// Runs before coreference merging; merging operates on final node
/// identities.
pub fn split_compound_nodes(
    edges: &mut Vec<RelationEdge>,
    preposition_edges: &[RelationEdge],
    synonyms: &mut SynonymMap,
) {
    for attachment in preposition_edges {
        let Some(head) = head_of_compound(&attachment.source, &attachment.relation) else {
            continue;
        };
        if attachment.target.is_empty() {
            continue;
        }

        let endpoint_matches = edges
            .iter()
            .any(|e| e.touches(&attachment.source));
        if !endpoint_matches && !synonyms.contains(&attachment.source) {
            continue;
        }

        for edge in edges.iter_mut() {
            if edge.source == attachment.source {
                edge.source = head.clone();
            }
            if edge.target == attachment.source {
                edge.target = head.clone();
            }
        }
        synonyms.redirect(&attachment.source, &head);

        let split_edge = RelationEdge::new(
            &head,
            &attachment.relation,
            &attachment.target,
            attachment.origin,
            attachment.sentence,
        );
        if !contains_edge(edges, &split_edge) {
            tracing::debug!(
                compound = %attachment.source,
                head = %head,
                preposition = %attachment.relation,
                "split compound node"
            );
            edges.push(split_edge);
        }
    }
}

/// The part of `compound` before the first embedded ` {preposition} `,
/// when the preposition occurs on a word boundary with text on both
/// sides.
fn head_of_compound(compound: &str, preposition: &str) -> Option<String> {
    if preposition.is_empty() {
        return None;
    }
    let needle = format!(" {preposition} ");
    let (head, tail) = compound.split_once(&needle)?;
    (!head.is_empty() && !tail.is_empty()).then(|| head.to_string())
}
