//! Detection of nouns that never made it into any edge.

use super::types::RelationEdge;
use super::word_types::WordTypes;
use std::collections::BTreeSet;

/// Nouns from the transcript appearing in no endpoint of either the
/// final edges or the pre-merge originals. A mentioned but unconnected
/// concept is an analytic signal, so these are reported as graph
/// metadata rather than dropped. Containment is word-level and
/// case-insensitive; reported labels use the noun's original surface
/// form.
pub fn unconnected_nouns(
    final_edges: &[RelationEdge],
    original_edges: &[RelationEdge],
    word_types: &WordTypes,
) -> BTreeSet<String> {
    let connected: BTreeSet<String> = final_edges
        .iter()
        .chain(original_edges)
        .flat_map(|e| [e.source.as_str(), e.target.as_str()])
        .flat_map(|label| label.split_whitespace())
        .map(|word| word.to_lowercase())
        .collect();

    word_types
        .nouns()
        .filter(|noun| !connected.contains(*noun))
        .map(|noun| {
            word_types
                .noun_surface(noun)
                .unwrap_or(noun)
                .to_string()
        })
        .collect()
}
