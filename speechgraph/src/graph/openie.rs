//! Backbone edge construction from open-domain extractions.

use super::types::{EdgeOrigin, OneNodeRelation, RelationEdge};
use crate::annotation::ExtractionSet;

/// Turn the open-domain extraction results into backbone edges.
///
/// Each instance with a subject, relation, and at least one object phrase
/// becomes one edge per object phrase. Instances with no usable object
/// are returned separately as one-node relations: without a second
/// endpoint they cannot be graphed, but dropping them silently would hide
/// extractor behavior from the logs.
pub fn extract_edges(extractions: &ExtractionSet) -> (Vec<RelationEdge>, Vec<OneNodeRelation>) {
    let mut edges = Vec::new();
    let mut one_node = Vec::new();

    for (sentence, instances) in extractions.iter() {
        for instance in instances {
            let triple = &instance.extraction;
            let subject = triple.arg1.text.trim();
            let relation = triple.rel.text.trim();
            if subject.is_empty() || relation.is_empty() {
                continue;
            }

            let objects: Vec<&str> = triple
                .arg2s
                .iter()
                .map(|a| a.text.trim())
                .filter(|t| !t.is_empty())
                .collect();

            if objects.is_empty() {
                one_node.push(
                    OneNodeRelation::new(subject, relation, sentence)
                        .with_confidence(instance.confidence),
                );
                continue;
            }

            for object in objects {
                edges.push(
                    RelationEdge::new(subject, relation, object, EdgeOrigin::OpenIe, sentence)
                        .with_confidence(instance.confidence),
                );
            }
        }
    }

    (edges, one_node)
}
