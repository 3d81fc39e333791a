//! The normalization and merge pipeline, from annotator output to the
//! final graph.

use super::assembler::{self, SpeechGraph};
use super::synonyms::SynonymMap;
use super::types::RelationEdge;
use super::word_types::WordTypes;
use super::{augment, cleaner, dependency, merge, openie, splitter, unconnected};
use crate::annotation::{Annotation, ExtractionSet};
use crate::config::PipelineSettings;

/// Run the full pipeline over one transcript's annotator outputs.
///
/// `transcript` is attached to the graph as metadata and should be the
/// text as the speaker produced it, not the cleaned form sent to the
/// annotators. Every stage is a pure transformation; the run cannot
/// fail, it can only produce an edgeless graph.
pub fn run(
    transcript: &str,
    annotation: &Annotation,
    extractions: &ExtractionSet,
    settings: &PipelineSettings,
) -> SpeechGraph {
    let (openie_edges, one_node_relations) = openie::extract_edges(extractions);
    if !one_node_relations.is_empty() {
        tracing::debug!(
            count = one_node_relations.len(),
            "extractions without a second endpoint were set aside"
        );
    }
    let backbone = dependency::backbone_edges(annotation);
    let mut edges = select_backbone(openie_edges, backbone);

    let word_types = WordTypes::classify(annotation);
    let adjective_edges = dependency::adjective_edges(annotation);
    let preposition_edges = dependency::preposition_edges(annotation);
    let oblique_edges = dependency::oblique_edges(annotation);

    augment::add_oblique_edges(&mut edges, &oblique_edges);

    let mut synonyms = SynonymMap::from_annotation(annotation, &word_types);
    splitter::split_compound_nodes(&mut edges, &preposition_edges, &mut synonyms);

    let (mut edges, original_edges) = merge::merge_corefs(edges, &synonyms);
    let (adjective_edges, _) = merge::merge_corefs(adjective_edges, &synonyms);
    let (preposition_edges, _) = merge::merge_corefs(preposition_edges, &synonyms);

    augment::add_adjective_edges(&mut edges, &adjective_edges, settings.add_adjective_edges);
    augment::add_preposition_edges(
        &mut edges,
        &preposition_edges,
        settings.add_all_preposition_edges,
    );

    let unconnected_nodes = unconnected::unconnected_nouns(&edges, &original_edges, &word_types);

    let edges = cleaner::clean_nodes(edges, &word_types);
    let edges = cleaner::clean_parallel_edges(edges);

    assembler::assemble(
        transcript,
        &edges,
        unconnected_nodes,
        annotation.sentence_count(),
        annotation.token_count(),
    )
}

/// Choose the backbone edge set. Selection is global: one open-domain
/// edge anywhere in the transcript discards the dependency backbone
/// entirely, there is no per-sentence fallback.
fn select_backbone(
    openie_edges: Vec<RelationEdge>,
    dependency_edges: Vec<RelationEdge>,
) -> Vec<RelationEdge> {
    if openie_edges.is_empty() && !dependency_edges.is_empty() {
        tracing::info!(
            count = dependency_edges.len(),
            "no open-domain edges; using the dependency backbone"
        );
        dependency_edges
    } else if openie_edges.is_empty() {
        tracing::info!("neither extractor produced backbone edges");
        openie_edges
    } else {
        tracing::info!(
            open_domain = openie_edges.len(),
            dependency = dependency_edges.len(),
            "open-domain edges selected; dependency backbone discarded"
        );
        openie_edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::EdgeOrigin;

    fn edge(source: &str, relation: &str, target: &str, origin: EdgeOrigin) -> RelationEdge {
        RelationEdge::new(source, relation, target, origin, 0)
    }

    #[test]
    fn test_open_domain_edges_win_globally() {
        let openie = vec![edge("dog", "chased", "cat", EdgeOrigin::OpenIe)];
        let backbone = vec![
            edge("dog", "chase", "cat", EdgeOrigin::Dependency),
            edge("boy", "see", "dog", EdgeOrigin::Dependency),
        ];
        let selected = select_backbone(openie, backbone);

        assert_eq!(selected.len(), 1);
        assert!(selected.iter().all(|e| e.origin == EdgeOrigin::OpenIe));
    }

    #[test]
    fn test_dependency_backbone_used_only_as_full_fallback() {
        let backbone = vec![edge("dog", "chase", "cat", EdgeOrigin::Dependency)];
        let selected = select_backbone(Vec::new(), backbone);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].origin, EdgeOrigin::Dependency);
    }

    #[test]
    fn test_no_edges_from_either_extractor() {
        assert!(select_backbone(Vec::new(), Vec::new()).is_empty());
    }
}
