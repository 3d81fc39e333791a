//! Edge extraction from dependency-parse patterns.
//!
//! Four pattern families are recognized, each a pure function of one
//! sentence's dependency edges: predicate backbone (a token governing
//! both a subject and an object), adjective modifiers (`amod`),
//! prepositional attachments (`nmod` plus its `case` marker), and oblique
//! attachments (`obl` plus `case`, anchored at the predicate's subject).

use super::types::{EdgeOrigin, RelationEdge};
use crate::annotation::{Annotation, DependencyEdge, Sentence};
use std::collections::BTreeMap;

/// Relation subtypes that name a construction rather than a preposition.
const NON_PREPOSITION_SUBTYPES: &[&str] = &["poss", "tmod", "npmod", "relcl"];

fn is_subject(dep: &str) -> bool {
    dep == "nsubj" || dep.starts_with("nsubj:")
}

fn is_object(dep: &str) -> bool {
    dep == "obj" || dep == "dobj"
}

fn is_prepositional_modifier(dep: &str) -> bool {
    (dep == "nmod" || dep.starts_with("nmod:")) && dep != "nmod:poss"
}

fn is_oblique(dep: &str) -> bool {
    dep == "obl" || dep.starts_with("obl:")
}

/// Leftmost token index of the simple noun phrase headed at `head`:
/// the head itself or its nearest left-attached determiner, adjective,
/// compound, number, or possessive.
fn phrase_start(deps: &[DependencyEdge], head: usize) -> usize {
    let mut start = head;
    for d in deps {
        if d.governor == head
            && d.dependent < start
            && matches!(
                d.dep.as_str(),
                "det" | "amod" | "compound" | "nummod" | "nmod:poss"
            )
        {
            start = d.dependent;
        }
    }
    start
}

fn span(sentence: &Sentence, start: usize, end: usize) -> String {
    sentence.span_text(start, end + 1)
}

/// The contiguous noun phrase around a token, from its leftmost simple
/// modifier through the token itself ("the yard" for head "yard").
pub(crate) fn noun_phrase(sentence: &Sentence, head: usize) -> String {
    span(sentence, phrase_start(sentence.dependencies(), head), head)
}

/// The preposition that introduces an attachment: the `case` marker on
/// the dependent when present, otherwise the relation subtype (with
/// multi-word subtypes like `out_of` unfolded). Subtypes that name a
/// construction instead of a preposition yield nothing.
fn attachment_preposition(sentence: &Sentence, edge: &DependencyEdge) -> Option<String> {
    if let Some(case) = sentence
        .dependencies()
        .iter()
        .find(|d| d.dep == "case" && d.governor == edge.dependent)
    {
        return Some(case.dependent_gloss.to_lowercase());
    }

    let (_, subtype) = edge.dep.split_once(':')?;
    if NON_PREPOSITION_SUBTYPES.contains(&subtype) {
        return None;
    }
    Some(subtype.replace('_', " "))
}

/// Backbone edges: one `(subject phrase, predicate lemma, object phrase)`
/// edge per token that governs both a subject and an object dependency.
/// Used only when the open-domain extractor produced nothing.
pub fn backbone_edges(annotation: &Annotation) -> Vec<RelationEdge> {
    let mut edges = Vec::new();

    for sentence in &annotation.sentences {
        let deps = sentence.dependencies();

        let mut subjects: BTreeMap<usize, usize> = BTreeMap::new();
        let mut objects: BTreeMap<usize, usize> = BTreeMap::new();
        for d in deps {
            if is_subject(&d.dep) {
                subjects.entry(d.governor).or_insert(d.dependent);
            } else if is_object(&d.dep) {
                objects.entry(d.governor).or_insert(d.dependent);
            }
        }

        for (&governor, &subject) in &subjects {
            let Some(&object) = objects.get(&governor) else {
                continue;
            };
            let Some(predicate) = sentence.token(governor) else {
                continue;
            };
            let source = noun_phrase(sentence, subject);
            let target = noun_phrase(sentence, object);
            if source.is_empty() || target.is_empty() {
                continue;
            }
            edges.push(RelationEdge::new(
                &source,
                &predicate.lemma,
                &target,
                EdgeOrigin::Dependency,
                sentence.index,
            ));
        }
    }

    edges
}

/// Adjective-modifier edges: `amod` attachments rendered as a copular
/// `(noun, "(is)", adjective)` relation.
pub fn adjective_edges(annotation: &Annotation) -> Vec<RelationEdge> {
    let mut edges = Vec::new();

    for sentence in &annotation.sentences {
        for d in sentence.dependencies() {
            if d.dep == "amod" {
                edges.push(RelationEdge::new(
                    &d.governor_gloss,
                    "(is)",
                    &d.dependent_gloss,
                    EdgeOrigin::Adjective,
                    sentence.index,
                ));
            }
        }
    }

    edges
}

/// Prepositional-attachment edges. The source is the full compound span
/// from the governor's phrase through the attachment object ("the dog in
/// the yard"), which is what compound backbone node labels look like;
/// the node splitter matches against it to carve out the head phrase.
pub fn preposition_edges(annotation: &Annotation) -> Vec<RelationEdge> {
    let mut edges = Vec::new();

    for sentence in &annotation.sentences {
        let deps = sentence.dependencies();
        for d in deps {
            if !is_prepositional_modifier(&d.dep) {
                continue;
            }
            // A contiguous compound needs the object to the governor's right
            if d.dependent <= d.governor {
                continue;
            }
            let Some(preposition) = attachment_preposition(sentence, d) else {
                continue;
            };
            let object = noun_phrase(sentence, d.dependent);
            if object.is_empty() {
                continue;
            }
            let compound = span(sentence, phrase_start(deps, d.governor), d.dependent);
            edges.push(RelationEdge::new(
                &compound,
                &preposition,
                &object,
                EdgeOrigin::Preposition,
                sentence.index,
            ));
        }
    }

    edges
}

/// Oblique-attachment edges: `(subject phrase, "verb preposition",
/// oblique object phrase)` for every `obl` attachment whose predicate has
/// a subject. These frequently carry the true argument the open-domain
/// extractor missed, so they join the backbone unconditionally.
pub fn oblique_edges(annotation: &Annotation) -> Vec<RelationEdge> {
    let mut edges = Vec::new();

    for sentence in &annotation.sentences {
        let deps = sentence.dependencies();
        for d in deps {
            if !is_oblique(&d.dep) {
                continue;
            }
            let Some(preposition) = attachment_preposition(sentence, d) else {
                continue;
            };
            let Some(subject) = deps
                .iter()
                .find(|s| is_subject(&s.dep) && s.governor == d.governor)
            else {
                continue;
            };
            let Some(verb) = sentence.token(d.governor) else {
                continue;
            };
            let source = noun_phrase(sentence, subject.dependent);
            let target = noun_phrase(sentence, d.dependent);
            if source.is_empty() || target.is_empty() {
                continue;
            }
            let relation = format!("{} {}", verb.surface(), preposition);
            edges.push(RelationEdge::new(
                &source,
                &relation,
                &target,
                EdgeOrigin::Oblique,
                sentence.index,
            ));
        }
    }

    edges
}
