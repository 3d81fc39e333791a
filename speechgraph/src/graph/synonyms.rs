//! Node-label synonym groups from coreference chains and appositives.

use super::dependency;
use super::types::normalize_label;
use super::word_types::WordTypes;
use crate::annotation::{Annotation, CorefMention};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Equivalence groups over node labels, resolved through a disjoint-set
/// structure so overlapping chains cannot produce order-dependent
/// results. Each group has one canonical label; when two groups collide
/// the earlier-registered one keeps its canonical and the collision is
/// logged rather than surfaced as an error, because coreference signal is
/// noisy by nature.
#[derive(Debug, Clone, Default)]
pub struct SynonymMap {
    parent: BTreeMap<String, String>,
    order: BTreeMap<String, usize>,
    registrations: usize,
}

impl SynonymMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from the annotation's coreference chains and
    /// appositive constructions.
    ///
    /// Chains are walked in ascending id order. Within a chain, only
    /// noun-bearing mentions and lone possessive pronouns participate;
    /// determiner and interjection mentions carry no entity content. The
    /// canonical label is the representative mention when it bears a
    /// noun, otherwise the longest noun-bearing mention, with ties broken
    /// toward the earliest position. A chain with fewer than two
    /// participating mentions registers nothing.
    pub fn from_annotation(annotation: &Annotation, word_types: &WordTypes) -> Self {
        let mut map = SynonymMap::new();

        let mut chains: Vec<(&String, &Vec<CorefMention>)> = annotation.corefs.iter().collect();
        chains.sort_by_key(|(id, _)| (id.parse::<u64>().unwrap_or(u64::MAX), (*id).clone()));

        for (id, mentions) in chains {
            let candidates: Vec<MentionCandidate<'_>> = mentions
                .iter()
                .filter_map(|m| MentionCandidate::classify(annotation, word_types, m))
                .collect();
            if candidates.len() < 2 {
                continue;
            }

            let canonical = candidates
                .iter()
                .find(|c| c.mention.is_representative_mention && c.noun_bearing)
                .or_else(|| {
                    candidates
                        .iter()
                        .filter(|c| c.noun_bearing)
                        .max_by_key(|c| {
                            (
                                c.label.chars().count(),
                                Reverse((c.mention.sent_num, c.mention.start_index)),
                            )
                        })
                })
                .map(|c| c.label.clone());
            let Some(canonical) = canonical else {
                // nothing noun-bearing to anchor the group
                continue;
            };

            for candidate in &candidates {
                map.register(&canonical, &candidate.label);
            }
            tracing::debug!(
                chain = %id,
                canonical = %canonical,
                mentions = candidates.len(),
                "registered coreference chain"
            );
        }

        for sentence in &annotation.sentences {
            for d in sentence.dependencies() {
                if d.dep == "appos" {
                    let head = dependency::noun_phrase(sentence, d.governor);
                    let apposed = dependency::noun_phrase(sentence, d.dependent);
                    if !head.is_empty() && !apposed.is_empty() {
                        map.register(&head, &apposed);
                    }
                }
            }
        }

        map
    }

    /// Add `member` to the group whose canonical is `canonical`. If the
    /// member already belongs to another group, the two groups unite and
    /// the earlier-registered root keeps the canonical.
    pub fn register(&mut self, canonical: &str, member: &str) {
        let canonical = normalize_label(canonical);
        let member = normalize_label(member);
        if canonical.is_empty() || member.is_empty() || canonical == member {
            return;
        }

        let prior = self
            .parent
            .contains_key(&member)
            .then(|| self.find(&member));

        self.ensure(&canonical);
        self.ensure(&member);

        let root_canonical = self.find(&canonical);
        let root_member = self.find(&member);
        if root_canonical == root_member {
            return;
        }

        if let Some(prior_root) = prior
            && prior_root != root_canonical
        {
            tracing::debug!(
                label = %member,
                kept = %prior_root,
                claimed = %canonical,
                "label claimed by a second synonym group; earlier group keeps it"
            );
        }

        let (winner, loser) = if self.order[&root_canonical] <= self.order[&root_member] {
            (root_canonical, root_member)
        } else {
            (root_member, root_canonical)
        };
        self.parent.insert(loser, winner);
    }

    /// Force `from` and its whole group to resolve through `to`,
    /// regardless of registration order. Node splitting uses this when a
    /// compound label is rewritten to its head phrase.
    pub fn redirect(&mut self, from: &str, to: &str) {
        let from = normalize_label(from);
        let to = normalize_label(to);
        if from.is_empty() || to.is_empty() || from == to {
            return;
        }
        self.ensure(&from);
        self.ensure(&to);

        let root_from = self.find(&from);
        let root_to = self.find(&to);
        if root_from == root_to {
            return;
        }
        // Keep the earliest order on the surviving root so later unions
        // still resolve deterministically
        let min_order = self.order[&root_from].min(self.order[&root_to]);
        self.order.insert(root_to.clone(), min_order);
        self.parent.insert(root_from, root_to);
    }

    /// Canonical label for `label`; labels in no group map to themselves.
    pub fn resolve(&self, label: &str) -> String {
        let normalized = normalize_label(label);
        if self.parent.contains_key(&normalized) {
            self.find(&normalized)
        } else {
            normalized
        }
    }

    /// Whether the map has seen this label in any group.
    pub fn contains(&self, label: &str) -> bool {
        self.parent.contains_key(&normalize_label(label))
    }

    /// Number of labels known to the map.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    fn ensure(&mut self, label: &str) {
        if !self.parent.contains_key(label) {
            self.parent.insert(label.to_string(), label.to_string());
            self.order.insert(label.to_string(), self.registrations);
            self.registrations += 1;
        }
    }

    fn find(&self, label: &str) -> String {
        let mut current = label;
        loop {
            match self.parent.get(current) {
                Some(next) if next != current => current = next,
                _ => return current.to_string(),
            }
        }
    }
}

struct MentionCandidate<'a> {
    mention: &'a CorefMention,
    label: String,
    noun_bearing: bool,
}

impl<'a> MentionCandidate<'a> {
    /// A mention participates in a group when its span bears a noun, or
    /// when it is a lone possessive pronoun.
    fn classify(
        annotation: &Annotation,
        word_types: &WordTypes,
        mention: &'a CorefMention,
    ) -> Option<Self> {
        let label = normalize_label(&annotation.mention_text(mention));
        if label.is_empty() {
            return None;
        }
        let tokens = annotation.mention_tokens(mention);
        if tokens.is_empty() {
            return None;
        }
        let noun_bearing = tokens.iter().any(|t| word_types.is_noun(t.surface()));
        let lone_possessive =
            tokens.len() == 1 && word_types.is_possessive_pronoun(tokens[0].surface());
        (noun_bearing || lone_possessive).then_some(Self {
            mention,
            label,
            noun_bearing,
        })
    }
}
