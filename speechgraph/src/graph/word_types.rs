//! Word-type classification from part-of-speech tags.

use crate::annotation::Annotation;
use std::collections::{BTreeMap, BTreeSet};

/// Token classification for the whole transcript: nouns, possessive
/// pronouns, determiners, and adjectives, plus a lookup that recovers the
/// original-case surface form of a noun after labels have been lowercased.
///
/// All sets hold lowercased surface forms. Classification is a pure
/// function of the annotation; an empty annotation yields empty sets.
#[derive(Debug, Clone, Default)]
pub struct WordTypes {
    nouns: BTreeSet<String>,
    possessive_pronouns: BTreeSet<String>,
    determiners: BTreeSet<String>,
    adjectives: BTreeSet<String>,
    noun_surface: BTreeMap<String, String>,
}

impl WordTypes {
    /// Classify every token of the annotation by its part-of-speech tag:
    /// `NN*` nouns (common and proper, singular and plural), `PRP$`/`WP$`
    /// possessive pronouns, `DT` determiners, `JJ*` adjectives.
    pub fn classify(annotation: &Annotation) -> Self {
        let mut types = WordTypes::default();

        for sentence in &annotation.sentences {
            for token in &sentence.tokens {
                let surface = token.surface();
                if surface.is_empty() {
                    continue;
                }
                let lowered = surface.to_lowercase();

                if token.pos.starts_with("NN") {
                    types.nouns.insert(lowered.clone());
                    // First occurrence wins so repeated mentions cannot
                    // flip the recorded casing between runs
                    types.noun_surface.entry(lowered).or_insert_with(|| surface.to_string());
                } else if token.pos == "PRP$" || token.pos == "WP$" {
                    types.possessive_pronouns.insert(lowered);
                } else if token.pos == "DT" {
                    types.determiners.insert(lowered);
                } else if token.pos.starts_with("JJ") {
                    types.adjectives.insert(lowered);
                }
            }
        }

        types
    }

    pub fn is_noun(&self, word: &str) -> bool {
        self.nouns.contains(&word.to_lowercase())
    }

    pub fn is_possessive_pronoun(&self, word: &str) -> bool {
        self.possessive_pronouns.contains(&word.to_lowercase())
    }

    pub fn is_determiner(&self, word: &str) -> bool {
        self.determiners.contains(&word.to_lowercase())
    }

    pub fn is_adjective(&self, word: &str) -> bool {
        self.adjectives.contains(&word.to_lowercase())
    }

    /// Original-case surface form of a noun, when one was recorded.
    pub fn noun_surface(&self, word: &str) -> Option<&str> {
        self.noun_surface.get(&word.to_lowercase()).map(String::as_str)
    }

    /// All classified nouns, lowercased, in sorted order.
    pub fn nouns(&self) -> impl Iterator<Item = &str> {
        self.nouns.iter().map(String::as_str)
    }

    pub fn noun_count(&self) -> usize {
        self.nouns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Sentence, Token};

    fn token(index: usize, word: &str, lemma: &str, pos: &str) -> Token {
        Token {
            index,
            word: word.to_string(),
            original_text: word.to_string(),
            lemma: lemma.to_string(),
            pos: pos.to_string(),
        }
    }

    fn annotation(tokens: Vec<Token>) -> Annotation {
        Annotation {
            sentences: vec![Sentence {
                index: 0,
                tokens,
                basic_dependencies: Vec::new(),
                enhanced_plus_plus_dependencies: Vec::new(),
            }],
            corefs: Default::default(),
        }
    }

    #[test]
    fn test_pos_mapping() {
        let annotation = annotation(vec![
            token(1, "The", "the", "DT"),
            token(2, "happy", "happy", "JJ"),
            token(3, "dog", "dog", "NN"),
            token(4, "chased", "chase", "VBD"),
            token(5, "his", "his", "PRP$"),
            token(6, "ball", "ball", "NN"),
        ]);

        let types = WordTypes::classify(&annotation);
        assert!(types.is_noun("dog"));
        assert!(types.is_noun("ball"));
        assert!(types.is_adjective("happy"));
        assert!(types.is_determiner("the"));
        assert!(types.is_possessive_pronoun("his"));
        assert!(!types.is_noun("chased"));
        assert_eq!(types.noun_count(), 2);
    }

    #[test]
    fn test_proper_noun_surface_restoration() {
        let annotation = annotation(vec![
            token(1, "John", "John", "NNP"),
            token(2, "laughed", "laugh", "VBD"),
        ]);

        let types = WordTypes::classify(&annotation);
        assert!(types.is_noun("john"), "lookup is case-insensitive");
        assert_eq!(types.noun_surface("john"), Some("John"));
        assert_eq!(types.noun_surface("laughed"), None);
    }

    #[test]
    fn test_first_surface_form_wins() {
        let annotation = annotation(vec![
            token(1, "Dogs", "dog", "NNS"),
            token(2, "and", "and", "CC"),
            token(3, "dogs", "dog", "NNS"),
        ]);

        let types = WordTypes::classify(&annotation);
        assert_eq!(types.noun_surface("dogs"), Some("Dogs"));
    }

    #[test]
    fn test_empty_annotation_yields_empty_sets() {
        let types = WordTypes::classify(&Annotation::default());
        assert_eq!(types.noun_count(), 0);
        assert!(!types.is_determiner("the"));
    }
}
