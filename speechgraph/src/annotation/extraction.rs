//! Open-domain extraction results as returned by the relation extractor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A text span inside an extraction (argument or relation phrase).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionSpan {
    #[serde(default)]
    pub text: String,
}

impl ExtractionSpan {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The triple part of an extraction: subject, relation phrase, and zero or
/// more object phrases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionTriple {
    #[serde(default)]
    pub arg1: ExtractionSpan,

    #[serde(default)]
    pub rel: ExtractionSpan,

    #[serde(default)]
    pub arg2s: Vec<ExtractionSpan>,

    /// Negation flag from the extractor. Retained, never filtered on.
    #[serde(default)]
    pub negated: bool,

    /// Passive-voice flag from the extractor. Retained, never filtered on.
    #[serde(default)]
    pub passive: bool,
}

/// One confidence-scored extraction instance for a sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionInstance {
    pub confidence: f32,

    /// Sentence text the extractor was given
    #[serde(default)]
    pub sentence: String,

    pub extraction: ExtractionTriple,
}

impl ExtractionInstance {
    /// Convenience constructor for building fixtures.
    pub fn new(confidence: f32, arg1: &str, rel: &str, arg2s: &[&str]) -> Self {
        Self {
            confidence,
            sentence: String::new(),
            extraction: ExtractionTriple {
                arg1: ExtractionSpan::new(arg1),
                rel: ExtractionSpan::new(rel),
                arg2s: arg2s.iter().map(|a| ExtractionSpan::new(*a)).collect(),
                negated: false,
                passive: false,
            },
        }
    }
}

/// Extraction results for a transcript, keyed by 0-based sentence index.
///
/// Sentences the driver skipped (too few tokens) simply have no entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionSet {
    by_sentence: BTreeMap<usize, Vec<ExtractionInstance>>,
}

impl ExtractionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the extraction result for one sentence.
    pub fn insert(&mut self, sentence: usize, instances: Vec<ExtractionInstance>) {
        self.by_sentence.insert(sentence, instances);
    }

    /// Iterate results in sentence order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[ExtractionInstance])> {
        self.by_sentence.iter().map(|(i, v)| (*i, v.as_slice()))
    }

    /// Number of sentences that have a result recorded.
    pub fn sentence_count(&self) -> usize {
        self.by_sentence.len()
    }

    /// Total number of extraction instances across all sentences.
    pub fn instance_count(&self) -> usize {
        self.by_sentence.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_sentence.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extractor_response() {
        let payload = serde_json::json!([
            {
                "confidence": 0.93,
                "sentence": "The dog chased the cat .",
                "extraction": {
                    "arg1": {"text": "The dog"},
                    "rel": {"text": "chased"},
                    "arg2s": [{"text": "the cat"}],
                    "negated": false,
                    "passive": false
                }
            }
        ]);

        let instances: Vec<ExtractionInstance> = serde_json::from_value(payload).unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].extraction.arg1.text, "The dog");
        assert_eq!(instances[0].extraction.arg2s.len(), 1);
        assert!((instances[0].confidence - 0.93).abs() < f32::EPSILON);
    }

    #[test]
    fn test_relation_only_extraction_parses() {
        // Some extractions carry no object phrase at all
        let payload = serde_json::json!([
            {
                "confidence": 0.4,
                "extraction": {
                    "arg1": {"text": "the dog"},
                    "rel": {"text": "ran"},
                    "arg2s": []
                }
            }
        ]);

        let instances: Vec<ExtractionInstance> = serde_json::from_value(payload).unwrap();
        assert!(instances[0].extraction.arg2s.is_empty());
        assert!(!instances[0].extraction.negated);
    }

    #[test]
    fn test_extraction_set_accounting() {
        let mut set = ExtractionSet::new();
        assert!(set.is_empty());

        set.insert(0, vec![ExtractionInstance::new(0.9, "the dog", "chased", &["the cat"])]);
        set.insert(2, Vec::new());

        assert_eq!(set.sentence_count(), 2);
        assert_eq!(set.instance_count(), 1);
        assert!(!set.is_empty());

        let indices: Vec<usize> = set.iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 2], "results iterate in sentence order");
    }
}
