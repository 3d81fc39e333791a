//! Dependency/coreference annotation as returned by the parsing service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One annotated token within a sentence.
///
/// `index` is the 1-based position in the sentence, matching the indices
/// used by dependency edges and coreference mentions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// 1-based position within the sentence
    pub index: usize,

    /// Token text as the parser normalized it
    pub word: String,

    /// Surface text exactly as it appeared in the transcript
    #[serde(default)]
    pub original_text: String,

    /// Lemmatized form
    pub lemma: String,

    /// Part-of-speech tag (Penn Treebank tag set)
    pub pos: String,
}

impl Token {
    /// The surface form of the token, falling back to the normalized word
    /// when the annotator omitted the original text.
    pub fn surface(&self) -> &str {
        if self.original_text.is_empty() {
            &self.word
        } else {
            &self.original_text
        }
    }
}

/// A grammatical relation between two tokens of one sentence.
///
/// Governor/dependent are 1-based token indices; index 0 is the synthetic
/// ROOT node of the dependency tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    /// Relation type, e.g. "nsubj", "amod", "nmod:in"
    pub dep: String,

    /// 1-based index of the governor token (0 for ROOT)
    pub governor: usize,

    /// Word form of the governor
    pub governor_gloss: String,

    /// 1-based index of the dependent token
    pub dependent: usize,

    /// Word form of the dependent
    pub dependent_gloss: String,
}

/// One sentence of the annotated transcript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    /// 0-based sentence index within the transcript
    #[serde(default)]
    pub index: usize,

    /// Tokens in sentence order
    #[serde(default)]
    pub tokens: Vec<Token>,

    /// Plain dependency tree
    #[serde(default)]
    pub basic_dependencies: Vec<DependencyEdge>,

    /// Enhanced++ dependency graph, when the annotator produced one
    #[serde(default)]
    pub enhanced_plus_plus_dependencies: Vec<DependencyEdge>,
}

impl Sentence {
    /// The dependency edges to walk: enhanced++ when available, otherwise
    /// the basic tree.
    pub fn dependencies(&self) -> &[DependencyEdge] {
        if self.enhanced_plus_plus_dependencies.is_empty() {
            &self.basic_dependencies
        } else {
            &self.enhanced_plus_plus_dependencies
        }
    }

    /// Look up a token by its 1-based index.
    pub fn token(&self, index: usize) -> Option<&Token> {
        if index == 0 {
            return None;
        }
        self.tokens.get(index - 1)
    }

    /// Sentence text rebuilt from token surface forms.
    pub fn text(&self) -> String {
        let words: Vec<&str> = self
            .tokens
            .iter()
            .map(Token::surface)
            .filter(|w| !w.is_empty())
            .collect();
        words.join(" ")
    }

    /// Text of the token span `[start, end)` using 1-based indices, the
    /// convention coreference mentions use.
    pub fn span_text(&self, start: usize, end: usize) -> String {
        if start == 0 || end <= start {
            return String::new();
        }
        let words: Vec<&str> = self
            .tokens
            .iter()
            .filter(|t| t.index >= start && t.index < end)
            .map(Token::surface)
            .collect();
        words.join(" ")
    }
}

/// One mention inside a coreference chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorefMention {
    /// Mention id within the chain
    #[serde(default)]
    pub id: usize,

    /// Mention text as reported by the annotator
    #[serde(default)]
    pub text: String,

    /// 1-based sentence number
    pub sent_num: usize,

    /// 1-based start token index, inclusive
    pub start_index: usize,

    /// 1-based end token index, exclusive
    pub end_index: usize,

    /// 1-based index of the syntactic head token
    #[serde(default)]
    pub head_index: usize,

    /// Whether the annotator designated this mention as the chain
    /// representative
    #[serde(default)]
    pub is_representative_mention: bool,
}

/// Whole-transcript annotation: sentences plus coreference chains.
///
/// Chains are keyed by the annotator's chain id. A `BTreeMap` keeps
/// iteration order stable across runs, which the synonym resolver relies
/// on for deterministic group registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub sentences: Vec<Sentence>,

    #[serde(default)]
    pub corefs: BTreeMap<String, Vec<CorefMention>>,
}

impl Annotation {
    /// Number of sentences in the transcript.
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Total token count across all sentences.
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(|s| s.tokens.len()).sum()
    }

    /// Whether the annotation carries no usable content.
    pub fn is_empty(&self) -> bool {
        self.sentences.iter().all(|s| s.tokens.is_empty())
    }

    /// Text of a coreference mention, preferring the annotator-provided
    /// text and reconstructing it from the token span otherwise.
    pub fn mention_text(&self, mention: &CorefMention) -> String {
        if !mention.text.is_empty() {
            return mention.text.clone();
        }
        if mention.sent_num == 0 {
            return String::new();
        }
        self.sentences
            .get(mention.sent_num - 1)
            .map(|s| s.span_text(mention.start_index, mention.end_index))
            .unwrap_or_default()
    }

    /// Tokens covered by a coreference mention.
    pub fn mention_tokens(&self, mention: &CorefMention) -> Vec<&Token> {
        if mention.sent_num == 0 {
            return Vec::new();
        }
        self.sentences
            .get(mention.sent_num - 1)
            .map(|s| {
                s.tokens
                    .iter()
                    .filter(|t| t.index >= mention.start_index && t.index < mention.end_index)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(index: usize, word: &str, lemma: &str, pos: &str) -> Token {
        Token {
            index,
            word: word.to_string(),
            original_text: word.to_string(),
            lemma: lemma.to_string(),
            pos: pos.to_string(),
        }
    }

    #[test]
    fn test_parse_annotator_response() {
        let payload = serde_json::json!({
            "sentences": [
                {
                    "index": 0,
                    "tokens": [
                        {"index": 1, "word": "The", "originalText": "The", "lemma": "the", "pos": "DT"},
                        {"index": 2, "word": "dog", "originalText": "dog", "lemma": "dog", "pos": "NN"},
                        {"index": 3, "word": "ran", "originalText": "ran", "lemma": "run", "pos": "VBD"}
                    ],
                    "basicDependencies": [
                        {"dep": "ROOT", "governor": 0, "governorGloss": "ROOT", "dependent": 3, "dependentGloss": "ran"},
                        {"dep": "nsubj", "governor": 3, "governorGloss": "ran", "dependent": 2, "dependentGloss": "dog"}
                    ],
                    "enhancedPlusPlusDependencies": [
                        {"dep": "nsubj", "governor": 3, "governorGloss": "ran", "dependent": 2, "dependentGloss": "dog"}
                    ]
                }
            ],
            "corefs": {
                "3": [
                    {"id": 0, "text": "The dog", "sentNum": 1, "startIndex": 1,
                     "endIndex": 3, "headIndex": 2, "isRepresentativeMention": true}
                ]
            }
        });

        let annotation: Annotation = serde_json::from_value(payload).unwrap();
        assert_eq!(annotation.sentence_count(), 1);
        assert_eq!(annotation.token_count(), 3);
        assert!(!annotation.is_empty());

        let sentence = &annotation.sentences[0];
        assert_eq!(sentence.text(), "The dog ran");
        assert_eq!(sentence.token(2).unwrap().lemma, "dog");
        assert_eq!(sentence.dependencies().len(), 1, "enhanced++ preferred");

        let mention = &annotation.corefs["3"][0];
        assert!(mention.is_representative_mention);
        assert_eq!(annotation.mention_text(mention), "The dog");
    }

    #[test]
    fn test_span_text_bounds() {
        let sentence = Sentence {
            index: 0,
            tokens: vec![
                token(1, "a", "a", "DT"),
                token(2, "small", "small", "JJ"),
                token(3, "house", "house", "NN"),
            ],
            basic_dependencies: Vec::new(),
            enhanced_plus_plus_dependencies: Vec::new(),
        };

        assert_eq!(sentence.span_text(1, 3), "a small");
        assert_eq!(sentence.span_text(2, 4), "small house");
        assert_eq!(sentence.span_text(0, 2), "");
        assert_eq!(sentence.span_text(3, 3), "");
    }

    #[test]
    fn test_mention_text_reconstructed_from_span() {
        let annotation = Annotation {
            sentences: vec![Sentence {
                index: 0,
                tokens: vec![
                    token(1, "The", "the", "DT"),
                    token(2, "cat", "cat", "NN"),
                ],
                basic_dependencies: Vec::new(),
                enhanced_plus_plus_dependencies: Vec::new(),
            }],
            corefs: BTreeMap::new(),
        };

        let mention = CorefMention {
            id: 0,
            text: String::new(),
            sent_num: 1,
            start_index: 1,
            end_index: 3,
            head_index: 2,
            is_representative_mention: false,
        };

        assert_eq!(annotation.mention_text(&mention), "The cat");
    }

    #[test]
    fn test_empty_annotation() {
        let annotation = Annotation::default();
        assert!(annotation.is_empty());
        assert_eq!(annotation.sentence_count(), 0);
        assert_eq!(annotation.token_count(), 0);
    }
}
