//! External tests for the transcript analysis driver
//!
//! The annotation services are replaced with fixture-backed
//! implementations of the client traits, covering:
//! - The clean/annotate/extract/normalize loop end to end
//! - Sentence skipping for one-token utterances
//! - Error propagation from either service
//! - The file-based batch workflow (open, process, dump, reload)

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;

use speechgraph::analyzer::{TranscriptAnalysis, TranscriptFile};
use speechgraph::annotation::{Annotation, ExtractionInstance};
use speechgraph::clients::{ClientError, DependencyAnnotator, RelationExtractor};
use speechgraph::config::SpeechGraphConfig;
use speechgraph::SpeechGraphError;

// ============================================================================
// FIXTURE SERVICES
// ============================================================================

/// Returns a canned annotation and records the text it was asked about.
struct FixtureAnnotator {
    annotation: Annotation,
    received: RefCell<Option<String>>,
}

impl FixtureAnnotator {
    fn new(annotation: Annotation) -> Self {
        Self {
            annotation,
            received: RefCell::new(None),
        }
    }
}

impl DependencyAnnotator for FixtureAnnotator {
    fn annotate(&self, text: &str) -> Result<Annotation, ClientError> {
        *self.received.borrow_mut() = Some(text.to_string());
        Ok(self.annotation.clone())
    }
}

/// Answers per sentence text and records every call.
struct FixtureExtractor {
    responses: BTreeMap<String, Vec<ExtractionInstance>>,
    calls: RefCell<Vec<String>>,
}

impl FixtureExtractor {
    fn new(responses: &[(&str, Vec<ExtractionInstance>)]) -> Self {
        Self {
            responses: responses
                .iter()
                .map(|(sentence, instances)| (sentence.to_string(), instances.clone()))
                .collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn empty() -> Self {
        Self::new(&[])
    }
}

impl RelationExtractor for FixtureExtractor {
    fn extract(&self, sentence: &str) -> Result<Vec<ExtractionInstance>, ClientError> {
        self.calls.borrow_mut().push(sentence.to_string());
        Ok(self.responses.get(sentence).cloned().unwrap_or_default())
    }
}

struct FailingAnnotator;

impl DependencyAnnotator for FailingAnnotator {
    fn annotate(&self, _text: &str) -> Result<Annotation, ClientError> {
        Err(ClientError::Status {
            status: 500,
            body: "annotator unavailable".to_string(),
        })
    }
}

struct FailingExtractor;

impl RelationExtractor for FailingExtractor {
    fn extract(&self, _sentence: &str) -> Result<Vec<ExtractionInstance>, ClientError> {
        Err(ClientError::MalformedResponse("not json".to_string()))
    }
}

// ============================================================================
// ANNOTATION FIXTURES
// ============================================================================

/// "I am watching the dog. It is barking." as the annotator sees it.
fn watching_annotation() -> Annotation {
    serde_json::from_value(serde_json::json!({
        "sentences": [
            {
                "index": 0,
                "tokens": [
                    {"index": 1, "word": "I", "originalText": "I", "lemma": "I", "pos": "PRP"},
                    {"index": 2, "word": "am", "originalText": "am", "lemma": "be", "pos": "VBP"},
                    {"index": 3, "word": "watching", "originalText": "watching", "lemma": "watch", "pos": "VBG"},
                    {"index": 4, "word": "the", "originalText": "the", "lemma": "the", "pos": "DT"},
                    {"index": 5, "word": "dog", "originalText": "dog", "lemma": "dog", "pos": "NN"}
                ]
            },
            {
                "index": 1,
                "tokens": [
                    {"index": 1, "word": "It", "originalText": "It", "lemma": "it", "pos": "PRP"},
                    {"index": 2, "word": "is", "originalText": "is", "lemma": "be", "pos": "VBZ"},
                    {"index": 3, "word": "barking", "originalText": "barking", "lemma": "bark", "pos": "VBG"}
                ]
            }
        ],
        "corefs": {}
    }))
    .unwrap()
}

/// A one-word utterance followed by a full sentence.
fn short_then_chase_annotation() -> Annotation {
    serde_json::from_value(serde_json::json!({
        "sentences": [
            {
                "index": 0,
                "tokens": [
                    {"index": 1, "word": "Yes", "originalText": "Yes", "lemma": "yes", "pos": "UH"}
                ]
            },
            {
                "index": 1,
                "tokens": [
                    {"index": 1, "word": "The", "originalText": "The", "lemma": "the", "pos": "DT"},
                    {"index": 2, "word": "dog", "originalText": "dog", "lemma": "dog", "pos": "NN"},
                    {"index": 3, "word": "chased", "originalText": "chased", "lemma": "chase", "pos": "VBD"},
                    {"index": 4, "word": "the", "originalText": "the", "lemma": "the", "pos": "DT"},
                    {"index": 5, "word": "cat", "originalText": "cat", "lemma": "cat", "pos": "NN"}
                ]
            }
        ],
        "corefs": {}
    }))
    .unwrap()
}

// ============================================================================
// DRIVER BEHAVIOR
// ============================================================================

#[test]
fn test_process_cleans_annotates_extracts_and_builds() {
    let raw = "Um, I'm watching the dog. [coughs] It's barking.";
    let annotator = FixtureAnnotator::new(watching_annotation());
    let extractor = FixtureExtractor::new(&[(
        "I am watching the dog",
        vec![ExtractionInstance::new(0.81, "I", "am watching", &["the dog"])],
    )]);
    let config = SpeechGraphConfig::default();

    let mut analysis = TranscriptAnalysis::new(raw);
    let graph = analysis.process(&annotator, &extractor, &config).unwrap();

    // The annotator received the cleaned form, not the raw transcript
    assert_eq!(
        annotator.received.borrow().as_deref(),
        Some("I am watching the dog. It is barking.")
    );
    // Both multi-token sentences went to the extractor
    assert_eq!(
        *extractor.calls.borrow(),
        vec!["I am watching the dog", "It is barking"]
    );

    assert!(graph.contains_node("dog"));
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.sentence_count(), 2);
    assert_eq!(graph.token_count(), 8);
    // Metadata keeps the transcript exactly as the speaker produced it
    assert_eq!(graph.transcript(), raw);
    assert_eq!(analysis.transcript(), raw);
}

#[test]
fn test_one_token_sentences_never_reach_the_extractor() {
    let annotator = FixtureAnnotator::new(short_then_chase_annotation());
    let extractor = FixtureExtractor::empty();
    let config = SpeechGraphConfig::default();

    let mut analysis = TranscriptAnalysis::new("Yes. The dog chased the cat.");
    analysis.process(&annotator, &extractor, &config).unwrap();

    assert_eq!(*extractor.calls.borrow(), vec!["The dog chased the cat"]);
}

#[test]
fn test_annotator_failure_propagates() {
    let extractor = FixtureExtractor::empty();
    let config = SpeechGraphConfig::default();

    let mut analysis = TranscriptAnalysis::new("The dog ran.");
    let err = analysis
        .process(&FailingAnnotator, &extractor, &config)
        .unwrap_err();

    assert!(matches!(err, SpeechGraphError::UpstreamAnnotation(_)));
    assert!(matches!(
        analysis.graph(),
        Err(SpeechGraphError::GraphNotReady)
    ));
    assert!(extractor.calls.borrow().is_empty());
}

#[test]
fn test_extractor_failure_propagates() {
    let annotator = FixtureAnnotator::new(watching_annotation());
    let config = SpeechGraphConfig::default();

    let mut analysis = TranscriptAnalysis::new("I'm watching the dog. It's barking.");
    let err = analysis
        .process(&annotator, &FailingExtractor, &config)
        .unwrap_err();

    assert!(matches!(err, SpeechGraphError::UpstreamAnnotation(_)));
}

// ============================================================================
// FILE WORKFLOW
// ============================================================================

#[test]
fn test_file_workflow_processes_dumps_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let transcript_path = dir.path().join("interview-01.txt");
    fs::write(&transcript_path, "I'm watching the dog. It's barking.").unwrap();
    let output_dir = dir.path().join("graphs");

    let annotator = FixtureAnnotator::new(watching_annotation());
    let extractor = FixtureExtractor::new(&[(
        "I am watching the dog",
        vec![ExtractionInstance::new(0.81, "I", "am watching", &["the dog"])],
    )]);
    let config = SpeechGraphConfig::default();

    let mut file = TranscriptFile::open(&transcript_path, Some(output_dir.clone())).unwrap();
    assert!(file.missing());

    file.process(&annotator, &extractor, &config).unwrap();
    file.dump().unwrap();
    assert!(!file.missing());
    assert!(output_dir.join("interview-01.json").is_file());

    // Reopening finds the artifact and skips reprocessing
    let reopened = TranscriptFile::open(&transcript_path, Some(output_dir)).unwrap();
    assert!(!reopened.missing());
    let original = file.analysis().graph().unwrap();
    let reloaded = reopened.analysis().graph().unwrap();
    assert_eq!(
        serde_json::to_string(original).unwrap(),
        serde_json::to_string(reloaded).unwrap(),
        "the reloaded artifact matches what was dumped"
    );
}

#[test]
fn test_open_rejects_missing_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let result = TranscriptFile::open(dir.path().join("nope.txt"), None);
    assert!(matches!(result, Err(SpeechGraphError::Io(_))));
}
