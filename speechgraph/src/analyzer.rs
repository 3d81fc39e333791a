//! Per-transcript orchestration: cleaning, annotation, extraction, and the
//! graph pipeline, plus file-based persistence of finished graphs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::annotation::ExtractionSet;
use crate::clients::{DependencyAnnotator, RelationExtractor};
use crate::config::SpeechGraphConfig;
use crate::graph::{pipeline, SpeechGraph};
use crate::preprocess;
use crate::{Result, SpeechGraphError};

/// One transcript and its journey through the pipeline.
///
/// The annotation services are passed in as trait objects, so a run can use
/// the real HTTP clients or any substitute backend.
#[derive(Debug, Clone)]
pub struct TranscriptAnalysis {
    transcript: String,
    graph: Option<SpeechGraph>,
}

impl TranscriptAnalysis {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            graph: None,
        }
    }

    /// The transcript as the speaker produced it.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Run the full pipeline against the given annotation services.
    ///
    /// The cleaned transcript goes to the annotators; the graph keeps the
    /// original text as metadata. Sentences with one token or fewer are not
    /// sent to the relation extractor, the extractor chokes on them.
    pub fn process(
        &mut self,
        annotator: &dyn DependencyAnnotator,
        extractor: &dyn RelationExtractor,
        config: &SpeechGraphConfig,
    ) -> Result<&SpeechGraph> {
        let cleaned = preprocess::clean_transcript(&self.transcript);
        tracing::debug!(
            original_len = self.transcript.len(),
            cleaned_len = cleaned.len(),
            "transcript cleaned"
        );

        let annotation = annotator.annotate(&cleaned)?;
        if annotation.is_empty() {
            return Err(SpeechGraphError::UpstreamAnnotation(
                "the annotator returned no sentences for this transcript".to_string(),
            ));
        }

        let mut extractions = ExtractionSet::new();
        for sentence in &annotation.sentences {
            if sentence.tokens.len() > 1 {
                let instances = extractor.extract(&sentence.text())?;
                extractions.insert(sentence.index, instances);
            } else {
                tracing::info!(
                    sentence = sentence.index,
                    "sentence has one token or fewer; skipping relation extraction"
                );
            }
        }

        let graph = pipeline::run(&self.transcript, &annotation, &extractions, &config.pipeline);
        Ok(self.graph.insert(graph))
    }

    /// The finished graph.
    pub fn graph(&self) -> Result<&SpeechGraph> {
        self.graph.as_ref().ok_or(SpeechGraphError::GraphNotReady)
    }

    /// Consume the analysis, yielding the finished graph.
    pub fn into_graph(self) -> Result<SpeechGraph> {
        self.graph.ok_or(SpeechGraphError::GraphNotReady)
    }
}

/// A transcript on disk plus the output location for its graph artifact.
///
/// Artifacts are pretty-printed JSON named after the transcript file stem.
/// Opening a transcript whose artifact already exists loads the finished
/// graph, so repeated batch runs skip work that is already done.
#[derive(Debug)]
pub struct TranscriptFile {
    path: PathBuf,
    output_dir: Option<PathBuf>,
    analysis: TranscriptAnalysis,
}

impl TranscriptFile {
    /// Open a transcript file, loading the artifact from an earlier run when
    /// one exists in the output directory.
    pub fn open(path: impl Into<PathBuf>, output_dir: Option<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(SpeechGraphError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("transcript file {} does not exist", path.display()),
            )));
        }
        let transcript = fs::read_to_string(&path)?;

        let mut file = Self {
            analysis: TranscriptAnalysis::new(transcript),
            path,
            output_dir,
        };
        file.load_graph()?;
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn analysis(&self) -> &TranscriptAnalysis {
        &self.analysis
    }

    /// Where the artifact for this transcript lives, when an output
    /// directory is configured.
    pub fn output_file(&self) -> Option<PathBuf> {
        let output_dir = self.output_dir.as_ref()?;
        let stem = self.path.file_stem()?;
        let mut name = stem.to_os_string();
        name.push(".json");
        Some(output_dir.join(name))
    }

    /// Whether the artifact has not been produced yet.
    pub fn missing(&self) -> bool {
        self.output_file().is_none_or(|f| !f.exists())
    }

    /// Load a previously produced artifact, if one exists. A missing
    /// artifact is not an error.
    pub fn load_graph(&mut self) -> Result<()> {
        let Some(output_file) = self.output_file() else {
            return Ok(());
        };
        if !output_file.exists() {
            return Ok(());
        }

        let payload = fs::read_to_string(&output_file)?;
        let graph: SpeechGraph = serde_json::from_str(&payload)?;
        tracing::debug!(
            path = %output_file.display(),
            "loaded graph artifact from an earlier run"
        );
        self.analysis.graph = Some(graph);
        Ok(())
    }

    /// Run the pipeline for this transcript. See
    /// [`TranscriptAnalysis::process`].
    pub fn process(
        &mut self,
        annotator: &dyn DependencyAnnotator,
        extractor: &dyn RelationExtractor,
        config: &SpeechGraphConfig,
    ) -> Result<&SpeechGraph> {
        self.analysis.process(annotator, extractor, config)
    }

    /// Write the finished graph to the output directory as pretty JSON,
    /// creating the directory if needed.
    pub fn dump(&self) -> Result<()> {
        let output_file = self.output_file().ok_or_else(|| {
            SpeechGraphError::Other(
                "no output directory configured for this transcript".to_string(),
            )
        })?;
        let graph = self.analysis.graph()?;

        if let Some(parent) = output_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(graph)?;
        fs::write(&output_file, payload)?;
        tracing::info!(path = %output_file.display(), "graph artifact written");
        Ok(())
    }
}
