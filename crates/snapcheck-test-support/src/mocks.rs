//! Mock implementations of core port traits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use snapcheck_core::{
    ArtifactFetcher, AssessmentRecord, ImageSource, ModelKind, ModelSource, ModelUnavailableError,
    ProgressEvent, ProgressSink, RawImage, ReadError, ResultOutput, ScoringError, ScoringModel,
    ScoringTensor,
};

/// Mock implementation of `ImageSource` for testing.
///
/// Yields pre-built images and tracks iteration for assertions.
pub struct MockImageSource {
    images: Vec<RawImage>,
    unreadable: Vec<String>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    /// Creates a new mock source with the given images.
    #[must_use]
    pub fn new(images: Vec<RawImage>) -> Self {
        Self {
            images,
            unreadable: Vec::new(),
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Adds a path that fails to read, yielded after the images.
    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<String>) -> Self {
        self.unreadable.push(path.into());
        self
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = Result<RawImage, ReadError>> + Send + '_> {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        let failures = self
            .unreadable
            .iter()
            .map(|p| Err(ReadError::new(p.clone(), "mock read failure")));
        Box::new(self.images.iter().cloned().map(Ok).chain(failures))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.images.len() + self.unreadable.len())
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures records for later assertions.
pub struct MockResultOutput {
    records: Arc<Mutex<Vec<AssessmentRecord>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<AssessmentRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, record: &AssessmentRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Started { .. }))
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Completed { .. }))
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Skipped { .. }))
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&ProgressEvent) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Scoring model that returns the same score for every tensor.
pub struct FixedScorer {
    score: f32,
    calls: Arc<AtomicUsize>,
}

impl FixedScorer {
    /// Creates a scorer returning `score`.
    #[must_use]
    pub fn new(score: f32) -> Self {
        Self {
            score,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared call counter, readable after the scorer moves into a registry.
    #[must_use]
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl ScoringModel for FixedScorer {
    fn score(&self, _tensor: &ScoringTensor) -> Result<f32, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.score)
    }
}

/// Scoring model that always fails.
pub struct FailingScorer;

impl ScoringModel for FailingScorer {
    fn score(&self, _tensor: &ScoringTensor) -> Result<f32, ScoringError> {
        Err(ScoringError::Inference("mock inference failure".into()))
    }
}

/// Artifact fetcher serving in-memory bytes per model kind.
///
/// Kinds without bytes fail with `ModelUnavailableError`.
#[derive(Default)]
pub struct MockFetcher {
    artifacts: HashMap<ModelKind, Vec<u8>>,
    requests: Mutex<Vec<ModelKind>>,
}

impl MockFetcher {
    /// Creates a fetcher with no artifacts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `bytes` for `kind`.
    #[must_use]
    pub fn with_artifact(mut self, kind: ModelKind, bytes: Vec<u8>) -> Self {
        self.artifacts.insert(kind, bytes);
        self
    }

    /// Kinds requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ModelKind> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ArtifactFetcher for MockFetcher {
    fn fetch(&self, kind: ModelKind, source: &ModelSource) -> Result<Vec<u8>, ModelUnavailableError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(kind);
        self.artifacts
            .get(&kind)
            .cloned()
            .ok_or_else(|| ModelUnavailableError::new(kind, format!("no artifact at {}", source.location)))
    }
}
