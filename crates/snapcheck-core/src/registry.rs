//! Process-wide holder of the two scoring models.
//!
//! The registry is built once, before any assessment runs, and then passed
//! explicitly to each [`ValidityPipeline`](crate::ValidityPipeline). It is
//! never reloaded or mutated while assessments are in flight.

use candle_core::Device;
use tracing::info;

use crate::domain::{ModelKind, ModelSources, ModelUnavailableError};
use crate::inference::BinaryClassifier;
use crate::ports::{ArtifactFetcher, ScoringModel};

/// The rotation and crop scorers.
pub struct ModelRegistry {
    rotation: Box<dyn ScoringModel>,
    crop: Box<dyn ScoringModel>,
}

impl ModelRegistry {
    /// Wraps already-loaded scorers.
    pub fn new(rotation: impl ScoringModel + 'static, crop: impl ScoringModel + 'static) -> Self {
        Self {
            rotation: Box::new(rotation),
            crop: Box::new(crop),
        }
    }

    /// Fetches and materializes both models.
    ///
    /// Fetched bytes are dropped once each model is built. There is no
    /// fallback: if either model fails, no registry is produced.
    ///
    /// # Errors
    ///
    /// Returns [`ModelUnavailableError`] naming the first model that could
    /// not be fetched or built.
    pub fn load(
        sources: &ModelSources,
        fetcher: &dyn ArtifactFetcher,
        device: &Device,
    ) -> Result<Self, ModelUnavailableError> {
        let rotation = load_classifier(ModelKind::Rotation, sources, fetcher, device)?;
        let crop = load_classifier(ModelKind::Crop, sources, fetcher, device)?;

        info!("Model registry ready");
        Ok(Self::new(rotation, crop))
    }

    /// Returns the scorer for one model.
    #[must_use]
    pub fn get(&self, kind: ModelKind) -> &dyn ScoringModel {
        match kind {
            ModelKind::Rotation => self.rotation.as_ref(),
            ModelKind::Crop => self.crop.as_ref(),
        }
    }
}

fn load_classifier(
    kind: ModelKind,
    sources: &ModelSources,
    fetcher: &dyn ArtifactFetcher,
    device: &Device,
) -> Result<BinaryClassifier, ModelUnavailableError> {
    let source = sources.get(kind);
    info!("Loading {kind} model from {}", source.location);

    let bytes = fetcher.fetch(kind, source)?;
    BinaryClassifier::from_safetensors(&bytes, device)
        .map_err(|e| ModelUnavailableError::new(kind, format!("{e:#}")))
}
