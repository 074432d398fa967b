//! The per-image assessment pipeline.

use std::thread;

use tracing::debug;

use crate::domain::{AssessmentError, ColorRaster, ModelKind, ScoringTensor, ValidityReport};
use crate::modules::{blur, decoder, ValidityPolicy};
use crate::registry::ModelRegistry;

/// Turns image bytes into a [`ValidityReport`].
///
/// Holds no per-request state, so one pipeline can serve any number of
/// concurrent assessments.
#[derive(Clone, Copy)]
pub struct ValidityPipeline<'a> {
    registry: &'a ModelRegistry,
    policy: ValidityPolicy,
}

impl<'a> ValidityPipeline<'a> {
    /// Creates a pipeline over loaded models with the default policy.
    #[must_use]
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self {
            registry,
            policy: ValidityPolicy::default(),
        }
    }

    /// Sets the validity policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ValidityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Decodes and assesses one image.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError::Decode`] for empty or undecodable bytes
    /// and [`AssessmentError::Scoring`] if either model fails. No report is
    /// produced in either case.
    pub fn assess(&self, bytes: &[u8]) -> Result<ValidityReport, AssessmentError> {
        let raster = decoder::decode(bytes)?;
        self.assess_raster(&raster)
    }

    /// Assesses an already-decoded raster.
    ///
    /// Blur analysis runs on a scoped thread while both models score the
    /// tensor; none of the three depends on another.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError::Scoring`] if either model fails.
    pub fn assess_raster(&self, raster: &ColorRaster) -> Result<ValidityReport, AssessmentError> {
        let tensor = decoder::to_tensor(raster);

        let (blur, rotation, crop) = thread::scope(|s| {
            let blur = s.spawn(move || blur::analyze(raster));
            let rotation = self.score(ModelKind::Rotation, &tensor);
            let crop = self.score(ModelKind::Crop, &tensor);
            let blur = blur
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
            (blur, rotation, crop)
        });

        let (rotation, crop) = (rotation?, crop?);
        debug!(
            "laplacian={:.3} sobel={:.3} rotation={rotation} crop={crop}",
            blur.laplacian.variance, blur.sobel.variance
        );

        Ok(self.policy.fuse(blur, rotation, crop))
    }

    fn score(&self, kind: ModelKind, tensor: &ScoringTensor) -> Result<f32, AssessmentError> {
        self.registry
            .get(kind)
            .score(tensor)
            .map_err(|source| AssessmentError::Scoring { model: kind, source })
    }
}
