//! Error taxonomy for the assessment pipeline.

use thiserror::Error;

use super::ModelKind;

/// The submitted bytes could not be turned into a raster.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No bytes were submitted.
    #[error("image payload is empty")]
    Empty,
    /// The bytes are not a recognized image encoding.
    #[error("unrecognized image encoding: {0}")]
    Unrecognized(#[from] image::ImageError),
}

/// A scoring call failed at request time.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The tensor does not have the shape the model expects.
    #[error("tensor shape {actual:?} does not match expected {expected:?}")]
    ShapeMismatch {
        /// Shape the model accepts.
        expected: [usize; 4],
        /// Shape that was submitted.
        actual: [usize; 4],
    },
    /// The model backend reported an error.
    #[error("inference failed: {0}")]
    Inference(String),
    /// The model produced a value that is not a probability.
    #[error("score {0} is outside [0, 1]")]
    OutOfRange(f32),
}

impl From<candle_core::Error> for ScoringError {
    fn from(e: candle_core::Error) -> Self {
        Self::Inference(e.to_string())
    }
}

/// A scoring model could not be fetched or materialized at startup.
///
/// Fatal: the pipeline must not run without both models.
#[derive(Debug, Error)]
#[error("{model} model unavailable: {reason}")]
pub struct ModelUnavailableError {
    /// Which model failed.
    pub model: ModelKind,
    /// Human-readable cause.
    pub reason: String,
}

impl ModelUnavailableError {
    /// Creates an error for the given model.
    pub fn new(model: ModelKind, reason: impl Into<String>) -> Self {
        Self {
            model,
            reason: reason.into(),
        }
    }
}

/// An image could not be read from its source.
#[derive(Debug, Clone, Error)]
#[error("cannot read {path}: {reason}")]
pub struct ReadError {
    /// Where the image was expected.
    pub path: String,
    /// Human-readable cause.
    pub reason: String,
}

impl ReadError {
    /// Creates a read error for `path`.
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A single assessment failed; no report is produced.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// Input could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// One of the models failed to score the image.
    #[error("{model} scoring failed: {source}")]
    Scoring {
        /// Model that failed.
        model: ModelKind,
        /// Underlying failure.
        #[source]
        source: ScoringError,
    },
}

impl AssessmentError {
    /// Stable identifier of the failure class, used in error records.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode_error",
            Self::Scoring { .. } => "scoring_error",
        }
    }
}
