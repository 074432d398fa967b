//! Snapcheck Core - Image validity assessment
//!
//! Decides whether a submitted photo is usable by combining two blur
//! metrics with rotation and crop classifier scores into one verdict.
//!
//! The scoring models are loaded once into a [`ModelRegistry`] and passed
//! explicitly to a [`ValidityPipeline`].

pub mod domain;
pub mod inference;
pub mod modules;
pub mod pipeline;
pub mod ports;
pub mod registry;

pub use domain::{
    AssessmentError, AssessmentRecord, BlurReport, ClassificationResult, ColorRaster, DecodeError,
    ErrorRecord, ImageDimensions, MetricResult, ModelKind, ModelLocation, ModelSource,
    ModelSources, ModelUnavailableError, RawImage, ReadError, ScoringError, ScoringTensor,
    ValidityReport, TENSOR_SHAPE, TENSOR_SIZE,
};
pub use modules::ValidityPolicy;
pub use pipeline::ValidityPipeline;
pub use ports::{
    ArtifactFetcher, ImageSource, ProgressEvent, ProgressSink, ResultOutput, ScoringModel,
};
pub use registry::ModelRegistry;
