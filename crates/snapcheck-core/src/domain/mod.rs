//! Core domain types for validity assessment.

mod error;
mod model;
mod raster;
mod report;
mod result;

pub use error::{AssessmentError, DecodeError, ModelUnavailableError, ReadError, ScoringError};
pub use model::{ModelKind, ModelLocation, ModelSource, ModelSources};
pub use raster::{ColorRaster, GrayRaster, RawImage, ScoringTensor, TENSOR_SHAPE, TENSOR_SIZE};
pub use report::{BlurReport, ClassificationResult, MetricResult, ValidityReport};
pub use result::{AssessmentRecord, ErrorRecord, ImageDimensions};
