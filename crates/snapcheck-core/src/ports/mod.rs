//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod artifact_fetcher;
mod image_source;
mod progress;
mod result_output;
mod scoring_model;

pub use artifact_fetcher::ArtifactFetcher;
pub use image_source::ImageSource;
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
pub use scoring_model::ScoringModel;
