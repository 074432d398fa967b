//! Assessment stages.
//!
//! Decoding, blur analysis and verdict fusion. Model scoring lives behind
//! the [`ScoringModel`](crate::ports::ScoringModel) port.

pub mod blur;
pub mod decoder;
pub mod fusion;

pub use blur::{LAPLACIAN_THRESHOLD, SOBEL_THRESHOLD};
pub use fusion::{fuse, ValidityPolicy, CROP_THRESHOLD, ROTATION_THRESHOLD};
