//! Scoring model port.

use crate::domain::{ScoringError, ScoringTensor};

/// A loaded binary classifier.
///
/// Implementations must be deterministic for a given input, must not
/// mutate the tensor, and must tolerate concurrent calls from several
/// assessments. A backend that cannot run concurrently has to serialize
/// access internally.
pub trait ScoringModel: Send + Sync {
    /// Returns a confidence score in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tensor is malformed or inference fails.
    fn score(&self, tensor: &ScoringTensor) -> Result<f32, ScoringError>;
}

impl<T: ScoringModel + ?Sized> ScoringModel for Box<T> {
    fn score(&self, tensor: &ScoringTensor) -> Result<f32, ScoringError> {
        (**self).score(tensor)
    }
}
