//! Model artifact retrieval port.

use crate::domain::{ModelKind, ModelSource, ModelUnavailableError};

/// Retrieves the raw bytes of a model artifact.
///
/// The returned buffer is transient: the registry materializes a model
/// from it and drops it.
pub trait ArtifactFetcher: Send + Sync {
    /// Fetches the artifact for `kind` from `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact cannot be retrieved or fails
    /// verification.
    fn fetch(&self, kind: ModelKind, source: &ModelSource) -> Result<Vec<u8>, ModelUnavailableError>;
}
