//! Result output port for writing assessment records.

use crate::domain::AssessmentRecord;

/// Port for outputting assessment records.
pub trait ResultOutput: Send + Sync {
    /// Writes a single record.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, record: &AssessmentRecord) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
