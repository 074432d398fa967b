//! Progress reporting port for UI integration.

use crate::domain::AssessmentRecord;

/// Events emitted during a batch for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Assessment started for an image.
    Started {
        /// Path to the image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// Assessment produced a record (valid, invalid or failed).
    Completed {
        /// The record.
        record: AssessmentRecord,
    },
    /// An image could not be read at all.
    Skipped {
        /// Path to the image.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All images have been processed.
    Finished {
        /// Images that produced a record.
        processed: usize,
        /// Images that could not be read.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
