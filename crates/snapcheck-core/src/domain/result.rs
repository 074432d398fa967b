//! Per-image records emitted by batch front ends.

use serde::{Deserialize, Serialize};

use super::{AssessmentError, ReadError, ValidityReport};

/// Outcome of assessing one image.
///
/// Exactly one of `report` and `error` is set; a failed assessment never
/// carries a partial report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRecord {
    /// Path of the assessed image.
    pub path: String,
    /// Timestamp of assessment (RFC 3339).
    pub timestamp: String,
    /// Image dimensions, when the image decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<ImageDimensions>,
    /// The verdict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ValidityReport>,
    /// Why no verdict was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorRecord>,
}

impl AssessmentRecord {
    /// Builds a record for a successful assessment.
    pub fn assessed(
        path: impl Into<String>,
        timestamp: impl Into<String>,
        dimensions: ImageDimensions,
        report: ValidityReport,
    ) -> Self {
        Self {
            path: path.into(),
            timestamp: timestamp.into(),
            dimensions: Some(dimensions),
            report: Some(report),
            error: None,
        }
    }

    /// Builds a record for a failed assessment.
    pub fn failed(
        path: impl Into<String>,
        timestamp: impl Into<String>,
        dimensions: Option<ImageDimensions>,
        error: ErrorRecord,
    ) -> Self {
        Self {
            path: path.into(),
            timestamp: timestamp.into(),
            dimensions,
            report: None,
            error: Some(error),
        }
    }

    /// True only when a report exists and it is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.report.as_ref().is_some_and(|r| r.valid)
    }
}

/// Uniform description of a failed assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Failure class (`decode_error`, `scoring_error`, `read_error`).
    pub kind: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorRecord {
    /// Creates an error record.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl From<&AssessmentError> for ErrorRecord {
    fn from(e: &AssessmentError) -> Self {
        Self::new(e.kind(), e.to_string())
    }
}

impl From<&ReadError> for ErrorRecord {
    fn from(e: &ReadError) -> Self {
        Self::new("read_error", e.reason.clone())
    }
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Creates new dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::DecodeError;

    #[test]
    fn test_failed_record_serialization_omits_report() {
        let err = AssessmentError::from(DecodeError::Empty);
        let record = AssessmentRecord::failed("a.jpg", "2026-01-01T00:00:00Z", None, (&err).into());

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("report").is_none());
        assert!(json.get("dimensions").is_none());
        assert_eq!(json["error"]["kind"], "decode_error");
        assert_eq!(json["error"]["message"], "image payload is empty");
        assert!(!record.is_valid());
    }
}
