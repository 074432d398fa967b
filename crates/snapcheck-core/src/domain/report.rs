//! Validity report types.
//!
//! The serialized shape of [`ValidityReport`] is the contract consumed by
//! callers, so field names here follow the wire format rather than the
//! in-memory names.

use serde::{Deserialize, Serialize};

/// Outcome of one blur metric compared against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// Variance of the edge-response surface (never negative).
    pub variance: f64,
    /// Fixed threshold the variance was compared against.
    pub threshold: f64,
    /// True when `variance < threshold`.
    #[serde(rename = "status")]
    pub below_threshold: bool,
}

impl MetricResult {
    /// Classifies a variance against a threshold (strict `<`).
    #[must_use]
    pub fn evaluate(variance: f64, threshold: f64) -> Self {
        Self {
            variance,
            threshold,
            below_threshold: variance < threshold,
        }
    }
}

/// Combined blur verdict from both edge metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlurReport {
    /// True when either metric fell below its threshold.
    pub blurred: bool,
    /// Laplacian variance metric.
    pub laplacian: MetricResult,
    /// Sobel gradient-magnitude variance metric.
    pub sobel: MetricResult,
}

impl BlurReport {
    /// Builds a report from the two metrics. The metrics are independent
    /// opinions: one weak-edge signal is enough to flag blur.
    #[must_use]
    pub const fn from_metrics(laplacian: MetricResult, sobel: MetricResult) -> Self {
        Self {
            blurred: laplacian.below_threshold || sobel.below_threshold,
            laplacian,
            sobel,
        }
    }
}

/// A model score compared against its calibrated threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    /// Raw model score in `[0, 1]`, unrounded.
    pub score: f64,
    /// Calibrated threshold.
    pub threshold: f64,
    /// True when the defect was detected.
    pub flagged: bool,
}

impl ClassificationResult {
    /// Classifies with the inverted convention: a score *below* the
    /// threshold flags the defect.
    #[must_use]
    pub fn below(score: f64, threshold: f64) -> Self {
        Self {
            score,
            threshold,
            flagged: score < threshold,
        }
    }
}

/// The verdict for one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "wire::Report", from = "wire::Report")]
pub struct ValidityReport {
    /// Overall verdict.
    pub valid: bool,
    /// Blur diagnostics.
    pub blur: BlurReport,
    /// Crop / framing classification.
    pub crop: ClassificationResult,
    /// Rotation classification.
    pub rotate: ClassificationResult,
}

impl ValidityReport {
    /// Returns true when the blur metrics flagged the image.
    #[must_use]
    pub const fn blurred(&self) -> bool {
        self.blur.blurred
    }

    /// Returns true when the crop model flagged the image.
    #[must_use]
    pub const fn cropped(&self) -> bool {
        self.crop.flagged
    }

    /// Returns true when the rotation model flagged the image.
    #[must_use]
    pub const fn rotated(&self) -> bool {
        self.rotate.flagged
    }
}

/// Serialized field layout. Crop and rotation results carry their flag
/// under different names, which a single derive on
/// [`ClassificationResult`] cannot express.
mod wire {
    use serde::{Deserialize, Serialize};

    use super::{BlurReport, ClassificationResult, ValidityReport};

    #[derive(Serialize, Deserialize)]
    pub struct Report {
        valid: bool,
        blur: BlurReport,
        crop: Crop,
        rotate: Rotate,
    }

    #[derive(Serialize, Deserialize)]
    struct Crop {
        prediction: f64,
        threshold: f64,
        cropped: bool,
    }

    #[derive(Serialize, Deserialize)]
    struct Rotate {
        prediction: f64,
        threshold: f64,
        rotated: bool,
    }

    impl From<ValidityReport> for Report {
        fn from(report: ValidityReport) -> Self {
            Self {
                valid: report.valid,
                blur: report.blur,
                crop: Crop {
                    prediction: report.crop.score,
                    threshold: report.crop.threshold,
                    cropped: report.crop.flagged,
                },
                rotate: Rotate {
                    prediction: report.rotate.score,
                    threshold: report.rotate.threshold,
                    rotated: report.rotate.flagged,
                },
            }
        }
    }

    impl From<Report> for ValidityReport {
        fn from(report: Report) -> Self {
            Self {
                valid: report.valid,
                blur: report.blur,
                crop: ClassificationResult {
                    score: report.crop.prediction,
                    threshold: report.crop.threshold,
                    flagged: report.crop.cropped,
                },
                rotate: ClassificationResult {
                    score: report.rotate.prediction,
                    threshold: report.rotate.threshold,
                    flagged: report.rotate.rotated,
                },
            }
        }
    }
}
