//! Verdict fusion.
//!
//! Both model thresholds use the inverted convention: a score *below* the
//! threshold flags the defect. The values are tied to how the models were
//! calibrated and are not configuration.

use crate::domain::{BlurReport, ClassificationResult, ValidityReport};

/// Rotation scores below this flag the image as rotated.
pub const ROTATION_THRESHOLD: f64 = 0.0544;

/// Crop scores below this flag the image as cropped or mis-framed.
pub const CROP_THRESHOLD: f64 = 0.998_701_572;

/// Which signals participate in the overall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityPolicy {
    /// When false, blur is still analyzed and reported but does not make
    /// an image invalid.
    pub blur_affects_validity: bool,
}

impl Default for ValidityPolicy {
    fn default() -> Self {
        Self {
            blur_affects_validity: true,
        }
    }
}

impl ValidityPolicy {
    /// Combines the three classifications into a report.
    #[must_use]
    pub fn fuse(self, blur: BlurReport, rotation_score: f32, crop_score: f32) -> ValidityReport {
        let rotate = ClassificationResult::below(f64::from(rotation_score), ROTATION_THRESHOLD);
        let crop = ClassificationResult::below(f64::from(crop_score), CROP_THRESHOLD);
        let blurred = blur.blurred && self.blur_affects_validity;

        ValidityReport {
            valid: !crop.flagged && !rotate.flagged && !blurred,
            blur,
            crop,
            rotate,
        }
    }
}

/// Fuses with the default policy (blur counts).
#[must_use]
pub fn fuse(blur: BlurReport, rotation_score: f32, crop_score: f32) -> ValidityReport {
    ValidityPolicy::default().fuse(blur, rotation_score, crop_score)
}
