//! Fixture model artifacts.
//!
//! A classifier with all weights zero except the output bias produces the
//! same score for every input, which makes end-to-end verdicts predictable.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use safetensors::tensor::TensorView;
use snapcheck_core::inference::BinaryClassifier;

/// Inverse sigmoid, the output bias that yields `score`.
#[must_use]
pub fn logit(score: f32) -> f32 {
    let p = f64::from(score.clamp(1e-7, 1.0 - 1e-7));
    #[allow(clippy::cast_possible_truncation)]
    let bias = (p / (1.0 - p)).ln() as f32;
    bias
}

/// Serializes a classifier that always scores approximately `score`.
///
/// # Errors
///
/// Returns an error if safetensors serialization fails.
pub fn constant_classifier_artifact(score: f32) -> anyhow::Result<Vec<u8>> {
    let buffers: Vec<(String, Vec<usize>, Vec<f32>)> = BinaryClassifier::parameter_shapes()
        .into_iter()
        .map(|(name, shape)| {
            let len = shape.iter().product();
            let data = if name == "fc.bias" {
                vec![logit(score)]
            } else {
                vec![0.0; len]
            };
            (name, shape, data)
        })
        .collect();

    let mut views = HashMap::new();
    for (name, shape, data) in &buffers {
        let view = TensorView::new(
            safetensors::Dtype::F32,
            shape.clone(),
            bytemuck::cast_slice(data),
        )
        .with_context(|| format!("building tensor view for {name}"))?;
        views.insert(name.clone(), view);
    }

    safetensors::serialize(&views, &None).context("serializing classifier weights")
}

/// Writes a constant-score classifier to `path`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_constant_classifier(path: &Path, score: f32) -> anyhow::Result<()> {
    let bytes = constant_classifier_artifact(score)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use candle_core::Device;
    use snapcheck_core::{ScoringModel, ScoringTensor, TENSOR_SHAPE};

    #[test]
    fn test_logit_inverts_sigmoid() {
        let bias = f64::from(logit(0.9));
        assert!((bias - 9.0_f64.ln()).abs() < 1e-5);
    }

    #[test]
    fn test_artifact_scores_constant() {
        let bytes = constant_classifier_artifact(0.9).unwrap();
        let model = BinaryClassifier::from_safetensors(&bytes, &Device::Cpu).unwrap();
        let tensor = ScoringTensor::from_raw(vec![0.3; 224 * 224 * 3], TENSOR_SHAPE).unwrap();
        assert!((model.score(&tensor).unwrap() - 0.9).abs() < 1e-4);
    }
}
