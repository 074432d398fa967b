//! Binary image classifier backing the rotation and crop scorers.
//!
//! A small CNN over the 224x224 RGB scoring tensor:
//! three conv3x3 + ReLU + maxpool(2) stages, global average pooling,
//! one linear unit and a sigmoid.

use anyhow::{Context, Result};
use candle_core::{Device, Module, Tensor};
use candle_nn::{conv2d, linear, Conv2d, Conv2dConfig, Linear, VarBuilder};

use super::varbuilder_from_bytes;
use crate::domain::{ScoringError, ScoringTensor, TENSOR_SHAPE};
use crate::ports::ScoringModel;

/// Channel counts from input through each conv stage.
const CHANNELS: [usize; 4] = [3, 16, 32, 64];

/// Conv kernel size.
const KERNEL: usize = 3;

/// Binary classifier producing a probability in `[0, 1]`.
pub struct BinaryClassifier {
    convs: Vec<Conv2d>,
    fc: Linear,
    device: Device,
}

impl BinaryClassifier {
    /// Creates the classifier from weights.
    ///
    /// # Errors
    ///
    /// Returns an error if a weight is missing or has the wrong shape.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(vb: VarBuilder) -> Result<Self> {
        let device = vb.device().clone();
        let cfg = Conv2dConfig {
            padding: 1,
            ..Conv2dConfig::default()
        };

        let convs = CHANNELS
            .windows(2)
            .enumerate()
            .map(|(i, io)| conv2d(io[0], io[1], KERNEL, cfg, vb.pp(format!("conv{}", i + 1))))
            .collect::<candle_core::Result<Vec<_>>>()
            .context("Failed to build conv layers")?;

        let fc = linear(CHANNELS[3], 1, vb.pp("fc")).context("Failed to build fc layer")?;

        Ok(Self { convs, fc, device })
    }

    /// Materializes a classifier from a safetensors artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact cannot be parsed or does not match
    /// the architecture.
    pub fn from_safetensors(data: &[u8], device: &Device) -> Result<Self> {
        let vb = varbuilder_from_bytes(data, device)?;
        Self::new(vb)
    }

    /// Names and shapes of every parameter the classifier reads.
    #[must_use]
    pub fn parameter_shapes() -> Vec<(String, Vec<usize>)> {
        let mut shapes = Vec::new();
        for (i, io) in CHANNELS.windows(2).enumerate() {
            let name = format!("conv{}", i + 1);
            shapes.push((format!("{name}.weight"), vec![io[1], io[0], KERNEL, KERNEL]));
            shapes.push((format!("{name}.bias"), vec![io[1]]));
        }
        shapes.push(("fc.weight".to_string(), vec![1, CHANNELS[3]]));
        shapes.push(("fc.bias".to_string(), vec![1]));
        shapes
    }

    /// Moves a scoring tensor onto the model device.
    fn input(&self, tensor: &ScoringTensor) -> Result<Tensor, ScoringError> {
        if tensor.shape() != TENSOR_SHAPE {
            return Err(ScoringError::ShapeMismatch {
                expected: TENSOR_SHAPE,
                actual: tensor.shape(),
            });
        }
        let [n, h, w, c] = tensor.shape();
        Ok(Tensor::from_slice(tensor.data(), (n, h, w, c), &self.device)?)
    }
}

impl Module for BinaryClassifier {
    fn forward(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        // NHWC -> NCHW
        let mut x = x.permute((0, 3, 1, 2))?.contiguous()?;

        for conv in &self.convs {
            x = conv.forward(&x)?.relu()?.max_pool2d(2)?;
        }

        // Global average pool: (1, C, H, W) -> (1, C)
        let x = x.mean((2, 3))?;

        // Logit, shape (1, 1)
        self.fc.forward(&x)
    }
}

impl ScoringModel for BinaryClassifier {
    fn score(&self, tensor: &ScoringTensor) -> Result<f32, ScoringError> {
        let x = self.input(tensor)?;
        let logit = self.forward(&x)?.squeeze(0)?.squeeze(0)?.to_scalar::<f32>()?;
        let score = sigmoid(logit);

        if score.is_finite() && (0.0..=1.0).contains(&score) {
            Ok(score)
        } else {
            Err(ScoringError::OutOfRange(score))
        }
    }
}

/// Sigmoid activation function.
#[inline]
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
