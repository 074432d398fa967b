//! Pixel and tensor representations of one submitted image.

/// Decoded 3-channel image in its original dimensions.
pub type ColorRaster = image::RgbImage;

/// Single-channel intensity image derived from a [`ColorRaster`].
pub type GrayRaster = image::GrayImage;

/// Side length of the square model input.
pub const TENSOR_SIZE: u32 = 224;

/// Shape of every scoring tensor: batch, height, width, channel.
pub const TENSOR_SHAPE: [usize; 4] = [1, TENSOR_SIZE as usize, TENSOR_SIZE as usize, 3];

/// Raw bytes of one submitted image.
#[derive(Debug, Clone)]
pub struct RawImage {
    /// Where the bytes came from (file path or other identifier).
    pub path: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

impl RawImage {
    /// Creates a raw image.
    pub fn new(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }
}

/// Normalized model input in NHWC layout with values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringTensor {
    data: Vec<f32>,
    shape: [usize; 4],
}

impl ScoringTensor {
    /// Wraps a flat buffer. Returns `None` if the buffer length does not
    /// match the shape.
    #[must_use]
    pub fn from_raw(data: Vec<f32>, shape: [usize; 4]) -> Option<Self> {
        (data.len() == shape.iter().product::<usize>()).then_some(Self { data, shape })
    }

    /// Wraps a buffer the caller guarantees matches `shape`.
    pub(crate) const fn from_parts(data: Vec<f32>, shape: [usize; 4]) -> Self {
        Self { data, shape }
    }

    /// Flat values in row-major NHWC order.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Tensor shape.
    #[must_use]
    pub const fn shape(&self) -> [usize; 4] {
        self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_checks_length() {
        assert!(ScoringTensor::from_raw(vec![0.0; 12], [1, 2, 2, 3]).is_some());
        assert!(ScoringTensor::from_raw(vec![0.0; 11], [1, 2, 2, 3]).is_none());
    }
}
