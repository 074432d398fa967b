//! Image decoding and model-input preparation.

use image::imageops::FilterType;
use tracing::debug;

use crate::domain::{ColorRaster, DecodeError, ScoringTensor, TENSOR_SHAPE, TENSOR_SIZE};

/// Divisor that maps 8-bit channel values onto `[0, 1]`.
const CHANNEL_SCALE: f32 = 255.0;

/// Decodes submitted bytes into an RGB raster.
///
/// The encoding is guessed from the content, not from any file name.
/// Alpha channels are dropped and deeper bit depths are reduced to 8 bits.
///
/// # Errors
///
/// Returns [`DecodeError::Empty`] for an empty payload and
/// [`DecodeError::Unrecognized`] when the bytes are not a supported image.
pub fn decode(bytes: &[u8]) -> Result<ColorRaster, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let image = image::load_from_memory(bytes)?;
    debug!(
        "Decoded {}x{} image ({:?})",
        image.width(),
        image.height(),
        image.color()
    );

    Ok(image.to_rgb8())
}

/// Converts a raster into the fixed model input.
///
/// Stretches to 224x224 with a bilinear filter (aspect ratio is not kept),
/// divides every channel by 255 and prepends a batch axis of one. The
/// classifier thresholds are calibrated against exactly this transform.
#[must_use]
pub fn to_tensor(raster: &ColorRaster) -> ScoringTensor {
    let resized = image::imageops::resize(raster, TENSOR_SIZE, TENSOR_SIZE, FilterType::Triangle);

    let data: Vec<f32> = resized
        .into_raw()
        .into_iter()
        .map(|v| f32::from(v) / CHANNEL_SCALE)
        .collect();

    ScoringTensor::from_parts(data, TENSOR_SHAPE)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode_png(img: &RgbImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_empty_fails() {
        assert!(matches!(decode(&[]), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode(b"definitely not an image");
        assert!(matches!(result, Err(DecodeError::Unrecognized(_))));
    }

    #[test]
    fn test_decode_keeps_dimensions() {
        let img = RgbImage::from_pixel(37, 11, Rgb([10, 20, 30]));
        let raster = decode(&encode_png(&img)).unwrap();
        assert_eq!(raster.dimensions(), (37, 11));
        assert_eq!(raster.get_pixel(5, 5), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_tensor_shape_and_range() {
        let img = RgbImage::from_fn(300, 120, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 255]));
        let tensor = to_tensor(&img);

        assert_eq!(tensor.shape(), [1, 224, 224, 3]);
        assert_eq!(tensor.data().len(), 224 * 224 * 3);
        assert!(tensor.data().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_tensor_scales_by_255() {
        let img = RgbImage::from_pixel(224, 224, Rgb([255, 0, 51]));
        let tensor = to_tensor(&img);

        assert_eq!(tensor.data()[0], 1.0);
        assert_eq!(tensor.data()[1], 0.0);
        assert_eq!(tensor.data()[2], 51.0 / 255.0);
    }

    #[test]
    fn test_tensor_is_reproducible_across_decodes() {
        let img = RgbImage::from_fn(64, 48, |x, y| {
            Rgb([(x * 3) as u8, (y * 5) as u8, ((x + y) * 2) as u8])
        });
        let bytes = encode_png(&img);

        let first = to_tensor(&decode(&bytes).unwrap());
        let second = to_tensor(&decode(&bytes).unwrap());
        assert_eq!(first, second);
    }
}
