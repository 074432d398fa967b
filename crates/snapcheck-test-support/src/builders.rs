//! Synthetic image builders for testing.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use snapcheck_core::RawImage;

/// Builder for creating synthetic test images.
///
/// Every builder returns a [`RawImage`] holding PNG bytes, which is what
/// the pipeline consumes. The `*_raster` variants return the pixels.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    // === Sharp/High-Contrast Images ===

    /// Creates a high-contrast checkerboard pattern (very sharp edges).
    ///
    /// Should never be flagged as blurred.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> RawImage {
        Self::encode("synthetic://checkerboard", &Self::checkerboard_raster(width, height, 8))
    }

    /// Checkerboard pixels with a custom cell size.
    #[must_use]
    pub fn checkerboard_raster(width: u32, height: u32, cell_size: u32) -> RgbImage {
        let cell = cell_size.max(1);
        RgbImage::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    /// Creates vertical bars alternating between two gray levels.
    #[must_use]
    pub fn vertical_bars(width: u32, height: u32, bar_width: u32, low: u8, high: u8) -> RawImage {
        Self::encode(
            "synthetic://vertical_bars",
            &Self::vertical_bars_raster(width, height, bar_width, low, high),
        )
    }

    /// Vertical bar pixels.
    #[must_use]
    pub fn vertical_bars_raster(
        width: u32,
        height: u32,
        bar_width: u32,
        low: u8,
        high: u8,
    ) -> RgbImage {
        let bar = bar_width.max(1);
        RgbImage::from_fn(width, height, |x, _| {
            let v = if (x / bar) % 2 == 0 { low } else { high };
            Rgb([v, v, v])
        })
    }

    // === Blurry Images ===

    /// Creates a uniform gray image (no edges, simulates severe blur).
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> RawImage {
        Self::encode("synthetic://uniform_gray", &Self::uniform_gray_raster(width, height, value))
    }

    /// Uniform gray pixels.
    #[must_use]
    pub fn uniform_gray_raster(width: u32, height: u32, value: u8) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([value, value, value]))
    }

    /// Creates a smooth horizontal gradient (low variance, simulates defocus).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> RawImage {
        let img = RgbImage::from_fn(width, height, |x, _| {
            let v = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            Rgb([v, v, v])
        });
        Self::encode("synthetic://horizontal_gradient", &img)
    }

    // === Special Test Images ===

    /// Creates a 1x1 pixel image (edge case).
    #[must_use]
    pub fn single_pixel(value: u8) -> RawImage {
        Self::uniform_gray(1, 1, value)
    }

    /// Creates a uniform color image.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> RawImage {
        Self::encode(
            "synthetic://rgb_uniform",
            &RgbImage::from_pixel(width, height, Rgb([r, g, b])),
        )
    }

    /// Bytes that no decoder recognizes.
    #[must_use]
    pub fn garbage() -> RawImage {
        RawImage::new("synthetic://garbage", b"definitely not an image".to_vec())
    }

    /// Encodes pixels as PNG under the given path.
    #[must_use]
    pub fn encode(path: &str, img: &RgbImage) -> RawImage {
        RawImage::new(path, Self::png_bytes(img))
    }

    /// PNG bytes for the given pixels.
    ///
    /// # Panics
    ///
    /// Panics if PNG encoding fails.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn png_bytes(img: &RgbImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png)
            .expect("PNG encoding to memory");
        buf.into_inner()
    }
}

/// Convenience functions for common test images.
impl SyntheticImageBuilder {
    /// Returns a standard sharp test image (224x224 checkerboard).
    #[must_use]
    pub fn sharp_image() -> RawImage {
        Self::checkerboard(224, 224)
    }

    /// Returns a standard blurry test image (224x224 mid-gray).
    #[must_use]
    pub fn blurry_image() -> RawImage {
        Self::uniform_gray(224, 224, 128)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn decode(raw: &RawImage) -> RgbImage {
        image::load_from_memory(&raw.bytes).unwrap().to_rgb8()
    }

    #[test]
    fn test_checkerboard_dimensions() {
        let raw = SyntheticImageBuilder::checkerboard(100, 80);
        assert_eq!(raw.path, "synthetic://checkerboard");
        assert_eq!(decode(&raw).dimensions(), (100, 80));
    }

    #[test]
    fn test_checkerboard_pattern() {
        let img = SyntheticImageBuilder::checkerboard_raster(16, 16, 8);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(8, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_uniform_gray_round_trips_through_png() {
        let img = decode(&SyntheticImageBuilder::uniform_gray(50, 50, 100));
        assert!(img.pixels().all(|p| p.0 == [100, 100, 100]));
    }

    #[test]
    fn test_vertical_bars() {
        let img = SyntheticImageBuilder::vertical_bars_raster(4, 2, 1, 100, 105);
        assert_eq!(img.get_pixel(0, 0).0[0], 100);
        assert_eq!(img.get_pixel(1, 0).0[0], 105);
        assert_eq!(img.get_pixel(2, 1).0[0], 100);
    }

    #[test]
    fn test_gradient_range() {
        let img = decode(&SyntheticImageBuilder::horizontal_gradient(256, 10));
        assert!(img.get_pixel(0, 0).0[0] < 5);
        assert!(img.get_pixel(255, 0).0[0] > 250);
    }

    #[test]
    fn test_garbage_does_not_decode() {
        let raw = SyntheticImageBuilder::garbage();
        assert!(image::load_from_memory(&raw.bytes).is_err());
    }
}
