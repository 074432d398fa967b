//! Blur detection.
//!
//! Two independent edge-strength measures are computed on the luma channel:
//! - variance of the Laplacian response
//! - variance of the Sobel gradient magnitude
//!
//! Either one falling below its threshold flags the image as blurred. The
//! filters use reflect-101 borders and `f64` responses over every pixel,
//! which is what the thresholds were calibrated against.

// Pixel coordinates are bounded by image dimensions
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

use crate::domain::{BlurReport, ColorRaster, GrayRaster, MetricResult};

/// Laplacian variance below this flags blur.
pub const LAPLACIAN_THRESHOLD: f64 = 100.0;

/// Sobel magnitude variance below this flags blur.
pub const SOBEL_THRESHOLD: f64 = 500.0;

type Kernel = [[f64; 3]; 3];

const LAPLACIAN: Kernel = [[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]];
const SOBEL_X: Kernel = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: Kernel = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Runs both blur metrics on a raster.
#[must_use]
pub fn analyze(raster: &ColorRaster) -> BlurReport {
    let gray = to_gray(raster);

    let laplacian = MetricResult::evaluate(laplacian_variance(&gray), LAPLACIAN_THRESHOLD);
    let sobel = MetricResult::evaluate(sobel_variance(&gray), SOBEL_THRESHOLD);

    BlurReport::from_metrics(laplacian, sobel)
}

/// Converts a raster to 8-bit luma.
///
/// The Rec.601 weights are applied in BGR channel order: the first channel
/// gets 0.114 and the third 0.299. The blur thresholds were calibrated on
/// that conversion. Uses 14-bit fixed point with rounding, so equal
/// channels map to themselves exactly.
#[must_use]
pub fn to_gray(raster: &ColorRaster) -> GrayRaster {
    const FIRST: u32 = 1868;
    const SECOND: u32 = 9617;
    const THIRD: u32 = 4899;
    const SHIFT: u32 = 14;
    const HALF: u32 = 1 << (SHIFT - 1);

    GrayRaster::from_fn(raster.width(), raster.height(), |x, y| {
        let [c0, c1, c2] = raster.get_pixel(x, y).0;
        let luma = (u32::from(c0) * FIRST + u32::from(c1) * SECOND + u32::from(c2) * THIRD + HALF)
            >> SHIFT;
        image::Luma([luma as u8])
    })
}

/// Variance of the 3x3 Laplacian response.
#[must_use]
pub fn laplacian_variance(gray: &GrayRaster) -> f64 {
    variance(&correlate(gray, &LAPLACIAN))
}

/// Variance of the Sobel gradient magnitude `sqrt(gx² + gy²)`.
#[must_use]
pub fn sobel_variance(gray: &GrayRaster) -> f64 {
    let gx = correlate(gray, &SOBEL_X);
    let gy = correlate(gray, &SOBEL_Y);

    let magnitude: Vec<f64> = gx
        .iter()
        .zip(&gy)
        .map(|(x, y)| (x * x + y * y).sqrt())
        .collect();

    variance(&magnitude)
}

/// Applies a 3x3 kernel (correlation, not flipped) to every pixel.
fn correlate(gray: &GrayRaster, kernel: &Kernel) -> Vec<f64> {
    let (width, height) = gray.dimensions();
    let (w, h) = (i64::from(width), i64::from(height));
    let mut out = Vec::with_capacity(width as usize * height as usize);

    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (ky, row) in kernel.iter().enumerate() {
                let sy = reflect_101(y + ky as i64 - 1, h);
                for (kx, &k) in row.iter().enumerate() {
                    if k == 0.0 {
                        continue;
                    }
                    let sx = reflect_101(x + kx as i64 - 1, w);
                    acc += k * f64::from(gray.get_pixel(sx, sy).0[0]);
                }
            }
            out.push(acc);
        }
    }

    out
}

/// Mirrors an out-of-range index without repeating the edge pixel
/// (`-1 -> 1`, `n -> n - 2`). Only valid for offsets of one.
fn reflect_101(i: i64, n: i64) -> u32 {
    if n == 1 {
        return 0;
    }
    let i = if i < 0 {
        -i
    } else if i >= n {
        2 * (n - 1) - i
    } else {
        i
    };
    i as u32
}

/// Population variance.
fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}
