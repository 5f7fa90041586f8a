//! Windowed structural similarity (SSIM) between two luminance images and
//! the adaptive binarization that turns its per-pixel map into a mask.

use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;

use crate::error::{DiffError, Result};

/// Side length of the square averaging window.
pub const WINDOW: u32 = 7;

const K1: f64 = 0.01;
const K2: f64 = 0.03;
const DATA_RANGE: f64 = 255.0;

/// Per-pixel similarity values plus their cropped mean.
#[derive(Debug, Clone)]
pub struct SsimMap {
    width: u32,
    height: u32,
    values: Vec<f64>,
    score: f64,
}

impl SsimMap {
    /// Mean similarity, ignoring a half-window border on every side.
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.values[(y * self.width + x) as usize]
    }

    /// Map scaled onto 0..=255, negative similarity clamped to 0.
    pub fn to_gray(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            // Rounded, not truncated: a float-exact 1.0 must land in bin 255
            // and a near-1.0 value must not drop into bin 254 ahead of Otsu.
            Luma([(self.get(x, y) * 255.0).round().clamp(0.0, 255.0) as u8])
        })
    }
}

/// Compute the SSIM map of two equally sized luminance images.
///
/// Uses a uniform 7x7 window centred on every pixel, with sample covariance
/// and mirrored borders. `image_compare`'s MSSIM scores fixed 8x8 tiles
/// instead, which turns a one-row change into an 8-row band and defeats the
/// strip filter, so the map is computed here.
pub fn ssim(a: &GrayImage, b: &GrayImage) -> Result<SsimMap> {
    let (width, height) = a.dimensions();
    debug_assert_eq!((width, height), b.dimensions());

    if width < WINDOW || height < WINDOW {
        return Err(DiffError::TooSmall {
            width,
            height,
            window: WINDOW,
        });
    }

    let xs: Vec<f64> = a.as_raw().iter().map(|&v| v as f64).collect();
    let ys: Vec<f64> = b.as_raw().iter().map(|&v| v as f64).collect();
    let xx: Vec<f64> = xs.iter().map(|v| v * v).collect();
    let yy: Vec<f64> = ys.iter().map(|v| v * v).collect();
    let xy: Vec<f64> = xs.iter().zip(&ys).map(|(p, q)| p * q).collect();

    let w = width as usize;
    let h = height as usize;
    let radius = (WINDOW / 2) as usize;

    let ux = box_mean(&xs, w, h, radius);
    let uy = box_mean(&ys, w, h, radius);
    let uxx = box_mean(&xx, w, h, radius);
    let uyy = box_mean(&yy, w, h, radius);
    let uxy = box_mean(&xy, w, h, radius);

    let n = (WINDOW * WINDOW) as f64;
    let cov_norm = n / (n - 1.0);
    let c1 = (K1 * DATA_RANGE).powi(2);
    let c2 = (K2 * DATA_RANGE).powi(2);

    let values: Vec<f64> = (0..w * h)
        .map(|i| {
            let vx = cov_norm * (uxx[i] - ux[i] * ux[i]);
            let vy = cov_norm * (uyy[i] - uy[i] * uy[i]);
            let vxy = cov_norm * (uxy[i] - ux[i] * uy[i]);

            let num = (2.0 * ux[i] * uy[i] + c1) * (2.0 * vxy + c2);
            let den = (ux[i] * ux[i] + uy[i] * uy[i] + c1) * (vx + vy + c2);
            num / den
        })
        .collect();

    let mut sum = 0.0;
    let mut count = 0usize;
    for y in radius..h - radius {
        for x in radius..w - radius {
            sum += values[y * w + x];
            count += 1;
        }
    }

    Ok(SsimMap {
        width,
        height,
        values,
        score: sum / count as f64,
    })
}

/// Binarize the similarity map: pixels at or below the Otsu level become 255.
///
/// A map whose histogram has a single populated bin has nothing to separate
/// and produces an empty mask.
pub fn structural_mask(map: &SsimMap) -> GrayImage {
    let gray = map.to_gray();

    let (lo, hi) = gray
        .as_raw()
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo == hi {
        return GrayImage::new(gray.width(), gray.height());
    }

    let level = otsu_level(&gray);
    binarize_inverted(&gray, level)
}

fn binarize_inverted(gray: &GrayImage, level: u8) -> GrayImage {
    let mut out = gray.clone();
    for p in out.pixels_mut() {
        p[0] = if p[0] > level { 0 } else { 255 };
    }
    out
}

/// Separable mean filter with mirrored (edge-inclusive) borders.
fn box_mean(src: &[f64], w: usize, h: usize, radius: usize) -> Vec<f64> {
    let size = (2 * radius + 1) as f64;
    let r = radius as isize;

    let mut horizontal = vec![0.0; w * h];
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        for x in 0..w {
            let mut acc = 0.0;
            for dx in -r..=r {
                acc += row[reflect(x as isize + dx, w)];
            }
            horizontal[y * w + x] = acc / size;
        }
    }

    let mut out = vec![0.0; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for dy in -r..=r {
                acc += horizontal[reflect(y as isize + dy, h) * w + x];
            }
            out[y * w + x] = acc / size;
        }
    }
    out
}

/// Mirror an out-of-range index back into `0..n` (`d c b a | a b c d`).
fn reflect(i: isize, n: usize) -> usize {
    let n = n as isize;
    let mut i = i;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}
