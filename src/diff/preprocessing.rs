use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, ImageReader, RgbImage};

use crate::error::{DiffError, Result};

/// How inputs of different sizes are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizePolicy {
    /// Resize both images to the element-wise maximum of their dimensions.
    #[default]
    Resize,
    /// Refuse to compare images whose dimensions differ.
    Strict,
}

/// Fail with `MissingInput` unless `path` names an existing file.
pub fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(DiffError::MissingInput {
            path: path.to_path_buf(),
        })
    }
}

/// Decode an image file into 8-bit RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let decode_err = |source| DiffError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)?;

    Ok(img.to_rgb8())
}

/// Bring both images onto the same `W x H` grid, where `W` and `H` are the
/// larger width and height of the two inputs.
pub fn normalize(
    baseline: RgbImage,
    candidate: RgbImage,
    policy: SizePolicy,
) -> Result<(RgbImage, RgbImage)> {
    let (wa, ha) = baseline.dimensions();
    let (wb, hb) = candidate.dimensions();

    if (wa, ha) == (wb, hb) {
        return Ok((baseline, candidate));
    }

    if policy == SizePolicy::Strict {
        return Err(DiffError::SizeMismatch {
            baseline: (wa, ha),
            candidate: (wb, hb),
        });
    }

    let width = wa.max(wb);
    let height = ha.max(hb);

    Ok((
        resize_to(baseline, width, height),
        resize_to(candidate, width, height),
    ))
}

fn resize_to(img: RgbImage, width: u32, height: u32) -> RgbImage {
    if img.dimensions() == (width, height) {
        img
    } else {
        imageops::resize(&img, width, height, FilterType::Triangle)
    }
}

/// Single-channel luminance.
pub fn to_grayscale(img: &RgbImage) -> GrayImage {
    imageops::grayscale(img)
}
