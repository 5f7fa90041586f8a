use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{self, Mask};

/// Opening (erode then dilate) with a `1 x width` horizontal bar.
///
/// Removes isolated pixels and vertical hairlines while keeping blobs that
/// have some horizontal extent.
pub fn open_horizontal(mask: &GrayImage, width: u8) -> GrayImage {
    let bar = GrayImage::from_pixel(width.into(), 1, Luma([255]));
    morphology::grayscale_open(mask, &Mask::from_image(&bar, width / 2, 0))
}

/// Closing (dilate then erode) with a 3x3 square, repeated `iterations` times.
pub fn close_square(mask: &GrayImage, iterations: u8) -> GrayImage {
    // Chebyshev distance k is a (2k+1)x(2k+1) square, i.e. k passes of 3x3.
    morphology::close(mask, Norm::LInf, iterations)
}
