use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const INK: Rgb<u8> = Rgb([30, 30, 30]);
pub const BUTTON_BLUE: Rgb<u8> = Rgb([0, 90, 200]);
pub const BUTTON_RED: Rgb<u8> = Rgb([200, 40, 30]);

/// Fill an axis-aligned block, clipped to the image.
pub fn fill(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    for yy in y..(y + height).min(img.height()) {
        for xx in x..(x + width).min(img.width()) {
            img.put_pixel(xx, yy, color);
        }
    }
}

/// A small page-like image: grey header bar, a blue button at (20, 20)
/// sized 20x10, and a line of glyph-like marks at row 40 (clipped on short
/// images).
pub fn screenshot(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, WHITE);
    fill(&mut img, 0, 0, width, 8, Rgb([200, 200, 210]));
    fill(&mut img, 20, 20, 20, 10, BUTTON_BLUE);
    for i in 0..6 {
        fill(&mut img, 8 + i * 6, 40, 3, 5, INK);
    }
    img
}

/// Smooth colour ramp with no sharp edges.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 3).min(255) as u8, (y * 4).min(255) as u8, 128])
    })
}

/// Save `img` as PNG under `dir` and return its path.
pub fn save(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save fixture image");
    path
}

/// Number of entries in a directory.
pub fn entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .count()
}
