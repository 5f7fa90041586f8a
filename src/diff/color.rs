use image::{GrayImage, Luma, RgbImage};
use palette::{FromColor, Lab, LinSrgb, Srgb};

/// Lightness is stored on the 8-bit scale (0..=255) rather than 0..=100, so
/// a threshold expressed in those units weights lightness shifts the same way
/// an 8-bit Lab encoding does.
const L_SCALE: f32 = 255.0 / 100.0;

/// Convert every pixel to CIELAB (D65), lightness rescaled by [`L_SCALE`].
pub fn to_lab(img: &RgbImage) -> Vec<[f32; 3]> {
    img.pixels()
        .map(|p| {
            let srgb: Srgb<f32> = Srgb::new(p[0], p[1], p[2]).into_format();
            let lin: LinSrgb<f32> = srgb.into_linear();
            let lab: Lab = Lab::from_color(lin);
            [lab.l * L_SCALE, lab.a, lab.b]
        })
        .collect()
}

/// Euclidean distance between two Lab triples (CIE76 ΔE).
pub fn delta_e(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dl = a[0] - b[0];
    let da = a[1] - b[1];
    let db = a[2] - b[2];
    (dl * dl + da * da + db * db).sqrt()
}

/// 255 wherever the perceptual colour distance exceeds `threshold`.
pub fn color_mask(a: &RgbImage, b: &RgbImage, threshold: f32) -> GrayImage {
    let (width, height) = a.dimensions();
    debug_assert_eq!((width, height), b.dimensions());

    let lab_a = to_lab(a);
    let lab_b = to_lab(b);

    let mut mask = GrayImage::new(width, height);
    for (i, p) in mask.pixels_mut().enumerate() {
        if delta_e(lab_a[i], lab_b[i]) > threshold {
            *p = Luma([255]);
        }
    }
    mask
}
