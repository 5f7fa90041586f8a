use image::GrayImage;
use image::imageops;
use imageproc::contours::{BorderType, Contour, find_contours};
use imageproc::point::Point;

use crate::models::{DetectionPass, Region};

/// Bounding boxes of the outermost blobs in a binary mask whose contour
/// encloses at least `min_area` pixels.
pub fn find_regions(mask: &GrayImage, min_area: u32, pass: DetectionPass) -> Vec<Region> {
    // Blobs touching column 0 are only traced as outer borders when there is
    // background to their left, so trace on a copy with a 1-px empty frame.
    let contours: Vec<Contour<u32>> = find_contours(&pad(mask));

    contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(|c| {
            let points: Vec<Point<u32>> = c
                .points
                .iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect();
            let area = contour_area(&points);
            if area < min_area as f64 {
                return None;
            }
            bounding_box(&points).map(|(x, y, width, height)| Region {
                x,
                y,
                width,
                height,
                area,
                pass,
            })
        })
        .collect()
}

/// Polygon area of a closed contour (shoelace formula).
///
/// Contours trace pixel centres, so a single pixel or a one-pixel-thick line
/// encloses no area.
pub fn contour_area(points: &[Point<u32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut twice_area = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    twice_area.abs() as f64 / 2.0
}

fn pad(mask: &GrayImage) -> GrayImage {
    let mut padded = GrayImage::new(mask.width() + 2, mask.height() + 2);
    imageops::replace(&mut padded, mask, 1, 1);
    padded
}

fn bounding_box(points: &[Point<u32>]) -> Option<(u32, u32, u32, u32)> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);

    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    Some((min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}
