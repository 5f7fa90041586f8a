use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::models::Region;

pub const OUTLINE: Rgb<u8> = Rgb([255, 0, 0]);
pub const THICKNESS: u32 = 2;

/// Outline each region on `img`, spanning `(x, y)` to `(x + w, y + h)`.
/// Parts falling outside the image are clipped.
pub fn draw_regions(img: &mut RgbImage, regions: &[Region]) {
    for region in regions {
        for inset in 0..THICKNESS {
            let w = (region.width + 1).saturating_sub(2 * inset);
            let h = (region.height + 1).saturating_sub(2 * inset);
            if w == 0 || h == 0 {
                break;
            }
            let rect = Rect::at((region.x + inset) as i32, (region.y + inset) as i32).of_size(w, h);
            draw_hollow_rect_mut(img, rect, OUTLINE);
        }
    }
}
