use crate::models::Region;

/// Thresholds for dropping edge-spanning strips (borders, scrollbars).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripFilter {
    /// A strip is thinner than this many pixels.
    pub max_thickness: u32,
    /// ...and longer than this fraction of the image side it runs along.
    pub min_span: f64,
}

impl Default for StripFilter {
    fn default() -> Self {
        Self {
            max_thickness: 6,
            min_span: 0.6,
        }
    }
}

impl StripFilter {
    pub fn is_strip(&self, region: &Region, width: u32, height: u32) -> bool {
        let horizontal = region.height < self.max_thickness
            && region.width as f64 > self.min_span * width as f64;
        let vertical = region.width < self.max_thickness
            && region.height as f64 > self.min_span * height as f64;
        horizontal || vertical
    }

    /// Split `regions` into survivors and the number of strips dropped.
    pub fn apply(&self, regions: Vec<Region>, width: u32, height: u32) -> (Vec<Region>, usize) {
        let before = regions.len();
        let kept: Vec<Region> = regions
            .into_iter()
            .filter(|r| !self.is_strip(r, width, height))
            .collect();
        let dropped = before - kept.len();
        (kept, dropped)
    }
}
