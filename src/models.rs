use std::path::{Path, PathBuf};

/// Which detection pass produced a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionPass {
    /// Colour-difference pass, tuned for glyph-sized changes.
    Fine,
    /// Structural-similarity pass, tuned for block-sized changes.
    Coarse,
}

/// Axis-aligned bounding box of one connected blob in a difference mask,
/// in normalized-image pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Area enclosed by the blob's outer contour.
    pub area: f64,
    pub pass: DetectionPass,
}

/// Locations of the three files written by a successful comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactPaths {
    pub baseline_marked: PathBuf,
    pub candidate_marked: PathBuf,
    pub diff_mask: PathBuf,
}

impl ArtefactPaths {
    pub const BASELINE_MARKED: &'static str = "baseline_marked.png";
    pub const CANDIDATE_MARKED: &'static str = "candidate_marked.png";
    pub const DIFF_MASK: &'static str = "diff_mask.png";

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            baseline_marked: dir.join(Self::BASELINE_MARKED),
            candidate_marked: dir.join(Self::CANDIDATE_MARKED),
            diff_mask: dir.join(Self::DIFF_MASK),
        }
    }

    /// Directory the artefacts were written into.
    pub fn dir(&self) -> &Path {
        self.diff_mask.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Outcome of one comparison.
#[derive(Debug, Clone)]
pub struct DiffReport {
    /// Mean structural similarity over the whole image.
    pub score: f64,
    /// Normalized width both images were resized to.
    pub width: u32,
    /// Normalized height both images were resized to.
    pub height: u32,
    /// Regions that survived filtering and were drawn.
    pub regions: Vec<Region>,
    /// Number of regions dropped as edge-spanning strips.
    pub suppressed: usize,
    pub artefacts: ArtefactPaths,
}

impl DiffReport {
    pub fn passes(&self, threshold: f64) -> bool {
        self.score >= threshold
    }
}
