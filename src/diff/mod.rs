pub mod artefacts;
pub mod color;
pub mod contours;
pub mod filters;
pub mod morphology;
pub mod preprocessing;
pub mod render;
pub mod ssim;

use std::path::{Path, PathBuf};

use image::{GrayImage, RgbImage};

use crate::error::{DiffError, Result};
use crate::models::{DetectionPass, DiffReport, Region};
use artefacts::DebugConfig;
use filters::StripFilter;
pub use preprocessing::SizePolicy;

/// Width of the horizontal bar used to open the colour mask.
pub const FINE_KERNEL_WIDTH: u8 = 3;

/// Tuning for one comparison.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Minimum contour area for colour (glyph-level) regions.
    pub min_area_small: u32,
    /// Minimum contour area for structural (block-level) regions.
    pub min_area_big: u32,
    /// Number of 3x3 closing passes over the structural mask.
    pub close_iterations: u8,
    /// ΔE above which a pixel counts as a colour change.
    pub delta_e_threshold: f32,
    pub strip_filter: StripFilter,
    pub size_policy: SizePolicy,
    /// `None` means [`artefacts::DEFAULT_DIR`].
    pub output_dir: Option<PathBuf>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            min_area_small: 8,
            min_area_big: 40,
            close_iterations: 2,
            delta_e_threshold: 15.0,
            strip_filter: StripFilter::default(),
            size_policy: SizePolicy::Resize,
            output_dir: None,
        }
    }
}

impl DiffOptions {
    pub fn with_min_areas(mut self, small: u32, big: u32) -> Self {
        self.min_area_small = small;
        self.min_area_big = big;
        self
    }

    pub fn with_close_iterations(mut self, iterations: u8) -> Self {
        self.close_iterations = iterations;
        self
    }

    pub fn with_delta_e_threshold(mut self, threshold: f32) -> Self {
        self.delta_e_threshold = threshold;
        self
    }

    pub fn with_size_policy(mut self, policy: SizePolicy) -> Self {
        self.size_policy = policy;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(artefacts::DEFAULT_DIR))
    }

    pub fn validate(&self) -> Result<()> {
        if self.close_iterations == 0 {
            return Err(DiffError::InvalidOptions(
                "close_iterations must be at least 1".into(),
            ));
        }
        if !self.delta_e_threshold.is_finite() || self.delta_e_threshold < 0.0 {
            return Err(DiffError::InvalidOptions(format!(
                "delta_e_threshold must be a non-negative number, got {}",
                self.delta_e_threshold
            )));
        }
        Ok(())
    }
}

/// Everything computed from a pair of equally sized images, before drawing.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub score: f64,
    /// Binarized similarity map, before closing.
    pub structural_mask: GrayImage,
    pub color_mask: GrayImage,
    /// Colour mask after the horizontal opening.
    pub fine_mask: GrayImage,
    /// Structural mask after closing; persisted as `diff_mask.png`.
    pub layout_mask: GrayImage,
    /// Coarse regions first, then fine ones; strips already removed.
    pub regions: Vec<Region>,
    pub suppressed: usize,
}

/// Run both detection passes on images of identical size.
pub fn analyze(baseline: &RgbImage, candidate: &RgbImage, options: &DiffOptions) -> Result<Analysis> {
    options.validate()?;
    if baseline.dimensions() != candidate.dimensions() {
        return Err(DiffError::SizeMismatch {
            baseline: baseline.dimensions(),
            candidate: candidate.dimensions(),
        });
    }
    let (width, height) = baseline.dimensions();

    let gray_a = preprocessing::to_grayscale(baseline);
    let gray_b = preprocessing::to_grayscale(candidate);
    let map = ssim::ssim(&gray_a, &gray_b)?;
    let structural_mask = ssim::structural_mask(&map);

    let color_mask = color::color_mask(baseline, candidate, options.delta_e_threshold);

    let fine_mask = morphology::open_horizontal(&color_mask, FINE_KERNEL_WIDTH);
    let fine = contours::find_regions(&fine_mask, options.min_area_small, DetectionPass::Fine);

    let layout_mask = morphology::close_square(&structural_mask, options.close_iterations);
    let coarse = contours::find_regions(&layout_mask, options.min_area_big, DetectionPass::Coarse);

    tracing::debug!(fine = fine.len(), coarse = coarse.len(), "candidate regions");

    let mut pooled = coarse;
    pooled.extend(fine);
    let (regions, suppressed) = options.strip_filter.apply(pooled, width, height);

    if suppressed > 0 {
        tracing::debug!(suppressed, "dropped edge-spanning strips");
    }

    Ok(Analysis {
        score: map.score(),
        structural_mask,
        color_mask,
        fine_mask,
        layout_mask,
        regions,
        suppressed,
    })
}

/// Loads, compares, annotates and persists one baseline/candidate pair.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    pub options: DiffOptions,
    debug: Option<DebugConfig>,
}

impl DiffEngine {
    pub fn new(options: DiffOptions) -> Self {
        Self {
            options,
            debug: None,
        }
    }

    /// Dump every intermediate raster into `dir`, which must be empty or absent.
    pub fn with_debug(mut self, dir: PathBuf) -> Result<Self> {
        self.debug = Some(DebugConfig::new(dir)?);
        Ok(self)
    }

    pub fn compare(&self, baseline: &Path, candidate: &Path) -> Result<DiffReport> {
        preprocessing::ensure_exists(baseline)?;
        preprocessing::ensure_exists(candidate)?;
        self.options.validate()?;

        let img_a = preprocessing::load_rgb(baseline)?;
        let img_b = preprocessing::load_rgb(candidate)?;
        tracing::debug!(
            baseline = ?img_a.dimensions(),
            candidate = ?img_b.dimensions(),
            "decoded inputs"
        );

        let (mut img_a, mut img_b) = preprocessing::normalize(img_a, img_b, self.options.size_policy)?;
        let (width, height) = img_a.dimensions();

        if let Some(debug) = &self.debug {
            debug.save_rgb("00_baseline.png", &img_a)?;
            debug.save_rgb("00_candidate.png", &img_b)?;
        }

        let analysis = analyze(&img_a, &img_b, &self.options)?;

        if let Some(debug) = &self.debug {
            debug.save_mask("01_structural_mask.png", &analysis.structural_mask)?;
            debug.save_mask("02_color_mask.png", &analysis.color_mask)?;
            debug.save_mask("03_fine_mask.png", &analysis.fine_mask)?;
            debug.save_mask("04_layout_mask.png", &analysis.layout_mask)?;
        }

        render::draw_regions(&mut img_a, &analysis.regions);
        render::draw_regions(&mut img_b, &analysis.regions);

        let out_dir = self.options.output_dir();
        let artefacts = artefacts::write_artefacts(out_dir, &img_a, &img_b, &analysis.layout_mask)?;

        tracing::info!(
            ssim = format_args!("{:.4}", analysis.score),
            regions = analysis.regions.len(),
            out_dir = %out_dir.display(),
            "artefacts saved"
        );

        Ok(DiffReport {
            score: analysis.score,
            width,
            height,
            regions: analysis.regions,
            suppressed: analysis.suppressed,
            artefacts,
        })
    }
}
