use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, RgbImage};

use crate::error::{DiffError, Result};
use crate::models::ArtefactPaths;

/// Where artefacts go when the caller does not choose.
pub const DEFAULT_DIR: &str = "artefacts";

/// Create `dir` (and parents) if needed.
pub fn prepare_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| DiffError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write the two annotated images and the layout mask into `dir`.
pub fn write_artefacts(
    dir: &Path,
    baseline_marked: &RgbImage,
    candidate_marked: &RgbImage,
    diff_mask: &GrayImage,
) -> Result<ArtefactPaths> {
    prepare_dir(dir)?;

    let paths = ArtefactPaths::in_dir(dir);
    save_png(baseline_marked, &paths.baseline_marked)?;
    save_png(candidate_marked, &paths.candidate_marked)?;
    save_mask_png(diff_mask, &paths.diff_mask)?;

    Ok(paths)
}

fn save_png(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| write_err(path, source))
}

fn save_mask_png(mask: &GrayImage, path: &Path) -> Result<()> {
    mask.save_with_format(path, ImageFormat::Png)
        .map_err(|source| write_err(path, source))
}

fn write_err(path: &Path, source: image::ImageError) -> DiffError {
    DiffError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Optional dump of every intermediate raster.
#[derive(Clone, Debug)]
pub struct DebugConfig {
    pub output_dir: PathBuf,
}

impl DebugConfig {
    /// The directory must be empty or not exist yet. It is only created when
    /// the first image is saved.
    pub fn new(output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir).map_err(|source| DiffError::Io {
                path: output_dir.clone(),
                source,
            })?;
            if entries.count() > 0 {
                return Err(DiffError::InvalidOptions(format!(
                    "debug directory is not empty: {}",
                    output_dir.display()
                )));
            }
        }

        Ok(Self { output_dir })
    }

    pub fn save_rgb(&self, name: &str, img: &RgbImage) -> Result<()> {
        prepare_dir(&self.output_dir)?;
        let path = self.output_dir.join(name);
        save_png(img, &path)?;
        tracing::debug!(path = %path.display(), "saved debug image");
        Ok(())
    }

    pub fn save_mask(&self, name: &str, mask: &GrayImage) -> Result<()> {
        prepare_dir(&self.output_dir)?;
        let path = self.output_dir.join(name);
        save_mask_png(mask, &path)?;
        tracing::debug!(path = %path.display(), "saved debug image");
        Ok(())
    }
}
