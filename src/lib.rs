pub mod diff;
pub mod error;
pub mod models;

use std::path::Path;

pub use diff::{Analysis, DiffEngine, DiffOptions, SizePolicy, analyze};
pub use error::DiffError;
pub use models::{ArtefactPaths, DetectionPass, DiffReport, Region};

/// Compare two image files with default tuning and return the mean SSIM.
///
/// Annotated copies of both images and the layout mask are written to
/// `output_dir`, or to `artefacts/` when `None`.
pub fn compare(
    baseline: &Path,
    candidate: &Path,
    output_dir: Option<&Path>,
) -> Result<f64, DiffError> {
    let mut options = DiffOptions::default();
    if let Some(dir) = output_dir {
        options = options.with_output_dir(dir);
    }
    DiffEngine::new(options)
        .compare(baseline, candidate)
        .map(|report| report.score)
}
