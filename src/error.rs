use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while comparing two images.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("input image not found: {}", .path.display())]
    MissingInput { path: PathBuf },

    #[error("failed to decode image {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(
        "image sizes differ: baseline {}x{}, candidate {}x{}",
        .baseline.0, .baseline.1, .candidate.0, .candidate.1
    )]
    SizeMismatch {
        baseline: (u32, u32),
        candidate: (u32, u32),
    },

    #[error("image {width}x{height} is smaller than the {window}x{window} similarity window")]
    TooSmall { width: u32, height: u32, window: u32 },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("failed to prepare directory {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, DiffError>;
