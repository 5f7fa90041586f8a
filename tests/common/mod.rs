#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from visdiff for tests
pub use visdiff::{
    ArtefactPaths, DetectionPass, DiffEngine, DiffError, DiffOptions, DiffReport, Region,
    SizePolicy,
};
