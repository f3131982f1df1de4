//! Errors raised while loading inputs, slicing and exporting snapshots

use std::path::PathBuf;

/// Everything that can abort a slicing run.
///
/// Degenerate (zero-length) centerline segments and planes that miss a mesh
/// are *not* errors; they are recorded in the [`RunReport`](crate::pipeline::RunReport).
#[derive(Debug, thiserror::Error)]
pub enum SliceError {
    /// (MissingFile) A required input does not exist
    #[error("(MissingFile) {name} does not exist ({})", path.display())]
    MissingFile { name: String, path: PathBuf },

    /// (MalformedRow) A centerline row does not start with three numbers
    #[error("(MalformedRow) line {line} does not contain three numeric fields: {content:?}")]
    MalformedRow { line: usize, content: String },

    /// (TooFewPoints) A centerline needs at least two points to form a segment
    #[error("(TooFewPoints) centerline {} has {count} valid point(s), at least 2 are required", path.display())]
    TooFewPoints { path: PathBuf, count: usize },

    /// (Stl) The mesh file could not be decoded
    #[error("(Stl) could not read {}: {source}", path.display())]
    Stl {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// (InvalidConfig) The pipeline configuration is inconsistent
    #[error("(InvalidConfig) {0}")]
    InvalidConfig(String),

    /// Any other filesystem failure
    #[error("std::io::Error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, SliceError>;
