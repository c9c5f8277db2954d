//! Error types for the export pipeline

use thiserror::Error;

/// Fatal conditions that abort an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid grid dimensions {width}x{height}x{depth} (every axis must be positive)")]
    InvalidDimensions {
        width: usize,
        height: usize,
        depth: usize,
    },

    #[error("voxel data length {actual} does not match {width}x{height}x{depth} = {expected}")]
    DataSizeMismatch {
        width: usize,
        height: usize,
        depth: usize,
        expected: usize,
        actual: usize,
    },

    #[error("atlas canvas grew to {width}x{height}, past the {limit} pixel limit")]
    AtlasLimit {
        width: u32,
        height: u32,
        limit: u32,
    },

    #[error("failed to parse .vox data: {0}")]
    VoxParse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
