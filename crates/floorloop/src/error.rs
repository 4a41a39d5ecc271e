//! Error types for chaining, floor building and settings.

use shared::Point2D;
use thiserror::Error;

/// Structural failures raised by the curve chainer.
///
/// After either error the slice passed to the chainer is partially reordered
/// and must be re-derived from the source rows before reuse.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChainError {
    #[error("non-contiguous input curves: no segment continues from segment {index} at ({:.4}, {:.4})", .at.x, .at.y)]
    NonContiguous { index: usize, at: Point2D },

    #[error("malformed geometry: segment {index} has a non-finite coordinate")]
    MalformedGeometry { index: usize },

    #[error("invalid tolerance {tolerance}: must be a positive finite number")]
    InvalidTolerance { tolerance: f64 },
}

/// Errors reported by a floor builder.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FloorError {
    #[error("Failed to find the specified floor type: {0}")]
    FloorTypeNotFound(String),

    #[error("Failed to find a valid level.")]
    LevelNotFound,

    #[error("failed to write profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize profile: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors loading or saving a settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}
