//! Error types for Driftwing.

use thiserror::Error;

/// Top-level error type for terrain operations.
#[derive(Debug, Error)]
pub enum TerrainError {
    /// The display backend rejected a generated tile.
    #[error("upload error: {0}")]
    Upload(#[from] UploadError),

    /// A cross-thread invariant was broken.
    ///
    /// This is a programming-defect class: a correct implementation never
    /// produces it at runtime, and callers should treat it as fatal.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Failure reported by a display backend when asked to create a texture.
#[derive(Debug, Clone, Error)]
#[error("display backend rejected {width}x{height} pixel upload: {reason}")]
pub struct UploadError {
    /// Backend-specific failure description
    pub reason: String,
    /// Width of the rejected image in pixels
    pub width: u32,
    /// Height of the rejected image in pixels
    pub height: u32,
}

impl UploadError {
    /// Creates a new upload error.
    #[must_use]
    pub fn new(reason: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            reason: reason.into(),
            width,
            height,
        }
    }
}

/// Result type alias for terrain operations.
pub type TerrainResult<T> = Result<T, TerrainError>;
