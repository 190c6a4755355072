//! Error types for poster generation.

use std::path::PathBuf;

use thiserror::Error;

use crate::bbox::BboxError;

/// Result type alias using PosterError.
pub type PosterResult<T> = Result<T, PosterError>;

/// Primary error type for poster operations.
#[derive(Debug, Error)]
pub enum PosterError {
    // === Data Errors ===
    #[error("Failed to load point data from {path}: {message}")]
    DataLoad { path: PathBuf, message: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid bounding box: {0}")]
    InvalidBbox(#[from] BboxError),

    // === Rendering Errors ===
    #[error(transparent)]
    Render(#[from] RenderError),

    // === Infrastructure Errors ===
    #[error("Network error: {0}")]
    Network(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures raised while composing or saving a poster.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Base map image not found: {}", .0.display())]
    BaseImageNotFound(PathBuf),

    #[error("Base map image could not be decoded ({}): {message}", path.display())]
    BaseImageUnreadable { path: PathBuf, message: String },

    #[error("Unknown poster style: {0}")]
    UnknownStyle(String),

    #[error("Failed to encode poster: {0}")]
    Encode(String),
}

impl PosterError {
    /// Short machine-readable code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            PosterError::DataLoad { .. } => "DataLoadError",
            PosterError::Validation(_) | PosterError::InvalidBbox(_) => "ValidationError",
            PosterError::Render(RenderError::BaseImageNotFound(_)) => "BaseImageNotFound",
            PosterError::Render(RenderError::UnknownStyle(_)) => "UnknownStyle",
            PosterError::Render(_) => "RenderError",
            PosterError::Network(_) => "NetworkError",
            PosterError::Io(_) => "IoError",
        }
    }
}
