//! Error types for map generation.

use thiserror::Error;

pub type MapGenResult<T> = Result<T, MapGenError>;

#[derive(Debug, Error)]
pub enum MapGenError {
    #[error("Replicate API token required. Set REPLICATE_API_TOKEN or pass a token")]
    MissingToken,

    #[error("Unsupported model: {0}. Available: flux-schnell, flux-dev, sdxl")]
    UnknownModel(String),

    #[error("Unknown map style: {0}")]
    UnknownStyle(String),

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Prediction returned no output image")]
    EmptyOutput,

    #[error("Network error: {0}")]
    Network(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for MapGenError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => MapGenError::Api {
                status: status.as_u16(),
                message: e.to_string(),
            },
            None => MapGenError::Network(e.to_string()),
        }
    }
}
