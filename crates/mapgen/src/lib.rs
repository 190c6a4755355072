//! AI base map generation.
//!
//! Builds style prompts that leave wide coastal margins for labels, submits
//! them to the Replicate predictions API and downloads the resulting image.

pub mod client;
pub mod error;
pub mod model;
pub mod prompt;

pub use client::{parse_output_url, GenerationOptions, MapGenerator, API_TOKEN_ENV};
pub use error::{MapGenError, MapGenResult};
pub use model::Model;
pub use prompt::{build_custom_prompt, build_prompt, MapStyle};
