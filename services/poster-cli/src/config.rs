//! Batch job configuration.
//!
//! A batch file lists pipeline jobs in YAML:
//!
//! ```yaml
//! jobs:
//!   - map_style: watercolor
//!     title: "Florida Surf Breaks - Watercolor Edition"
//!   - map_style: art_deco
//!     poster_style: minimalist
//!     output_name: deco_minimal
//!     width: 768
//!     height: 1024
//!     model: flux-dev
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use mapgen::{GenerationOptions, MapStyle, Model};
use renderer::StyleId;
use serde::Deserialize;
use tracing::debug;

use crate::pipeline::poster_style_for;

/// Root of a batch file.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

/// One AI map + poster job.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    pub map_style: MapStyle,
    /// Overlay style; defaults through the map style mapping
    #[serde(default)]
    pub poster_style: Option<StyleId>,
    #[serde(default)]
    pub output_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_size")]
    pub width: u32,
    #[serde(default = "default_size")]
    pub height: u32,
    #[serde(default)]
    pub model: Model,
}

fn default_size() -> u32 {
    1024
}

impl BatchConfig {
    /// Load a batch file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file: {}", path.display()))?;

        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse batch file: {}", path.display()))?;

        debug!(path = %path.display(), jobs = config.jobs.len(), "Loaded batch config");
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

impl JobConfig {
    pub fn poster_style(&self) -> StyleId {
        self.poster_style
            .unwrap_or_else(|| poster_style_for(self.map_style))
    }

    pub fn output_name(&self) -> String {
        self.output_name
            .clone()
            .unwrap_or_else(|| format!("ai_poster_{}", self.map_style))
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            width: self.width,
            height: self.height,
            model: self.model,
        }
    }
}
