//! Hosted image models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MapGenError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    #[default]
    #[serde(rename = "flux-schnell")]
    FluxSchnell,
    #[serde(rename = "flux-dev")]
    FluxDev,
    #[serde(rename = "sdxl")]
    Sdxl,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::FluxSchnell, Model::FluxDev, Model::Sdxl];

    pub fn name(&self) -> &'static str {
        match self {
            Model::FluxSchnell => "flux-schnell",
            Model::FluxDev => "flux-dev",
            Model::Sdxl => "sdxl",
        }
    }

    /// Replicate model reference, `owner/name` or `owner/name:version`.
    pub fn identifier(&self) -> &'static str {
        match self {
            Model::FluxSchnell => "black-forest-labs/flux-schnell",
            Model::FluxDev => "black-forest-labs/flux-dev",
            Model::Sdxl => {
                "stability-ai/sdxl:39ed52f2a78e934b3ba6e2a89f5b1c712de7dfea535525255b1aa35c5565e08b"
            }
        }
    }

    /// Pinned version hash, if the identifier carries one.
    pub fn version(&self) -> Option<&'static str> {
        self.identifier().split_once(':').map(|(_, version)| version)
    }

    /// `owner/name` without the version.
    pub fn model_path(&self) -> &'static str {
        self.identifier()
            .split_once(':')
            .map_or(self.identifier(), |(path, _)| path)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = MapGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| MapGenError::UnknownModel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        assert_eq!(Model::FluxDev.identifier(), "black-forest-labs/flux-dev");
        assert_eq!(Model::FluxSchnell.version(), None);
        assert_eq!(Model::Sdxl.model_path(), "stability-ai/sdxl");
        assert!(Model::Sdxl.version().unwrap().starts_with("39ed52f2"));
    }

    #[test]
    fn test_parse() {
        assert_eq!("sdxl".parse::<Model>().unwrap(), Model::Sdxl);
        assert!(matches!(
            "dall-e".parse::<Model>(),
            Err(MapGenError::UnknownModel(_))
        ));
    }
}
