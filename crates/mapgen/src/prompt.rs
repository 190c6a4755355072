//! Map styles and prompt construction.
//!
//! Every prompt asks for wide margins around the coastline so poster labels
//! have somewhere to go.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MapGenError;

const MARGIN_CLAUSE: &str = "IMPORTANT: Ensure wide margins around the entire coastline \
(at least 15% of image width) for text label placement. The state outline should be centered \
with generous white space or background space around all edges. Optimize for text readability \
and label placement.";

const CUSTOM_MARGIN_CLAUSE: &str = "CRITICAL: Include wide margins around the entire Florida \
coastline (minimum 15% of image dimensions) for text label placement. Center the state with \
generous background space on all sides.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapStyle {
    Classic,
    Vintage,
    Minimalist,
    Watercolor,
    Retro,
    ArtDeco,
    Botanical,
}

impl MapStyle {
    pub const ALL: [MapStyle; 7] = [
        MapStyle::Classic,
        MapStyle::Vintage,
        MapStyle::Minimalist,
        MapStyle::Watercolor,
        MapStyle::Retro,
        MapStyle::ArtDeco,
        MapStyle::Botanical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MapStyle::Classic => "classic",
            MapStyle::Vintage => "vintage",
            MapStyle::Minimalist => "minimalist",
            MapStyle::Watercolor => "watercolor",
            MapStyle::Retro => "retro",
            MapStyle::ArtDeco => "art_deco",
            MapStyle::Botanical => "botanical",
        }
    }

    /// Base prompt describing the look of the map.
    pub fn prompt(&self) -> &'static str {
        match self {
            MapStyle::Classic => {
                "Professional cartographic map of Florida state, clean white background, \
                 detailed coastline with ample white margins around the entire perimeter for text labels, \
                 wide coastal buffer zones for surf break text placement, subtle blue ocean areas, \
                 light gray state boundaries, minimal interior details, high contrast, \
                 perfect for adding surf break markers and text overlays, cartographic style, no text or labels"
            }
            MapStyle::Vintage => {
                "Vintage 1940s travel poster style map of Florida, weathered parchment background, \
                 faded sepia and cream tones, art deco styling, distressed texture, \
                 wide coastal margins perfect for vintage-style text placement, \
                 retro tourism aesthetic, warm earth tones, aged paper effect, \
                 clear state outline, no text or modern elements"
            }
            MapStyle::Minimalist => {
                "Ultra-minimalist line art map of Florida, pure white background, \
                 single black line outline of the state, maximum white space around coastline for text labels, \
                 wide coastal margins perfect for surf break labeling, geometric simplicity, \
                 clean vector-style design, perfect negative space for text placement, scandinavian design aesthetic, \
                 no fill colors, no interior details, just the essential outline"
            }
            MapStyle::Watercolor => {
                "Watercolor painting of Florida map, soft pastel blues and greens, \
                 gentle paint bleeding effects, artistic brush strokes, light washes of color, \
                 plenty of white paper showing around the edges for text space, \
                 dreamy aquarelle technique, coastal waters in soft blue tones, \
                 artistic interpretation, no text, organic paint textures"
            }
            MapStyle::Retro => {
                "1970s surf culture style map of Florida, warm sunset colors, \
                 orange, coral, and teal color palette, retro typography spacing considerations, \
                 vintage surf aesthetic, faded sun-bleached appearance, \
                 wide coastal buffer zones for retro-style text placement, \
                 California dreaming meets Florida vibes, no text elements"
            }
            MapStyle::ArtDeco => {
                "Art Deco style Florida map, 1920s Miami glamour aesthetic, \
                 geometric patterns, metallic gold and turquoise accents, elegant curves and angular design elements, \
                 sophisticated color palette, generous white margins around entire coastline for elegant text styling, \
                 wide coastal buffer zones perfect for art deco typography, luxury hotel poster aesthetic, \
                 streamline moderne influence, no text"
            }
            MapStyle::Botanical => {
                "Botanical illustration style Florida map, detailed natural elements, \
                 palm fronds, orange blossoms, and coastal plants integrated into design, \
                 scientific illustration aesthetic, soft natural colors, \
                 hand-drawn botanical accuracy, white background with plant details, \
                 ample space around coastline for scientific-style labeling, \
                 nature field guide aesthetic, no text labels"
            }
        }
    }

    pub fn keywords(&self) -> &'static str {
        match self {
            MapStyle::Classic => "professional, cartographic, clean, minimal",
            MapStyle::Vintage => "vintage, art deco, sepia, weathered, retro",
            MapStyle::Minimalist => "minimalist, line art, geometric, clean, scandinavian",
            MapStyle::Watercolor => "watercolor, pastel, soft, artistic, aquarelle",
            MapStyle::Retro => "retro, 1970s, surf culture, sunset colors, vintage",
            MapStyle::ArtDeco => "art deco, geometric, elegant, luxury, 1920s",
            MapStyle::Botanical => "botanical, natural, scientific, detailed, hand-drawn",
        }
    }

    /// Default file name for a generated map of this style.
    pub fn default_file_name(&self) -> String {
        format!("florida_map_{}.png", self.as_str())
    }
}

impl fmt::Display for MapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapStyle {
    type Err = MapGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        MapStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == wanted)
            .ok_or_else(|| MapGenError::UnknownStyle(s.to_string()))
    }
}

/// Style prompt, margin requirements, then the style keywords.
pub fn build_prompt(style: MapStyle) -> String {
    format!(
        "{} {} Style: {}",
        style.prompt(),
        MARGIN_CLAUSE,
        style.keywords()
    )
}

/// Free-form prompt with the coastal margin requirement appended.
pub fn build_custom_prompt(text: &str) -> String {
    format!("{} {}", text.trim_end(), CUSTOM_MARGIN_CLAUSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_names_roundtrip() {
        for style in MapStyle::ALL {
            assert_eq!(style.as_str().parse::<MapStyle>().unwrap(), style);
        }
        assert_eq!("Art-Deco".parse::<MapStyle>().unwrap(), MapStyle::ArtDeco);
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(MapStyle::ArtDeco.default_file_name(), "florida_map_art_deco.png");
    }
}
