//! Poster style profiles and category colours.
//!
//! Both tables are plain immutable data built once at startup and passed by
//! reference into the renderer.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use poster_common::RenderError;
use serde::{Deserialize, Serialize};

/// Identifier of one of the fixed poster styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleId {
    Classic,
    Vintage,
    Minimalist,
    Watercolor,
    Retro,
}

impl StyleId {
    pub const ALL: [StyleId; 5] = [
        StyleId::Classic,
        StyleId::Vintage,
        StyleId::Minimalist,
        StyleId::Watercolor,
        StyleId::Retro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleId::Classic => "classic",
            StyleId::Vintage => "vintage",
            StyleId::Minimalist => "minimalist",
            StyleId::Watercolor => "watercolor",
            StyleId::Retro => "retro",
        }
    }

    fn index(&self) -> usize {
        match self {
            StyleId::Classic => 0,
            StyleId::Vintage => 1,
            StyleId::Minimalist => 2,
            StyleId::Watercolor => 3,
            StyleId::Retro => 4,
        }
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleId {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        StyleId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| RenderError::UnknownStyle(s.to_string()))
    }
}

/// The text roles a poster draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    /// Poster title and legend heading
    Title,
    /// Point name
    Name,
    /// Point category line and legend rows
    Category,
}

impl TextRole {
    pub const ALL: [TextRole; 3] = [TextRole::Title, TextRole::Name, TextRole::Category];
}

/// Colours used by a style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Paper colour shown through transparent parts of the base map
    pub background: Rgba<u8>,
    pub text: Rgba<u8>,
    /// Legend heading colour
    pub accent: Rgba<u8>,
    /// Legend panel and label backing fill
    pub legend_background: Rgba<u8>,
    /// Text shadow colour
    pub shadow: Rgba<u8>,
}

impl Palette {
    /// All colours with their key names, in a fixed order.
    pub fn entries(&self) -> [(&'static str, Rgba<u8>); 5] {
        [
            ("background", self.background),
            ("text", self.text),
            ("accent", self.accent),
            ("legend_bg", self.legend_background),
            ("shadow", self.shadow),
        ]
    }
}

/// Per-role value (font family or size).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerRole<T> {
    pub title: T,
    pub name: T,
    pub category: T,
}

impl<T: Copy> PerRole<T> {
    pub fn get(&self, role: TextRole) -> T {
        match role {
            TextRole::Title => self.title,
            TextRole::Name => self.name,
            TextRole::Category => self.category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    /// Filled disc, radius 6, with a black outline
    Circle,
    /// Four-point diamond, ±6 px wide and ±8 px tall
    Star,
    /// Small filled disc, radius 3
    Dot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub width: u32,
    pub dashed: bool,
}

/// Whole-image filter applied to the base map before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundEffect {
    Sepia,
    Noise,
    SubtleTexture,
}

/// Extra pass drawn under label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEffect {
    /// Dark copy offset down-right
    Shadow,
    /// Light copy offset up-left
    Emboss,
}

/// Everything that defines one poster theme.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProfile {
    pub id: StyleId,
    pub display_name: &'static str,
    pub palette: Palette,
    pub fonts: PerRole<&'static str>,
    pub font_sizes: PerRole<f32>,
    pub marker_shape: MarkerShape,
    pub line_style: LineStyle,
    pub background_effects: Vec<BackgroundEffect>,
    pub text_effects: Vec<TextEffect>,
}

impl StyleProfile {
    pub fn has_text_effect(&self, effect: TextEffect) -> bool {
        self.text_effects.contains(&effect)
    }
}

/// The fixed set of poster styles.
#[derive(Debug, Clone)]
pub struct StyleTable {
    profiles: Vec<StyleProfile>,
}

impl StyleTable {
    pub fn new() -> Self {
        let profiles = StyleId::ALL.into_iter().map(builtin_profile).collect();
        Self { profiles }
    }

    /// Look up a style by its string identifier.
    pub fn lookup(&self, style_id: &str) -> Result<&StyleProfile, RenderError> {
        let id: StyleId = style_id.parse()?;
        Ok(self.get(id))
    }

    pub fn get(&self, id: StyleId) -> &StyleProfile {
        &self.profiles[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleProfile> {
        self.profiles.iter()
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new()
    }
}

const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}

const TEXT_SHADOW: Rgba<u8> = rgba(0, 0, 0, 100);

fn builtin_profile(id: StyleId) -> StyleProfile {
    match id {
        StyleId::Classic => StyleProfile {
            id,
            display_name: "Classic",
            palette: Palette {
                background: rgba(245, 245, 245, 255),
                text: rgba(45, 45, 45, 255),
                accent: rgba(41, 128, 185, 255),
                legend_background: rgba(255, 255, 255, 230),
                shadow: TEXT_SHADOW,
            },
            fonts: PerRole {
                title: "Helvetica-Bold",
                name: "Helvetica",
                category: "Helvetica-Light",
            },
            font_sizes: PerRole {
                title: 24.0,
                name: 14.0,
                category: 11.0,
            },
            marker_shape: MarkerShape::Circle,
            line_style: LineStyle {
                width: 2,
                dashed: false,
            },
            background_effects: vec![BackgroundEffect::SubtleTexture],
            text_effects: vec![TextEffect::Shadow],
        },
        StyleId::Vintage => StyleProfile {
            id,
            display_name: "Vintage",
            palette: Palette {
                background: rgba(240, 235, 220, 255),
                text: rgba(101, 67, 33, 255),
                accent: rgba(139, 69, 19, 255),
                legend_background: rgba(250, 245, 235, 200),
                shadow: TEXT_SHADOW,
            },
            fonts: PerRole {
                title: "Times-Bold",
                name: "Times-Roman",
                category: "Times-Italic",
            },
            font_sizes: PerRole {
                title: 26.0,
                name: 15.0,
                category: 12.0,
            },
            marker_shape: MarkerShape::Star,
            line_style: LineStyle {
                width: 3,
                dashed: true,
            },
            background_effects: vec![BackgroundEffect::Sepia, BackgroundEffect::Noise],
            text_effects: vec![TextEffect::Emboss],
        },
        StyleId::Minimalist => StyleProfile {
            id,
            display_name: "Minimalist",
            palette: Palette {
                background: rgba(255, 255, 255, 255),
                text: rgba(0, 0, 0, 255),
                accent: rgba(100, 100, 100, 255),
                legend_background: rgba(250, 250, 250, 255),
                shadow: TEXT_SHADOW,
            },
            fonts: PerRole {
                title: "Helvetica-UltraLight",
                name: "Helvetica-Light",
                category: "Helvetica-UltraLight",
            },
            font_sizes: PerRole {
                title: 20.0,
                name: 12.0,
                category: 10.0,
            },
            marker_shape: MarkerShape::Dot,
            line_style: LineStyle {
                width: 1,
                dashed: false,
            },
            background_effects: vec![],
            text_effects: vec![],
        },
        StyleId::Watercolor => StyleProfile {
            id,
            display_name: "Watercolor",
            palette: Palette {
                background: rgba(250, 248, 243, 255),
                text: rgba(52, 73, 94, 255),
                accent: rgba(93, 173, 226, 255),
                legend_background: rgba(255, 255, 255, 210),
                shadow: rgba(52, 73, 94, 80),
            },
            fonts: PerRole {
                title: "Georgia-Bold",
                name: "Georgia",
                category: "Georgia-Italic",
            },
            font_sizes: PerRole {
                title: 24.0,
                name: 14.0,
                category: 11.0,
            },
            marker_shape: MarkerShape::Circle,
            line_style: LineStyle {
                width: 2,
                dashed: false,
            },
            background_effects: vec![BackgroundEffect::SubtleTexture],
            text_effects: vec![TextEffect::Shadow],
        },
        StyleId::Retro => StyleProfile {
            id,
            display_name: "Retro",
            palette: Palette {
                background: rgba(253, 235, 208, 255),
                text: rgba(87, 45, 36, 255),
                accent: rgba(0, 128, 128, 255),
                legend_background: rgba(255, 243, 224, 215),
                shadow: rgba(120, 40, 20, 90),
            },
            fonts: PerRole {
                title: "Futura-Bold",
                name: "Futura",
                category: "Futura-Medium",
            },
            font_sizes: PerRole {
                title: 26.0,
                name: 15.0,
                category: 12.0,
            },
            marker_shape: MarkerShape::Star,
            line_style: LineStyle {
                width: 2,
                dashed: true,
            },
            background_effects: vec![BackgroundEffect::Noise, BackgroundEffect::SubtleTexture],
            text_effects: vec![TextEffect::Shadow],
        },
    }
}

/// Colour used for categories missing from the table.
pub const FALLBACK_CATEGORY_COLOR: Rgba<u8> = rgba(255, 0, 0, 255);

/// Break type colours, in legend order.
const BREAK_TYPE_COLORS: &[(&str, Rgba<u8>)] = &[
    ("Beach", rgba(255, 107, 107, 255)),                // Coral red
    ("Beach/pier", rgba(74, 144, 226, 255)),            // Ocean blue
    ("Beach/jetty", rgba(72, 187, 120, 255)),           // Sea green
    ("Reef", rgba(255, 159, 67, 255)),                  // Sunset orange
    ("Point", rgba(162, 89, 255, 255)),                 // Purple
    ("Sandbar", rgba(255, 206, 84, 255)),               // Sandy yellow
    ("Breakwater", rgba(128, 142, 155, 255)),           // Steel gray
    ("River", rgba(85, 239, 196, 255)),                 // Turquoise
    ("Beach and reef", rgba(255, 177, 66, 255)),        // Light orange
    ("Beach/pier/jetty", rgba(34, 166, 179, 255)),      // Teal
    ("Beach, reef and jetty", rgba(255, 118, 117, 255)), // Pink coral
];

/// Ordered category → colour mapping with a fallback for unknown categories.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryColorTable {
    entries: Vec<(String, Rgba<u8>)>,
    fallback: Rgba<u8>,
}

impl CategoryColorTable {
    pub fn new(entries: Vec<(String, Rgba<u8>)>, fallback: Rgba<u8>) -> Self {
        Self { entries, fallback }
    }

    /// Colour for `category`, or the fallback if it is not in the table.
    pub fn lookup(&self, category: &str) -> Rgba<u8> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, color)| *color)
            .unwrap_or(self.fallback)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == category)
    }

    pub fn fallback(&self) -> Rgba<u8> {
        self.fallback
    }

    /// Entries in legend order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgba<u8>)> {
        self.entries.iter().map(|(name, color)| (name.as_str(), *color))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryColorTable {
    /// The Florida surf break types.
    fn default() -> Self {
        let entries = BREAK_TYPE_COLORS
            .iter()
            .map(|(name, color)| (name.to_string(), *color))
            .collect();
        Self::new(entries, FALLBACK_CATEGORY_COLOR)
    }
}
