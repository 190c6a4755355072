//! Font discovery and text measurement.
//!
//! Styles name font families (e.g. `Helvetica-Bold`) that may not exist on
//! the rendering host. A [`FontProvider`] resolves a family to a loaded font
//! or reports it missing; missing fonts fall back to the provider's defaults
//! and, failing that, to estimated text metrics with no glyphs drawn.

use std::path::{Path, PathBuf};

use imageproc::drawing::{draw_text_mut, text_size, Canvas};
use rusttype::{Font, Scale};
use tracing::{debug, warn};

use crate::style::{StyleProfile, TextRole};

/// Average glyph advance as a fraction of the font size, used when no font
/// is available to measure with.
const ESTIMATED_CHAR_WIDTH: f32 = 0.6;

/// Font files tried, in order, when a family cannot be found.
const FALLBACK_FONT_FILES: &[&str] = &[
    "DejaVuSans.ttf",
    "dejavu/DejaVuSans.ttf",
    "truetype/dejavu/DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
    "liberation/LiberationSans-Regular.ttf",
    "truetype/liberation/LiberationSans-Regular.ttf",
    "Arial.ttf",
    "Supplemental/Arial.ttf",
    "Helvetica.ttc",
];

/// Directories searched by [`FsFontProvider::with_system_dirs`].
const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/share/fonts/truetype",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
    "C:\\Windows\\Fonts",
];

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Resolves font family names to loaded fonts.
pub trait FontProvider: Send + Sync {
    /// Load `family`, or `None` if neither it nor any fallback is available.
    fn load(&self, family: &str) -> Option<Font<'static>>;
}

/// Provider that never finds a font. Text is measured by estimate only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFonts;

impl FontProvider for NoFonts {
    fn load(&self, _family: &str) -> Option<Font<'static>> {
        None
    }
}

/// Provider that uses one font file for every family.
#[derive(Clone)]
pub struct FileFontProvider {
    font: Font<'static>,
}

impl FileFontProvider {
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        load_font_file(path.as_ref()).map(|font| Self { font })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(bytes).map(|font| Self { font })
    }
}

impl FontProvider for FileFontProvider {
    fn load(&self, _family: &str) -> Option<Font<'static>> {
        Some(self.font.clone())
    }
}

/// Searches font directories for `<family>.{ttf,otf,ttc}`, then for a list
/// of common fallback fonts.
#[derive(Debug, Clone, Default)]
pub struct FsFontProvider {
    dirs: Vec<PathBuf>,
}

impl FsFontProvider {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// `extra_dirs` first, then the usual system font locations.
    pub fn with_system_dirs(extra_dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut dirs: Vec<PathBuf> = extra_dirs.into_iter().collect();
        dirs.extend(SYSTEM_FONT_DIRS.iter().map(PathBuf::from));
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    fn find_family(&self, family: &str) -> Option<Font<'static>> {
        self.dirs.iter().find_map(|dir| {
            FONT_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{}.{}", family, ext)))
                .find_map(|path| load_font_file(&path))
        })
    }

    fn find_fallback(&self) -> Option<Font<'static>> {
        self.dirs.iter().find_map(|dir| {
            FALLBACK_FONT_FILES
                .iter()
                .find_map(|name| load_font_file(&dir.join(name)))
        })
    }
}

impl FontProvider for FsFontProvider {
    fn load(&self, family: &str) -> Option<Font<'static>> {
        if let Some(font) = self.find_family(family) {
            return Some(font);
        }
        debug!(family, "Font family not found, trying fallbacks");
        self.find_fallback()
    }
}

fn load_font_file(path: &Path) -> Option<Font<'static>> {
    if !path.is_file() {
        return None;
    }
    let bytes = std::fs::read(path).ok()?;
    let font = Font::try_from_vec(bytes);
    if font.is_none() {
        warn!(path = %path.display(), "Ignoring unparsable font file");
    }
    font
}

/// A font at a fixed pixel size. The font itself may be missing.
#[derive(Clone)]
pub struct ResolvedFont {
    font: Option<Font<'static>>,
    size: f32,
}

impl ResolvedFont {
    pub fn new(font: Option<Font<'static>>, size: f32) -> Self {
        Self { font, size }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_available(&self) -> bool {
        self.font.is_some()
    }

    fn scale(&self) -> Scale {
        Scale::uniform(self.size)
    }

    /// Width and height of `text` in pixels.
    ///
    /// Without a font the box is estimated as `0.6 * size` per character by
    /// `size` tall.
    pub fn measure(&self, text: &str) -> (i32, i32) {
        match &self.font {
            Some(font) => text_size(self.scale(), font, text),
            None => {
                let char_width = (self.size * ESTIMATED_CHAR_WIDTH) as i32;
                (text.chars().count() as i32 * char_width, self.size as i32)
            }
        }
    }

    /// Draw `text` with its top-left at `(x, y)`. No-op without a font.
    pub fn draw<C>(&self, canvas: &mut C, color: C::Pixel, x: i32, y: i32, text: &str)
    where
        C: Canvas<Pixel = image::Rgba<u8>>,
    {
        if let Some(font) = &self.font {
            draw_text_mut(canvas, color, x, y, self.scale(), font, text);
        }
    }
}

/// The three fonts a style draws with.
#[derive(Clone)]
pub struct FontSet {
    title: ResolvedFont,
    name: ResolvedFont,
    category: ResolvedFont,
}

impl FontSet {
    /// Load every font the style asks for.
    pub fn resolve(provider: &dyn FontProvider, profile: &StyleProfile) -> Self {
        let load = |role: TextRole| {
            let family = profile.fonts.get(role);
            let font = provider.load(family);
            if font.is_none() {
                warn!(
                    style = %profile.id,
                    family,
                    "No usable font found, text will be measured but not drawn"
                );
            }
            ResolvedFont::new(font, profile.font_sizes.get(role))
        };

        Self {
            title: load(TextRole::Title),
            name: load(TextRole::Name),
            category: load(TextRole::Category),
        }
    }

    pub fn get(&self, role: TextRole) -> &ResolvedFont {
        match role {
            TextRole::Title => &self.title,
            TextRole::Name => &self.name,
            TextRole::Category => &self.category,
        }
    }
}
