//! Poster rendering for geocoded surf break maps.
//!
//! Takes a base map raster and a set of points and produces a styled poster:
//! - Background effects (sepia, noise, subtle texture)
//! - Category-coloured markers with connector lines
//! - Labels with shadow/emboss text effects
//! - Legend panel and optional title

pub mod connector;
pub mod effects;
pub mod fonts;
pub mod legend;
pub mod marker;
pub mod output;
pub mod poster;
pub mod style;
pub mod text;

pub use fonts::{FileFontProvider, FontProvider, FontSet, FsFontProvider, NoFonts, ResolvedFont};
pub use output::save_poster;
pub use poster::{render_poster, PosterRenderer, RenderOptions, RenderSummary, RenderedPoster};
pub use style::{
    BackgroundEffect, CategoryColorTable, LineStyle, MarkerShape, Palette, StyleId, StyleProfile,
    StyleTable, TextEffect, TextRole,
};
