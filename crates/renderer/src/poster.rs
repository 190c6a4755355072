//! Poster composition: base map, effects, markers, labels, legend, title.

use std::path::Path;

use image::io::Reader as ImageReader;
use image::{Pixel, Rgba, RgbaImage};
use imageproc::drawing::Blend;
use serde::Serialize;
use tracing::{debug, info, instrument};

use poster_common::{BoundingBox, PointStore, RenderError};
use projection::{in_raster, place_label, project};

use crate::connector::draw_connector;
use crate::effects::apply_background_effects;
use crate::fonts::{FontProvider, FontSet};
use crate::legend::draw_legend;
use crate::marker::draw_marker;
use crate::style::{CategoryColorTable, StyleProfile, StyleTable, TextRole};
use crate::text::{draw_label_text, draw_point_label};

pub const DEFAULT_LEGEND_TITLE: &str = "Florida Surf Breaks";

/// Baseline of the optional poster title.
pub const TITLE_Y: i32 = 30;

/// Per-render settings that are not part of the style.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Centered title drawn near the top edge
    pub title: Option<String>,
    pub legend_title: String,
    /// Seed for the noise effect; `None` draws from entropy
    pub noise_seed: Option<u64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            legend_title: DEFAULT_LEGEND_TITLE.to_string(),
            noise_seed: None,
        }
    }
}

/// Counts of points drawn and skipped in one render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    pub placed: usize,
    /// Points whose projection fell outside the raster
    pub skipped: usize,
}

pub struct RenderedPoster {
    pub image: RgbaImage,
    pub summary: RenderSummary,
}

/// Render a poster onto a copy of `base`.
///
/// Transparent parts of the base take the style's background colour. The
/// base is never modified; every call builds its own raster.
pub fn render_poster(
    base: &RgbaImage,
    points: &PointStore,
    bbox: &BoundingBox,
    profile: &StyleProfile,
    categories: &CategoryColorTable,
    fonts: &dyn FontProvider,
    options: &RenderOptions,
) -> RenderedPoster {
    let (width, height) = base.dimensions();

    let mut raster = composite_over(base, profile.palette.background);
    apply_background_effects(&mut raster, &profile.background_effects, options.noise_seed);

    let fonts = FontSet::resolve(fonts, profile);
    let mut canvas = Blend(raster);
    let mut summary = RenderSummary::default();

    for point in points {
        let (x, y) = project(point.latitude(), point.longitude(), width, height, bbox);
        if !in_raster(x, y, width, height) {
            debug!(name = point.name(), x, y, "Point outside raster, skipping");
            summary.skipped += 1;
            continue;
        }

        let color = categories.lookup(point.category());
        draw_marker(&mut canvas, profile.marker_shape, x, y, color);

        let label = place_label(x, y, width, height, bbox);
        draw_connector(
            &mut canvas,
            (x as f32, y as f32),
            (label.x as f32, label.y as f32),
            profile.line_style,
            color,
        );
        draw_point_label(&mut canvas, label.x, label.y, point, &fonts, profile);

        summary.placed += 1;
    }

    draw_legend(&mut canvas, &options.legend_title, profile, categories, &fonts);

    if let Some(title) = &options.title {
        let title_font = fonts.get(TextRole::Title);
        let (text_width, _) = title_font.measure(title);
        let x = centered_x(width, text_width);
        draw_label_text(&mut canvas, x, TITLE_Y, title, title_font, profile);
    }

    RenderedPoster {
        image: canvas.0,
        summary,
    }
}

/// Left edge that centres `text_width` on a `width`-wide raster, floored so
/// titles wider than the raster shift left by the odd pixel.
pub fn centered_x(width: u32, text_width: i32) -> i32 {
    (width as i32 - text_width).div_euclid(2)
}

/// Flatten `base` onto an opaque `background`.
fn composite_over(base: &RgbaImage, background: Rgba<u8>) -> RgbaImage {
    let mut raster = RgbaImage::from_pixel(base.width(), base.height(), background);
    for (dst, src) in raster.pixels_mut().zip(base.pixels()) {
        match src.0[3] {
            0 => {}
            255 => *dst = *src,
            _ => dst.blend(src),
        }
    }
    raster
}

/// Renders posters against a fixed style table, category table and font
/// provider.
pub struct PosterRenderer {
    styles: StyleTable,
    categories: CategoryColorTable,
    fonts: Box<dyn FontProvider>,
}

impl PosterRenderer {
    pub fn new(fonts: impl FontProvider + 'static) -> Self {
        Self {
            styles: StyleTable::new(),
            categories: CategoryColorTable::default(),
            fonts: Box::new(fonts),
        }
    }

    pub fn with_categories(mut self, categories: CategoryColorTable) -> Self {
        self.categories = categories;
        self
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    pub fn categories(&self) -> &CategoryColorTable {
        &self.categories
    }

    /// Render with the style named `style_id`.
    #[instrument(skip(self, base, points, options), fields(width = base.width(), height = base.height()))]
    pub fn render(
        &self,
        base: &RgbaImage,
        points: &PointStore,
        bbox: &BoundingBox,
        style_id: &str,
        options: &RenderOptions,
    ) -> Result<RenderedPoster, RenderError> {
        let profile = self.styles.lookup(style_id)?;
        let poster = render_poster(
            base,
            points,
            bbox,
            profile,
            &self.categories,
            self.fonts.as_ref(),
            options,
        );

        info!(
            style = %profile.id,
            placed = poster.summary.placed,
            skipped = poster.summary.skipped,
            "Rendered poster"
        );
        Ok(poster)
    }

    /// Load the base map from `base_path`, then [`render`](Self::render).
    pub fn render_file(
        &self,
        base_path: &Path,
        points: &PointStore,
        bbox: &BoundingBox,
        style_id: &str,
        options: &RenderOptions,
    ) -> Result<RenderedPoster, RenderError> {
        // Unknown styles fail before the base image is read
        self.styles.lookup(style_id)?;
        let base = load_base_image(base_path)?;
        self.render(&base, points, bbox, style_id, options)
    }
}

/// Decode a base map image into RGBA. The format is sniffed from the file
/// contents, so a WebP or JPEG saved under a `.png` name still loads.
pub fn load_base_image(path: &Path) -> Result<RgbaImage, RenderError> {
    if !path.is_file() {
        return Err(RenderError::BaseImageNotFound(path.to_path_buf()));
    }

    let unreadable = |message: String| RenderError::BaseImageUnreadable {
        path: path.to_path_buf(),
        message,
    };
    let io_error = |e: std::io::Error| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RenderError::BaseImageNotFound(path.to_path_buf())
        } else {
            unreadable(e.to_string())
        }
    };

    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(io_error)?
        .decode()
        .map_err(|e| unreadable(e.to_string()))?;

    debug!(path = %path.display(), width = image.width(), height = image.height(), "Loaded base map");
    Ok(image.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_x() {
        assert_eq!(centered_x(100, 40), 30);
        assert_eq!(centered_x(101, 40), 30);
        // Wider than the raster: floor, not truncation toward zero
        assert_eq!(centered_x(100, 103), -2);
        assert_eq!(centered_x(100, 100), 0);
    }

    #[test]
    fn test_composite_over_alpha_cases() {
        let mut base = RgbaImage::new(3, 1);
        base.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        base.put_pixel(2, 0, Rgba([0, 0, 0, 128]));
        let flat = composite_over(&base, Rgba([200, 200, 200, 255]));

        assert_eq!(flat.get_pixel(0, 0), &Rgba([200, 200, 200, 255]));
        assert_eq!(flat.get_pixel(1, 0), &Rgba([10, 20, 30, 255]));
        let blended = flat.get_pixel(2, 0);
        assert!(blended.0[0] > 90 && blended.0[0] < 110);
        assert_eq!(blended.0[3], 255);
    }
}
