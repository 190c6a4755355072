//! Label text with readability backing and style text effects.

use image::Rgba;
use imageproc::drawing::{draw_filled_rect_mut, Canvas};
use imageproc::rect::Rect;

use poster_common::GeoPoint;

use crate::fonts::{FontSet, ResolvedFont};
use crate::style::{StyleProfile, TextEffect, TextRole};

/// Padding around the measured text box for the backing rectangle.
pub const TEXT_BACKGROUND_PADDING: i32 = 3;

/// Offset of the shadow copy, down and right.
pub const SHADOW_OFFSET: i32 = 2;

/// Offset of the emboss highlight, up and left.
pub const EMBOSS_OFFSET: i32 = -1;

pub const EMBOSS_HIGHLIGHT: Rgba<u8> = Rgba([255, 255, 255, 160]);

/// Rectangle covering `(x, y, width, height)` grown by `padding` on every
/// side. Both corners `(x - padding, y - padding)` and
/// `(x + width + padding, y + height + padding)` are inside the rectangle.
pub fn padded_rect(x: i32, y: i32, width: i32, height: i32, padding: i32) -> Rect {
    Rect::at(x - padding, y - padding).of_size(
        (width.max(0) + 2 * padding + 1).max(1) as u32,
        (height.max(0) + 2 * padding + 1).max(1) as u32,
    )
}

/// Draw one line of label text at `(x, y)` and return its measured size.
///
/// Layers, bottom to top: shadow copy (if the style has `Shadow`), emboss
/// highlight (if `Emboss`), backing rectangle in the legend colour, text.
pub fn draw_label_text<C>(
    canvas: &mut C,
    x: i32,
    y: i32,
    text: &str,
    font: &ResolvedFont,
    profile: &StyleProfile,
) -> (i32, i32)
where
    C: Canvas<Pixel = Rgba<u8>>,
{
    let palette = &profile.palette;
    let (width, height) = font.measure(text);

    if profile.has_text_effect(TextEffect::Shadow) {
        font.draw(
            canvas,
            palette.shadow,
            x + SHADOW_OFFSET,
            y + SHADOW_OFFSET,
            text,
        );
    }

    if profile.has_text_effect(TextEffect::Emboss) {
        font.draw(
            canvas,
            EMBOSS_HIGHLIGHT,
            x + EMBOSS_OFFSET,
            y + EMBOSS_OFFSET,
            text,
        );
    }

    draw_filled_rect_mut(
        canvas,
        padded_rect(x, y, width, height, TEXT_BACKGROUND_PADDING),
        palette.legend_background,
    );

    font.draw(canvas, palette.text, x, y, text);

    (width, height)
}

/// Draw the two-line point label: name, then `(category)` just below.
pub fn draw_point_label<C>(
    canvas: &mut C,
    x: i32,
    y: i32,
    point: &GeoPoint,
    fonts: &FontSet,
    profile: &StyleProfile,
) where
    C: Canvas<Pixel = Rgba<u8>>,
{
    let name_font = fonts.get(TextRole::Name);
    let (_, name_height) = draw_label_text(canvas, x, y, point.name(), name_font, profile);

    let category_line = format!("({})", point.category());
    draw_label_text(
        canvas,
        x,
        y + name_height + 2,
        &category_line,
        fonts.get(TextRole::Category),
        profile,
    );
}
