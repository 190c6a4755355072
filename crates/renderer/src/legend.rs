//! Fixed-position legend panel listing every known category.

use image::Rgba;
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, Canvas};
use imageproc::rect::Rect;

use crate::fonts::FontSet;
use crate::style::{CategoryColorTable, StyleProfile, TextRole};

pub const LEGEND_X: i32 = 30;
pub const LEGEND_Y: i32 = 30;
pub const LEGEND_WIDTH: u32 = 280;
pub const LEGEND_HEIGHT: u32 = 300;

/// Pixel size of the panel; both corner coordinates are inclusive, so the
/// panel spans (30,30)-(310,330).
const PANEL_WIDTH: u32 = LEGEND_WIDTH + 1;
const PANEL_HEIGHT: u32 = LEGEND_HEIGHT + 1;

pub const LEGEND_SHADOW_OFFSET: i32 = 3;
pub const LEGEND_SHADOW: Rgba<u8> = Rgba([0, 0, 0, 50]);

/// Inset of the title from the panel's top-left corner.
pub const TITLE_INSET: i32 = 15;

/// Distance from the panel top to the first row.
pub const FIRST_ROW_OFFSET: i32 = 50;
pub const ROW_STEP: i32 = 20;

const SWATCH_X: i32 = 45;
const SWATCH_WIDTH: u32 = 21;
const SWATCH_HEIGHT: u32 = 13;
const ROW_LABEL_X: i32 = 75;

/// Draw the legend: drop shadow, panel, border, title, then one swatch row
/// per category in table order. Title, border, swatch outlines and row
/// labels all use the style's text colour.
pub fn draw_legend<C>(
    canvas: &mut C,
    title: &str,
    profile: &StyleProfile,
    categories: &CategoryColorTable,
    fonts: &FontSet,
) where
    C: Canvas<Pixel = Rgba<u8>>,
{
    let palette = &profile.palette;
    let panel = Rect::at(LEGEND_X, LEGEND_Y).of_size(PANEL_WIDTH, PANEL_HEIGHT);

    draw_filled_rect_mut(
        canvas,
        Rect::at(LEGEND_X + LEGEND_SHADOW_OFFSET, LEGEND_Y + LEGEND_SHADOW_OFFSET)
            .of_size(PANEL_WIDTH, PANEL_HEIGHT),
        LEGEND_SHADOW,
    );
    draw_filled_rect_mut(canvas, panel, palette.legend_background);
    draw_hollow_rect_mut(canvas, panel, palette.text);

    fonts.get(TextRole::Title).draw(
        canvas,
        palette.text,
        LEGEND_X + TITLE_INSET,
        LEGEND_Y + TITLE_INSET,
        title,
    );

    let row_font = fonts.get(TextRole::Category);
    for (row, (name, color)) in categories.iter().enumerate() {
        let y = row_y(row);
        let swatch = Rect::at(SWATCH_X, y).of_size(SWATCH_WIDTH, SWATCH_HEIGHT);
        draw_filled_rect_mut(canvas, swatch, color);
        draw_hollow_rect_mut(canvas, swatch, palette.text);
        row_font.draw(canvas, palette.text, ROW_LABEL_X, y - 2, name);
    }
}

/// Top of the swatch for legend row `row`.
pub fn row_y(row: usize) -> i32 {
    LEGEND_Y + FIRST_ROW_OFFSET + ROW_STEP * row as i32
}
