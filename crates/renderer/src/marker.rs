//! Point marker glyphs.

use image::Rgba;
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_polygon_mut, Canvas,
};
use imageproc::point::Point;

use crate::style::MarkerShape;

pub const CIRCLE_RADIUS: i32 = 6;
pub const DOT_RADIUS: i32 = 3;
pub const STAR_HALF_WIDTH: i32 = 6;
pub const STAR_HALF_HEIGHT: i32 = 8;

const OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Draw a marker of `shape` centred on `(x, y)`.
pub fn draw_marker<C>(canvas: &mut C, shape: MarkerShape, x: i32, y: i32, color: Rgba<u8>)
where
    C: Canvas<Pixel = Rgba<u8>>,
{
    match shape {
        MarkerShape::Circle => {
            draw_filled_circle_mut(canvas, (x, y), CIRCLE_RADIUS, color);
            // 2px outline on the inside edge
            draw_hollow_circle_mut(canvas, (x, y), CIRCLE_RADIUS, OUTLINE);
            draw_hollow_circle_mut(canvas, (x, y), CIRCLE_RADIUS - 1, OUTLINE);
        }
        MarkerShape::Star => {
            let diamond = star_points(x, y);
            draw_polygon_mut(canvas, &diamond, color);
            for (i, start) in diamond.iter().enumerate() {
                let end = diamond[(i + 1) % diamond.len()];
                draw_line_segment_mut(
                    canvas,
                    (start.x as f32, start.y as f32),
                    (end.x as f32, end.y as f32),
                    OUTLINE,
                );
            }
        }
        MarkerShape::Dot => {
            draw_filled_circle_mut(canvas, (x, y), DOT_RADIUS, color);
        }
    }
}

/// Diamond vertices: top, right, bottom, left.
pub fn star_points(x: i32, y: i32) -> [Point<i32>; 4] {
    [
        Point::new(x, y - STAR_HALF_HEIGHT),
        Point::new(x + STAR_HALF_WIDTH, y),
        Point::new(x, y + STAR_HALF_HEIGHT),
        Point::new(x - STAR_HALF_WIDTH, y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_circle_center_and_outline() {
        let mut img = RgbaImage::from_pixel(40, 40, WHITE);
        draw_marker(&mut img, MarkerShape::Circle, 20, 20, RED);
        assert_eq!(img.get_pixel(20, 20), &RED);
        assert_eq!(img.get_pixel(26, 20), &OUTLINE);
        assert_eq!(img.get_pixel(28, 20), &WHITE);
    }

    #[test]
    fn test_dot_radius() {
        let mut img = RgbaImage::from_pixel(20, 20, WHITE);
        draw_marker(&mut img, MarkerShape::Dot, 10, 10, RED);
        assert_eq!(img.get_pixel(13, 10), &RED);
        assert_eq!(img.get_pixel(15, 10), &WHITE);
    }

    #[test]
    fn test_star_extent() {
        let mut img = RgbaImage::from_pixel(40, 40, WHITE);
        draw_marker(&mut img, MarkerShape::Star, 20, 20, RED);
        assert_eq!(img.get_pixel(20, 20), &RED);
        assert_ne!(img.get_pixel(20, 12), &WHITE);
        assert_eq!(img.get_pixel(20, 10), &WHITE);
        assert_eq!(img.get_pixel(27, 20), &WHITE);
    }

    #[test]
    fn test_marker_off_canvas_is_clipped() {
        let mut img = RgbaImage::from_pixel(10, 10, WHITE);
        draw_marker(&mut img, MarkerShape::Circle, -3, -3, RED);
        assert_eq!(img.get_pixel(9, 9), &WHITE);
    }
}
