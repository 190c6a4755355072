//! Leader lines from a marker to its label.

use image::Rgba;
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, Canvas};

use crate::style::LineStyle;

/// Length of one dash plus one gap, in pixels.
pub const DASH_PERIOD: f32 = 10.0;

/// Draw a connector from `start` to `end` in the given line style.
pub fn draw_connector<C>(
    canvas: &mut C,
    start: (f32, f32),
    end: (f32, f32),
    style: LineStyle,
    color: Rgba<u8>,
) where
    C: Canvas<Pixel = Rgba<u8>>,
{
    if style.dashed {
        for (a, b) in dash_segments(start, end) {
            draw_thick_line_segment_mut(canvas, a, b, color, style.width as f32);
        }
    } else {
        draw_thick_line_segment_mut(canvas, start, end, color, style.width as f32);
    }
}

/// Split a segment into `floor(len / 10)` dashes; dash `i` covers the
/// parametric range `[2i / 2n, (2i + 1) / 2n]`. Segments shorter than one
/// period yield no dashes.
pub fn dash_segments(start: (f32, f32), end: (f32, f32)) -> Vec<((f32, f32), (f32, f32))> {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let length = (dx * dx + dy * dy).sqrt();
    let n = (length / DASH_PERIOD).floor() as usize;
    if n == 0 {
        return Vec::new();
    }

    let lerp = |t: f32| (start.0 + dx * t, start.1 + dy * t);
    let steps = (2 * n) as f32;
    (0..n)
        .map(|i| {
            let t0 = (2 * i) as f32 / steps;
            let t1 = (2 * i + 1) as f32 / steps;
            (lerp(t0), lerp(t1))
        })
        .collect()
}

/// Line of roughly `width` pixels, drawn as a run of filled discs.
pub fn draw_thick_line_segment_mut<C>(
    canvas: &mut C,
    start: (f32, f32),
    end: (f32, f32),
    color: Rgba<u8>,
    width: f32,
) where
    C: Canvas<Pixel = Rgba<u8>>,
{
    if width <= 1.0 {
        draw_line_segment_mut(canvas, start, end, color);
        return;
    }

    let radius = (width / 2.0).max(1.0) as i32;
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let length = (dx * dx + dy * dy).sqrt();

    if length < 0.001 {
        draw_filled_circle_mut(canvas, (start.0 as i32, start.1 as i32), radius, color);
        return;
    }

    let step_size = (radius as f32 * 0.5).max(0.5);
    let num_steps = (length / step_size).ceil() as i32;
    let step_x = dx * step_size / length;
    let step_y = dy * step_size / length;

    for i in 0..=num_steps {
        let (x, y) = if i == num_steps {
            end
        } else {
            (start.0 + step_x * i as f32, start.1 + step_y * i as f32)
        };
        draw_filled_circle_mut(canvas, (x.round() as i32, y.round() as i32), radius, color);
    }
}
