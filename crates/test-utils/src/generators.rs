//! Test data generators for rasters and point files.
//!
//! These generators create predictable inputs that can be used across the
//! test suite without shipping binary fixtures.

use std::io::Write;
use std::path::PathBuf;

use image::{Rgba, RgbaImage};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Creates a raster filled with one colour.
///
/// # Example
///
/// ```
/// use test_utils::{solid_raster, WHITE};
///
/// let img = solid_raster(100, 100, WHITE);
/// assert_eq!(img.get_pixel(99, 99), &WHITE);
/// ```
pub fn solid_raster(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

/// Creates a raster with a horizontal grey ramp, useful for effect tests
/// where every column has a different luma.
pub fn gray_ramp_raster(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        let v = ((x * 255) / width.max(2).saturating_sub(1)).min(255) as u8;
        Rgba([v, v, v, 255])
    })
}

/// Writes `records` as a JSON point file in the scraper's output shape.
pub fn write_points_file(records: &[(&str, f64, f64, &str)]) -> tempfile::NamedTempFile {
    let json: Vec<serde_json::Value> = records
        .iter()
        .map(|(name, lat, lon, category)| {
            serde_json::json!({
                "name": name,
                "latitude": lat,
                "longitude": lon,
                "break_type": category,
            })
        })
        .collect();

    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("create temp points file");
    file.write_all(serde_json::to_string_pretty(&json).expect("serialize").as_bytes())
        .expect("write temp points file");
    file
}

/// Saves `img` as a PNG inside a fresh temp dir and returns both; the dir
/// must be kept alive for as long as the path is used.
pub fn write_base_image(img: &RgbaImage) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("base.png");
    img.save(&path).expect("save base image");
    (dir, path)
}

/// Counts pixels inside the rectangle `[x0, x1) x [y0, y1)` whose RGB
/// differs from `color`.
pub fn count_pixels_not(img: &RgbaImage, color: Rgba<u8>, x0: u32, y0: u32, x1: u32, y1: u32) -> usize {
    let mut count = 0;
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            let p = img.get_pixel(x, y);
            if p.0[..3] != color.0[..3] {
                count += 1;
            }
        }
    }
    count
}
