//! Equirectangular (plate carrée) projection onto a fixed-size raster.
//!
//! ```text
//! x = width  * (lon - min_lon) / (max_lon - min_lon)
//! y = height * (max_lat - lat) / (max_lat - min_lat)
//! ```
//!
//! The Y axis is inverted so north is up. Pixel coordinates are truncated
//! toward zero and never clamped; callers skip points that fall outside
//! the raster with [`in_raster`].

use poster_common::BoundingBox;

/// Linear mapping between a bounding box and a `width x height` raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equirectangular {
    pub bbox: BoundingBox,
    pub width: u32,
    pub height: u32,
}

impl Equirectangular {
    pub fn new(bbox: BoundingBox, width: u32, height: u32) -> Self {
        Self {
            bbox,
            width,
            height,
        }
    }

    /// Continuous pixel position for a coordinate.
    pub fn geo_to_pixel(&self, lat: f64, lon: f64) -> (f64, f64) {
        // Ratio first so the far edge lands exactly on `width`/`height`.
        let x = self.width as f64 * ((lon - self.bbox.min_lon()) / self.bbox.lon_span());
        let y = self.height as f64 * ((self.bbox.max_lat() - lat) / self.bbox.lat_span());
        (x, y)
    }

    /// Inverse of [`geo_to_pixel`](Self::geo_to_pixel). Returns `(lat, lon)`.
    pub fn pixel_to_geo(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = self.bbox.min_lon() + (x / self.width as f64) * self.bbox.lon_span();
        let lat = self.bbox.max_lat() - (y / self.height as f64) * self.bbox.lat_span();
        (lat, lon)
    }

    /// Integer pixel for a coordinate, truncated toward zero.
    pub fn project(&self, lat: f64, lon: f64) -> (i32, i32) {
        let (x, y) = self.geo_to_pixel(lat, lon);
        (x as i32, y as i32)
    }

    pub fn contains_pixel(&self, x: i32, y: i32) -> bool {
        in_raster(x, y, self.width, self.height)
    }

    /// Size in degrees of one pixel as `(lat, lon)`.
    pub fn pixel_size(&self) -> (f64, f64) {
        (
            self.bbox.lat_span() / self.height as f64,
            self.bbox.lon_span() / self.width as f64,
        )
    }
}

/// Project `(lat, lon)` onto a `width x height` raster covering `bbox`.
pub fn project(lat: f64, lon: f64, width: u32, height: u32, bbox: &BoundingBox) -> (i32, i32) {
    Equirectangular::new(*bbox, width, height).project(lat, lon)
}

/// Map a pixel position back to `(lat, lon)`.
pub fn unproject(x: f64, y: f64, width: u32, height: u32, bbox: &BoundingBox) -> (f64, f64) {
    Equirectangular::new(*bbox, width, height).pixel_to_geo(x, y)
}

/// True when `0 <= x < width` and `0 <= y < height`.
pub fn in_raster(x: i32, y: i32, width: u32, height: u32) -> bool {
    x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
}
