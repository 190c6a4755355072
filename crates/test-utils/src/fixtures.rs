//! Common test fixtures for poster tests.
//!
//! This module provides pre-defined geographic extents and surf break
//! records that represent common scenarios in poster rendering.

/// Common bounding box definitions as `(min_lat, max_lat, min_lon, max_lon)`.
pub mod bbox {
    /// Whole state of Florida (the default poster extent)
    pub const FLORIDA: (f64, f64, f64, f64) = (24.5, 31.0, -87.6, -79.9);

    /// Atlantic coast from Jacksonville to Palm Beach
    pub const EAST_COAST: (f64, f64, f64, f64) = (26.5, 30.8, -82.0, -79.9);

    /// The Keys, entirely south of the label-direction threshold
    pub const KEYS: (f64, f64, f64, f64) = (24.4, 25.9, -82.0, -80.0);

    /// Degenerate box (zero latitude span)
    pub const FLAT: (f64, f64, f64, f64) = (28.0, 28.0, -82.0, -80.0);
}

/// Surf break records as `(name, latitude, longitude, break_type)`.
pub mod points {
    /// The break used by the end-to-end poster scenario; projects to the
    /// centre of a 100x100 raster over the Florida extent.
    pub const TEST_BREAK: (&str, f64, f64, &str) = ("Test Break", 27.75, -83.75, "Beach");

    /// A handful of real breaks on both coasts and in the Keys.
    pub const SAMPLE_BREAKS: &[(&str, f64, f64, &str)] = &[
        ("Cocoa Beach Pier", 28.368, -80.601, "Beach/pier"),
        ("Sebastian Inlet", 27.860, -80.445, "Beach/jetty"),
        ("Jacksonville Beach", 30.284, -81.392, "Beach"),
        ("Pensacola Beach", 30.333, -87.142, "Beach"),
        ("Anna Maria Island", 27.530, -82.734, "Sandbar"),
        ("Key West", 24.546, -81.797, "Reef"),
    ];
}
