//! Test support for the surf poster crates.
//!
//! - `fixtures`: bounding boxes and surf break records
//! - `generators`: solid and ramp rasters, temp point files and base maps
//! - `paths`: locating a TrueType font for text tests
//!
//! Pull it in as a dev-dependency with a path into `crates/test-utils`.

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolve a font file for a text test, or return early from the test
/// with a note on stderr when the host has none.
///
/// ```ignore
/// let font_path = test_utils::require_font!();
/// ```
#[macro_export]
macro_rules! require_font {
    () => {{
        match $crate::find_test_font() {
            Some(path) => path,
            None => {
                eprintln!("SKIPPED: no font on this host (set TEST_FONT_PATH to run)");
                return;
            }
        }
    }};
}

/// Assert that every channel of an RGBA pixel is within `tol` of the
/// expected value. Blended drawing rounds through floats, so exact pixel
/// comparisons are too strict for anything drawn with alpha.
///
/// ```ignore
/// test_utils::assert_pixel_near!(img.get_pixel(5, 5), [250, 250, 250, 255], 1);
/// ```
#[macro_export]
macro_rules! assert_pixel_near {
    ($pixel:expr, $expected:expr, $tol:expr) => {{
        let actual: [u8; 4] = $pixel.0;
        let expected: [u8; 4] = $expected;
        let tol: i16 = $tol;
        let close = actual
            .iter()
            .zip(expected.iter())
            .all(|(a, e)| (*a as i16 - *e as i16).abs() <= tol);
        if !close {
            panic!(
                "pixel {:?} not within {} of {:?}",
                actual, tol, expected
            );
        }
    }};
}
