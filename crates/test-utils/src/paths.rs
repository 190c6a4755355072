//! Locating a font for text-rendering tests.

use std::path::PathBuf;

/// Font files present on common CI images and developer machines.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

/// First usable TrueType font: `TEST_FONT_PATH` if set, then the usual
/// system locations.
pub fn find_test_font() -> Option<PathBuf> {
    std::env::var_os("TEST_FONT_PATH")
        .map(PathBuf::from)
        .into_iter()
        .chain(FONT_CANDIDATES.iter().map(PathBuf::from))
        .find(|path| path.is_file())
}
