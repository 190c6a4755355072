//! Writing finished posters to disk.

use std::io::{BufWriter, Write};
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageOutputFormat, RgbaImage};
use poster_common::RenderError;
use tracing::info;

/// JPEG quality used for `.jpg`/`.jpeg` outputs.
pub const JPEG_QUALITY: u8 = 95;

/// Save `image` to `path`, picking the format from the extension.
///
/// The poster is encoded into a temporary file next to `path` and renamed
/// into place, so a failed save never leaves a partial file behind. JPEG
/// output drops the alpha channel.
pub fn save_poster(image: &RgbaImage, path: &Path) -> Result<(), RenderError> {
    let format = ImageFormat::from_path(path).map_err(|e| RenderError::Encode(e.to_string()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| RenderError::Encode(e.to_string()))?;

    let dynamic = DynamicImage::ImageRgba8(image.clone());
    let (dynamic, output_format) = match format {
        ImageFormat::Jpeg => (
            DynamicImage::ImageRgb8(dynamic.to_rgb8()),
            ImageOutputFormat::Jpeg(JPEG_QUALITY),
        ),
        other => (dynamic, ImageOutputFormat::from(other)),
    };

    let tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| RenderError::Encode(e.to_string()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        dynamic
            .write_to(&mut writer, output_format)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
    }
    tmp.persist(path)
        .map_err(|e| RenderError::Encode(e.error.to_string()))?;

    info!(path = %path.display(), width = image.width(), height = image.height(), "Saved poster");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poster.png");
        let img = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));

        save_poster(&img, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.get_pixel(3, 3), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_unknown_extension_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poster.xyz");
        let img = RgbaImage::new(4, 4);

        assert!(matches!(save_poster(&img, &path), Err(RenderError::Encode(_))));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_jpeg_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("poster.jpg");
        let img = RgbaImage::from_pixel(8, 8, Rgba([200, 100, 50, 128]));

        save_poster(&img, &path).unwrap();
        assert!(path.exists());
    }
}
