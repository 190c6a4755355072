//! Whole-image filters applied to the base map before anything is drawn.
//!
//! Every filter is a pure per-pixel transform on an RGBA raster. Only noise
//! is random; pass a seed for reproducible output.

use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::style::BackgroundEffect;

/// Fraction of pixels touched by the noise filter.
pub const NOISE_PROBABILITY: f64 = 0.1;

/// Noise offsets are drawn uniformly from `[-NOISE_AMPLITUDE, NOISE_AMPLITUDE]`.
pub const NOISE_AMPLITUDE: i16 = 20;

/// Contrast factor of the subtle texture filter.
pub const TEXTURE_CONTRAST: f32 = 1.1;

/// Apply `effects` to `img` in order.
pub fn apply_background_effects(
    img: &mut RgbaImage,
    effects: &[BackgroundEffect],
    noise_seed: Option<u64>,
) {
    for effect in effects {
        match effect {
            BackgroundEffect::Sepia => apply_sepia(img),
            BackgroundEffect::Noise => {
                let mut rng = match noise_seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                apply_noise(img, &mut rng);
            }
            BackgroundEffect::SubtleTexture => apply_subtle_texture(img),
        }
    }
}

/// Integer luma, `(299R + 587G + 114B) / 1000`.
#[inline]
pub fn luma(pixel: &Rgba<u8>) -> u8 {
    let [r, g, b, _] = pixel.0;
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Convert to grayscale and re-tint with the classic sepia matrix rows
/// applied to the luma. Output is opaque.
pub fn apply_sepia(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let l = luma(pixel) as f32;
        let tint = |a: f32, b: f32, c: f32| -> u8 { ((l * a + l * b + l * c) as u32).min(255) as u8 };
        *pixel = Rgba([
            tint(0.393, 0.769, 0.189),
            tint(0.349, 0.686, 0.168),
            tint(0.272, 0.534, 0.131),
            255,
        ]);
    }
}

/// Perturb roughly 10% of pixels by one random offset added to all three
/// colour channels. Alpha is left untouched.
pub fn apply_noise<R: Rng>(img: &mut RgbaImage, rng: &mut R) {
    for pixel in img.pixels_mut() {
        if !rng.gen_bool(NOISE_PROBABILITY) {
            continue;
        }
        let offset = rng.gen_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE);
        for channel in pixel.0.iter_mut().take(3) {
            *channel = (*channel as i16 + offset).clamp(0, 255) as u8;
        }
    }
}

/// Raise contrast by 10% around the image's mean luma.
pub fn apply_subtle_texture(img: &mut RgbaImage) {
    adjust_contrast(img, TEXTURE_CONTRAST);
}

/// Scale each colour channel's distance from the rounded mean luma by
/// `factor`.
pub fn adjust_contrast(img: &mut RgbaImage, factor: f32) {
    let pixel_count = img.width() as u64 * img.height() as u64;
    if pixel_count == 0 {
        return;
    }

    let total: u64 = img.pixels().map(|p| luma(p) as u64).sum();
    let mean = (total as f64 / pixel_count as f64).round() as f32;

    for pixel in img.pixels_mut() {
        for channel in pixel.0.iter_mut().take(3) {
            let v = mean + factor * (*channel as f32 - mean);
            *channel = (v.round() as i32).clamp(0, 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_weights() {
        assert_eq!(luma(&Rgba([255, 255, 255, 255])), 255);
        assert_eq!(luma(&Rgba([255, 0, 0, 255])), 76);
        assert_eq!(luma(&Rgba([0, 0, 0, 0])), 0);
    }

    #[test]
    fn test_sepia_mid_gray() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([128, 128, 128, 40]));
        apply_sepia(&mut img);
        assert_eq!(img.get_pixel(1, 1), &Rgba([172, 153, 119, 255]));
    }

    #[test]
    fn test_sepia_white_saturates() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        apply_sepia(&mut img);
        assert_eq!(img.get_pixel(0, 0), &Rgba([255, 255, 238, 255]));
    }

    #[test]
    fn test_contrast_uniform_image_unchanged() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([90, 90, 90, 200]));
        apply_subtle_texture(&mut img);
        assert_eq!(img.get_pixel(0, 0), &Rgba([90, 90, 90, 200]));
    }

    #[test]
    fn test_contrast_empty_image() {
        let mut img = RgbaImage::new(0, 0);
        apply_subtle_texture(&mut img);
        assert_eq!(img.width(), 0);
    }
}
