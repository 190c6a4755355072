//! Tests for the background effect filters.

use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::effects::{apply_background_effects, apply_noise, apply_sepia, apply_subtle_texture};
use renderer::BackgroundEffect;
use test_utils::{gray_ramp_raster, solid_raster};

// ============================================================================
// Sepia tests
// ============================================================================

#[test]
fn test_sepia_gray_128() {
    let mut img = solid_raster(3, 3, Rgba([128, 128, 128, 255]));
    apply_sepia(&mut img);
    for pixel in img.pixels() {
        assert_eq!(pixel, &Rgba([172, 153, 119, 255]));
    }
}

#[test]
fn test_sepia_is_warm_and_opaque() {
    let mut img = gray_ramp_raster(64, 2);
    apply_sepia(&mut img);
    for pixel in img.pixels() {
        let [r, g, b, a] = pixel.0;
        assert!(r >= g && g >= b, "not warm: {:?}", pixel);
        assert_eq!(a, 255);
    }
}

#[test]
fn test_sepia_uses_luma_not_channels() {
    // Pure green and a grey of the same luma end up identical
    let mut green = solid_raster(1, 1, Rgba([0, 255, 0, 255]));
    let mut gray = solid_raster(1, 1, Rgba([149, 149, 149, 255]));
    apply_sepia(&mut green);
    apply_sepia(&mut gray);
    assert_eq!(green.get_pixel(0, 0), gray.get_pixel(0, 0));
}

// ============================================================================
// Noise tests
// ============================================================================

#[test]
fn test_noise_touches_about_ten_percent() {
    let base = solid_raster(200, 200, Rgba([128, 128, 128, 77]));
    let mut img = base.clone();
    apply_noise(&mut img, &mut StdRng::seed_from_u64(7));

    let changed = img
        .pixels()
        .zip(base.pixels())
        .filter(|(a, b)| a != b)
        .count();
    let fraction = changed as f64 / (200.0 * 200.0);
    assert!(
        (0.07..0.13).contains(&fraction),
        "changed fraction {}",
        fraction
    );
}

#[test]
fn test_noise_offsets_bounded_and_shared() {
    let mut img = solid_raster(100, 100, Rgba([128, 128, 128, 77]));
    apply_noise(&mut img, &mut StdRng::seed_from_u64(42));

    for pixel in img.pixels() {
        let [r, g, b, a] = pixel.0;
        let offset = r as i16 - 128;
        assert!((-20..=20).contains(&offset));
        assert_eq!(g as i16 - 128, offset);
        assert_eq!(b as i16 - 128, offset);
        assert_eq!(a, 77);
    }
}

#[test]
fn test_noise_clamps_at_extremes() {
    let mut img = RgbaImage::from_fn(100, 100, |x, _| {
        if x % 2 == 0 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    });
    // Would panic on overflow in debug builds if unclamped
    apply_noise(&mut img, &mut StdRng::seed_from_u64(3));
}

#[test]
fn test_seeded_noise_is_reproducible() {
    let mut a = gray_ramp_raster(50, 50);
    let mut b = gray_ramp_raster(50, 50);
    apply_background_effects(&mut a, &[BackgroundEffect::Noise], Some(99));
    apply_background_effects(&mut b, &[BackgroundEffect::Noise], Some(99));
    assert_eq!(a, b);
}

// ============================================================================
// Subtle texture tests
// ============================================================================

#[test]
fn test_texture_stretches_around_mean() {
    let mut img = RgbaImage::from_fn(10, 10, |x, _| {
        if x < 5 {
            Rgba([100, 100, 100, 180])
        } else {
            Rgba([200, 200, 200, 180])
        }
    });
    apply_subtle_texture(&mut img);

    assert_eq!(img.get_pixel(0, 0), &Rgba([95, 95, 95, 180]));
    assert_eq!(img.get_pixel(9, 0), &Rgba([205, 205, 205, 180]));
}

#[test]
fn test_texture_clamps() {
    let mut img = RgbaImage::from_fn(10, 1, |x, _| {
        if x == 0 {
            Rgba([255, 0, 255, 255])
        } else {
            Rgba([128, 128, 128, 255])
        }
    });
    apply_subtle_texture(&mut img);
    let [r, g, _, _] = img.get_pixel(0, 0).0;
    assert_eq!(r, 255);
    assert_eq!(g, 0);
}

#[test]
fn test_effects_apply_in_order() {
    // Sepia then texture differs from texture then sepia on a ramp
    let mut a = gray_ramp_raster(64, 4);
    let mut b = a.clone();
    apply_background_effects(
        &mut a,
        &[BackgroundEffect::Sepia, BackgroundEffect::SubtleTexture],
        None,
    );
    apply_sepia(&mut b);
    apply_subtle_texture(&mut b);
    assert_eq!(a, b);
}
