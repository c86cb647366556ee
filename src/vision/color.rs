// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Color-space helpers for blood-smear imagery
//!
//! Stained lymphoblasts show up as a saturated purple band in HSV space.
//! This module provides the purple-band mask and the Lab lightness
//! equalization used by the preprocessing pipeline.

use image::{GrayImage, Luma, Rgb, RgbImage};
use palette::{FromColor, Hsv, Lab, Srgb};

/// Lower hue bound of the purple stain band, in degrees.
pub const PURPLE_HUE_MIN: f32 = 240.0;
/// Upper hue bound of the purple stain band, in degrees.
pub const PURPLE_HUE_MAX: f32 = 340.0;
/// Minimum saturation for a pixel to count as stained.
pub const PURPLE_SAT_MIN: f32 = 50.0 / 255.0;
/// Minimum value (brightness) for a pixel to count as stained.
pub const PURPLE_VAL_MIN: f32 = 50.0 / 255.0;

/// Convert an 8-bit RGB pixel to HSV.
pub fn rgb_to_hsv(pixel: &Rgb<u8>) -> Hsv {
    let srgb = Srgb::new(
        pixel[0] as f32 / 255.0,
        pixel[1] as f32 / 255.0,
        pixel[2] as f32 / 255.0,
    );
    Hsv::from_color(srgb)
}

/// Convert an 8-bit RGB pixel to Lab (D65).
pub fn rgb_to_lab(pixel: &Rgb<u8>) -> Lab {
    let srgb = Srgb::new(
        pixel[0] as f32 / 255.0,
        pixel[1] as f32 / 255.0,
        pixel[2] as f32 / 255.0,
    );
    Lab::from_color(srgb)
}

/// Convert a Lab color back to an 8-bit RGB pixel, clamped to the sRGB gamut.
pub fn lab_to_rgb(lab: Lab) -> Rgb<u8> {
    let srgb = Srgb::from_color(lab);
    Rgb([
        (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    ])
}

/// Check whether a pixel falls inside the purple stain band.
pub fn is_purple(pixel: &Rgb<u8>) -> bool {
    let hsv = rgb_to_hsv(pixel);
    let hue = hsv.hue.into_positive_degrees();
    (PURPLE_HUE_MIN..=PURPLE_HUE_MAX).contains(&hue)
        && hsv.saturation >= PURPLE_SAT_MIN
        && hsv.value >= PURPLE_VAL_MIN
}

/// Build a binary mask of the purple-stained regions of an image.
///
/// Foreground pixels are 255, background pixels are 0.
pub fn purple_mask(image: &RgbImage) -> GrayImage {
    let mut mask = GrayImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        if is_purple(pixel) {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    mask
}

/// Histogram-equalize the Lab lightness channel over the foreground.
///
/// Pure-black pixels are treated as background and keep their value, so an
/// isolated cell on a black canvas gets its contrast stretched without the
/// canvas being washed out. A constant-lightness foreground is returned
/// unchanged.
pub fn equalize_lightness(image: &RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();

    let mut labs: Vec<Lab> = Vec::with_capacity((width * height) as usize);
    let mut histogram = [0u32; 256];
    let mut foreground = 0u32;
    for pixel in image.pixels() {
        let lab = rgb_to_lab(pixel);
        if pixel.0 != [0, 0, 0] {
            histogram[lightness_bin(lab.l)] += 1;
            foreground += 1;
        }
        labs.push(lab);
    }
    if foreground == 0 {
        return image.clone();
    }

    let mut cdf = [0u32; 256];
    let mut running = 0u32;
    for (bin, count) in histogram.iter().enumerate() {
        running += count;
        cdf[bin] = running;
    }
    let cdf_min = cdf
        .iter()
        .copied()
        .find(|&c| c > 0)
        .unwrap_or(0);
    if foreground == cdf_min {
        // Single occupied bin, nothing to equalize.
        return image.clone();
    }
    let denom = (foreground - cdf_min) as f32;

    let mut out = RgbImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0 == [0, 0, 0] {
            continue;
        }
        let idx = (y * width + x) as usize;
        let mut lab = labs[idx];
        let bin = lightness_bin(lab.l);
        lab.l = 100.0 * (cdf[bin] - cdf_min) as f32 / denom;
        out.put_pixel(x, y, lab_to_rgb(lab));
    }
    out
}

/// Map a Lab lightness value (0..100) to a histogram bin (0..255).
fn lightness_bin(l: f32) -> usize {
    (l * 2.55).round().clamp(0.0, 255.0) as usize
}
