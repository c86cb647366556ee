// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Contrast and color enhancement

use image::{Rgb, RgbImage};

/// Fixed contrast enhancement factor for preprocessed smears.
pub const CONTRAST_FACTOR: f32 = 2.0;
/// Fixed color (saturation) enhancement factor for preprocessed smears.
pub const COLOR_FACTOR: f32 = 1.5;

/// ITU-R 601 luma of a pixel, in 0..255.
pub fn luma(pixel: &Rgb<u8>) -> f32 {
    (299.0 * pixel[0] as f32 + 587.0 * pixel[1] as f32 + 114.0 * pixel[2] as f32) / 1000.0
}

/// Force a pure-black background.
///
/// Any pixel whose grayscale value is at most 1 is snapped to (0,0,0), so the
/// masked-out regions of an isolated cell stay exactly black through later
/// enhancement steps.
pub fn blacken_background(image: &RgbImage) -> RgbImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        if luma(pixel).round() as u8 <= 1 {
            *pixel = Rgb([0, 0, 0]);
        }
    }
    out
}

/// Scale contrast around the mean luminance.
///
/// Each channel is interpolated away from a constant gray image at the mean
/// luma: factor 1.0 is the identity, factor 2.0 doubles the distance from the
/// mean.
pub fn enhance_contrast(image: &RgbImage, factor: f32) -> RgbImage {
    let count = (image.width() * image.height()).max(1) as f32;
    let mean = (image.pixels().map(luma).sum::<f32>() / count).round();

    let mut out = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let mut enhanced = [0u8; 3];
        for c in 0..3 {
            enhanced[c] = clamp_u8(mean + (pixel[c] as f32 - mean) * factor);
        }
        out.put_pixel(x, y, Rgb(enhanced));
    }
    out
}

/// Scale color saturation per pixel.
///
/// Each channel is interpolated away from the pixel's own grayscale value:
/// factor 0.0 yields a grayscale image, factor 1.5 deepens the stain colors.
pub fn enhance_color(image: &RgbImage, factor: f32) -> RgbImage {
    let mut out = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let gray = luma(pixel).round();
        let mut enhanced = [0u8; 3];
        for c in 0..3 {
            enhanced[c] = clamp_u8(gray + (pixel[c] as f32 - gray) * factor);
        }
        out.put_pixel(x, y, Rgb(enhanced));
    }
    out
}

fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
