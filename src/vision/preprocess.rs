// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Medical preprocessing pipeline
//!
//! The full preprocessing sequence applied before the leukemia classifier
//! sees an image, plus the side-by-side preview composition served by the
//! `/preview` endpoint.

use image::imageops::{self, FilterType};
use image::RgbImage;

use super::color::equalize_lightness;
use super::enhance::{blacken_background, enhance_color, enhance_contrast, COLOR_FACTOR, CONTRAST_FACTOR};
use super::segment::isolate_largest_purple_cell;

/// Side length of each preview tile.
pub const PREVIEW_TILE: u32 = 256;

/// Run the full medical preprocessing sequence on a smear image.
///
/// Steps:
/// 1. Isolate the largest purple-stained cell on a black canvas.
/// 2. Snap near-black pixels to pure black.
/// 3. Equalize the Lab lightness of the remaining cell.
/// 4. Contrast enhancement (fixed factor 2.0).
/// 5. Color enhancement (fixed factor 1.5).
pub fn preprocess(image: &RgbImage) -> RgbImage {
    let image = isolate_largest_purple_cell(image);
    let image = blacken_background(&image);
    let image = equalize_lightness(&image);
    let image = enhance_contrast(&image, CONTRAST_FACTOR);
    enhance_color(&image, COLOR_FACTOR)
}

/// Compose the raw and preprocessed images into one 512x256 comparison.
///
/// Left half is the original resized to 256x256, right half the preprocessed
/// equivalent.
pub fn compose_preview(original: &RgbImage, processed: &RgbImage) -> RgbImage {
    let left = imageops::resize(original, PREVIEW_TILE, PREVIEW_TILE, FilterType::Lanczos3);
    let right = imageops::resize(processed, PREVIEW_TILE, PREVIEW_TILE, FilterType::Lanczos3);

    let mut canvas = RgbImage::new(PREVIEW_TILE * 2, PREVIEW_TILE);
    imageops::replace(&mut canvas, &left, 0, 0);
    imageops::replace(&mut canvas, &right, PREVIEW_TILE as i64, 0);
    canvas
}
