// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Abnormal-cell highlighting
//!
//! When the leukemia classifier reports the abnormal class, the raw image is
//! returned with the purple-stained regions outlined in red so the caller can
//! see which cells drove the call. For the normal class the raw image is
//! passed through untouched.

use image::{Rgb, RgbImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::drawing::draw_filled_circle_mut;

use super::color::purple_mask;

const OUTLINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Stroke radius of the contour outline (radius 1 gives a ~3 px stroke).
const OUTLINE_RADIUS: i32 = 1;

/// Outline purple-stained cells in red when the prediction is abnormal.
pub fn highlight_abnormal_cells(image: &RgbImage, abnormal: bool) -> RgbImage {
    if !abnormal {
        return image.clone();
    }

    let mask = purple_mask(image);
    let contours = find_contours::<u32>(&mask);

    let mut out = image.clone();
    for contour in contours.iter().filter(|c| c.border_type == BorderType::Outer) {
        for point in &contour.points {
            draw_filled_circle_mut(
                &mut out,
                (point.x as i32, point.y as i32),
                OUTLINE_RADIUS,
                OUTLINE_COLOR,
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAIN_PURPLE: Rgb<u8> = Rgb([150, 50, 200]);

    fn smear_with_cell() -> RgbImage {
        let mut image = RgbImage::from_pixel(64, 64, Rgb([230, 230, 230]));
        for y in 20..40 {
            for x in 20..40 {
                image.put_pixel(x, y, STAIN_PURPLE);
            }
        }
        image
    }

    #[test]
    fn test_normal_prediction_leaves_image_untouched() {
        let image = smear_with_cell();
        assert_eq!(highlight_abnormal_cells(&image, false), image);
    }

    #[test]
    fn test_abnormal_prediction_draws_red_outline() {
        let image = smear_with_cell();
        let highlighted = highlight_abnormal_cells(&image, true);

        assert_eq!(highlighted.dimensions(), image.dimensions());
        let red_pixels = highlighted
            .pixels()
            .filter(|p| p.0 == [255, 0, 0])
            .count();
        assert!(red_pixels > 0, "expected a red outline to be drawn");
    }

    #[test]
    fn test_abnormal_without_purple_draws_nothing() {
        let image = RgbImage::from_pixel(32, 32, Rgb([230, 230, 230]));
        assert_eq!(highlight_abnormal_cells(&image, true), image);
    }

    #[test]
    fn test_outline_sits_near_cell_boundary() {
        let image = smear_with_cell();
        let highlighted = highlight_abnormal_cells(&image, true);
        // Far corners are untouched
        assert_eq!(highlighted.get_pixel(0, 0).0, [230, 230, 230]);
        assert_eq!(highlighted.get_pixel(63, 63).0, [230, 230, 230]);
    }
}
