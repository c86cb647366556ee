// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Purple-cell isolation
//!
//! Isolates the largest stained cell in a smear image: mask the purple band,
//! clean the mask with a morphological close/open pass, keep the largest
//! external contour and black out everything else.

use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::distance_transform::Norm;
use imageproc::drawing::draw_polygon_mut;
use imageproc::morphology::{close, open};
use imageproc::point::Point;

use super::color::{equalize_lightness, purple_mask};

/// Radius of the square structuring element used to clean the stain mask
/// (radius 2 under the L-inf norm is a 5x5 kernel).
const MORPH_RADIUS: u8 = 2;

/// Isolate the largest purple-stained cell on a black canvas.
///
/// Returns the input unchanged when no usable purple region is found.
pub fn isolate_largest_purple_cell(image: &RgbImage) -> RgbImage {
    let mask = purple_mask(image);
    let mask = close(&mask, Norm::LInf, MORPH_RADIUS);
    let mask = open(&mask, Norm::LInf, MORPH_RADIUS);

    let contours = find_contours::<u32>(&mask);
    let largest = contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .max_by(|a, b| contour_area(a).total_cmp(&contour_area(b)));

    let Some(largest) = largest else {
        return image.clone();
    };
    if largest.points.len() < 3 || contour_area(largest) <= 0.0 {
        return image.clone();
    }

    let cell_mask = fill_contour(largest, image.width(), image.height());
    let isolated = apply_mask(image, &cell_mask);
    equalize_lightness(&isolated)
}

/// Contour area via the shoelace formula.
pub fn contour_area(contour: &Contour<u32>) -> f32 {
    let points = &contour.points;
    if points.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0f32;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        area += points[i].x as f32 * points[j].y as f32;
        area -= points[j].x as f32 * points[i].y as f32;
    }
    area.abs() / 2.0
}

/// Rasterize a contour into a filled binary mask.
fn fill_contour(contour: &Contour<u32>, width: u32, height: u32) -> GrayImage {
    let mut points: Vec<Point<i32>> = contour
        .points
        .iter()
        .map(|p| Point::new(p.x as i32, p.y as i32))
        .collect();
    // draw_polygon_mut rejects a closing point equal to the first
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    let mut mask = GrayImage::new(width, height);
    if points.len() >= 3 {
        draw_polygon_mut(&mut mask, &points, Luma([255]));
    }
    mask
}

/// Keep pixels where the mask is set, black out the rest.
fn apply_mask(image: &RgbImage, mask: &GrayImage) -> RgbImage {
    let mut out = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        if mask.get_pixel(x, y)[0] != 0 {
            out.put_pixel(x, y, *pixel);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const STAIN_PURPLE: Rgb<u8> = Rgb([150, 50, 200]);

    fn draw_square(image: &mut RgbImage, x0: u32, y0: u32, side: u32, color: Rgb<u8>) {
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                image.put_pixel(x, y, color);
            }
        }
    }

    #[test]
    fn test_no_purple_returns_input_unchanged() {
        let image = RgbImage::from_pixel(32, 32, Rgb([255, 255, 255]));
        assert_eq!(isolate_largest_purple_cell(&image), image);
    }

    #[test]
    fn test_largest_cell_survives_smaller_one_removed() {
        let mut image = RgbImage::from_pixel(128, 128, Rgb([240, 240, 240]));
        draw_square(&mut image, 10, 10, 40, STAIN_PURPLE);
        draw_square(&mut image, 90, 90, 12, STAIN_PURPLE);

        let isolated = isolate_largest_purple_cell(&image);

        // Center of the large cell is kept
        assert_ne!(isolated.get_pixel(30, 30).0, [0, 0, 0]);
        // The small cell and the white background are blacked out
        assert_eq!(isolated.get_pixel(96, 96).0, [0, 0, 0]);
        assert_eq!(isolated.get_pixel(70, 30).0, [0, 0, 0]);
    }

    #[test]
    fn test_isolated_image_keeps_dimensions() {
        let mut image = RgbImage::from_pixel(64, 48, Rgb([255, 255, 255]));
        draw_square(&mut image, 20, 10, 20, STAIN_PURPLE);
        let isolated = isolate_largest_purple_cell(&image);
        assert_eq!(isolated.dimensions(), (64, 48));
    }

    #[test]
    fn test_contour_area_square() {
        let contour = Contour {
            points: vec![
                imageproc::point::Point::new(0u32, 0u32),
                imageproc::point::Point::new(10, 0),
                imageproc::point::Point::new(10, 10),
                imageproc::point::Point::new(0, 10),
            ],
            border_type: BorderType::Outer,
            parent: None,
        };
        assert_eq!(contour_area(&contour), 100.0);
    }

    #[test]
    fn test_contour_area_degenerate() {
        let contour = Contour {
            points: vec![
                imageproc::point::Point::new(0u32, 0u32),
                imageproc::point::Point::new(5, 5),
            ],
            border_type: BorderType::Outer,
            parent: None,
        };
        assert_eq!(contour_area(&contour), 0.0);
    }
}
