// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image-to-tensor preprocessing for the classifiers

use image::imageops::{self, FilterType};
use image::RgbImage;
use ndarray::Array4;

/// Input side length expected by both classifiers
pub const CLASSIFIER_INPUT_SIZE: u32 = 224;

/// Mean values for normalization (ImageNet)
pub const MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// Std values for normalization (ImageNet)
pub const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Preprocess an image for a classifier forward pass
///
/// Steps:
/// 1. Resize to 224x224
/// 2. Normalize with ImageNet mean/std: (pixel/255 - mean) / std
/// 3. Convert to NCHW tensor format [1, 3, 224, 224]
pub fn to_input_tensor(image: &RgbImage) -> Array4<f32> {
    let size = CLASSIFIER_INPUT_SIZE;
    let resized = imageops::resize(image, size, size, FilterType::Lanczos3);

    let mut tensor = Array4::zeros((1, 3, size as usize, size as usize));
    for y in 0..size as usize {
        for x in 0..size as usize {
            let pixel = resized.get_pixel(x as u32, y as u32);
            for c in 0..3 {
                let normalized = (pixel[c] as f32 / 255.0 - MEAN[c]) / STD[c];
                tensor[[0, c, y, x]] = normalized;
            }
        }
    }

    tensor
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_tensor_shape() {
        let image = RgbImage::new(100, 80);
        let tensor = to_input_tensor(&image);
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn test_tensor_shape_large_input() {
        let image = RgbImage::new(1024, 768);
        let tensor = to_input_tensor(&image);
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn test_white_pixel_normalization() {
        let image = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        let tensor = to_input_tensor(&image);

        // White normalizes to (1.0 - mean) / std per channel
        for c in 0..3 {
            let expected = (1.0 - MEAN[c]) / STD[c];
            let got = tensor[[0, c, 100, 100]];
            assert!(
                (got - expected).abs() < 1e-4,
                "channel {}: {} vs {}",
                c,
                got,
                expected
            );
        }
    }

    #[test]
    fn test_black_pixel_normalization() {
        let image = RgbImage::new(10, 10);
        let tensor = to_input_tensor(&image);
        for c in 0..3 {
            let expected = -MEAN[c] / STD[c];
            assert!((tensor[[0, c, 0, 0]] - expected).abs() < 1e-4);
        }
    }
}
