// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operation results and how they are turned into displayable pixels.

use bildwerk_core::error::BildwerkError;
use image::{DynamicImage, GrayImage, Luma, RgbImage};

use crate::encode;

/// Signed, higher-precision single-channel response (Laplacian, Sobel).
#[derive(Debug, Clone, PartialEq)]
pub struct GradientMap {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

impl GradientMap {
    /// Collect row-major filter output that is known to be `width * height`
    /// long.
    pub(crate) fn from_samples(
        width: u32,
        height: u32,
        samples: impl Iterator<Item = f64>,
    ) -> Self {
        Self {
            width,
            height,
            data: samples.collect(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Sample at `(x, y)`. Panics if out of bounds, like `ImageBuffer::get_pixel`.
    pub fn get(&self, x: u32, y: u32) -> f64 {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.data[(y * self.width + x) as usize]
    }

    pub fn as_raw(&self) -> &[f64] {
        &self.data
    }

    /// Smallest and largest sample, or `None` for an empty map.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Display form: absolute response, rounded and saturated to `0..=255`.
    pub fn to_display(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([self.get(x, y).abs().round().min(255.0) as u8])
        })
    }
}

/// The result of one operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutput {
    /// Three-channel result (Resize, Denoise, Segment).
    Color(RgbImage),
    /// Two-level mask, every pixel 0 or 255 (Binarize, Canny).
    Mask(GrayImage),
    /// Plain grayscale (edge-detect fallback).
    Gray(GrayImage),
    /// Signed edge response (Laplacian, Sobel).
    Gradient(GradientMap),
}

impl OperationOutput {
    /// `(width, height)` of the result.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Color(img) => img.dimensions(),
            Self::Mask(img) | Self::Gray(img) => img.dimensions(),
            Self::Gradient(map) => map.dimensions(),
        }
    }

    /// Number of channels in the result.
    pub fn channels(&self) -> u8 {
        match self {
            Self::Color(_) => 3,
            Self::Mask(_) | Self::Gray(_) | Self::Gradient(_) => 1,
        }
    }

    /// Convert to an 8-bit image suitable for display.
    pub fn to_display(&self) -> DynamicImage {
        match self {
            Self::Color(img) => DynamicImage::ImageRgb8(img.clone()),
            Self::Mask(img) | Self::Gray(img) => DynamicImage::ImageLuma8(img.clone()),
            Self::Gradient(map) => DynamicImage::ImageLuma8(map.to_display()),
        }
    }

    /// Encode the display form as a PNG `data:` URI.
    pub fn to_data_uri(&self) -> Result<String, BildwerkError> {
        encode::png_data_uri(&self.to_display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn gradient_display_takes_abs_and_saturates() {
        let map = GradientMap::from_samples(4, 1, [-10.4, 3.6, 900.0, -900.0].into_iter());
        assert_eq!(map.to_display().as_raw(), &vec![10, 4, 255, 255]);
        assert_eq!(map.min_max(), Some((-900.0, 900.0)));
    }

    #[test]
    fn output_reports_shape() {
        let color = OperationOutput::Color(RgbImage::from_pixel(5, 4, Rgb([1, 2, 3])));
        assert_eq!(color.dimensions(), (5, 4));
        assert_eq!(color.channels(), 3);

        let gradient = OperationOutput::Gradient(GradientMap::from_samples(2, 3, [0.0; 6].into_iter()));
        assert_eq!(gradient.dimensions(), (2, 3));
        assert_eq!(gradient.channels(), 1);
        assert_eq!(gradient.to_display().color(), image::ColorType::L8);
    }

    #[test]
    fn data_uri_is_png() {
        let mask = OperationOutput::Mask(GrayImage::new(2, 2));
        assert!(mask.to_data_uri().unwrap().starts_with("data:image/png;base64,"));
    }
}
