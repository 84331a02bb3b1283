// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed-threshold binarization.

use image::{GrayImage, Luma, RgbImage};
use tracing::{debug, instrument};

use super::color::to_gray;

/// Convert to gray, then split at `threshold`: values strictly above it
/// become 255, everything else 0.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn binarize(image: &RgbImage, threshold: u8) -> GrayImage {
    let gray = to_gray(image);
    let mut output = GrayImage::new(gray.width(), gray.height());

    for (x, y, pixel) in gray.enumerate_pixels() {
        let binary = if pixel.0[0] > threshold { 255u8 } else { 0u8 };
        output.put_pixel(x, y, Luma([binary]));
    }

    debug!(threshold, "Binarization complete");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn solid_red_falls_below_127() {
        // BT.601 gray of pure red is 76.
        let red = RgbImage::from_pixel(10, 10, Rgb([255, 0, 0]));
        let mask = binarize(&red, 127);
        assert_eq!(mask.dimensions(), (10, 10));
        assert!(mask.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn solid_red_rises_above_75() {
        let red = RgbImage::from_pixel(10, 10, Rgb([255, 0, 0]));
        assert!(binarize(&red, 75).pixels().all(|p| p.0[0] == 255));
        assert!(binarize(&red, 76).pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn every_pixel_is_zero_or_full() {
        let gradient = RgbImage::from_fn(64, 8, |x, y| Rgb([(x * 4) as u8, (y * 30) as u8, 99]));
        for threshold in [0u8, 1, 64, 127, 200, 254, 255] {
            let mask = binarize(&gradient, threshold);
            assert!(mask.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        }
    }

    #[test]
    fn threshold_255_is_all_black() {
        let white = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        assert!(binarize(&white, 255).pixels().all(|p| p.0[0] == 0));
        assert!(binarize(&white, 254).pixels().all(|p| p.0[0] == 255));
    }
}
