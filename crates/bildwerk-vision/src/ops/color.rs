// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Color conversions: BT.601 grayscale and 8-bit HSV, plus the inclusive HSV
// range mask used by segmentation.

use bildwerk_core::HsvTriple;
use image::{GrayImage, Luma, Rgb, RgbImage};

// BT.601 luma weights in 14-bit fixed point: 0.299, 0.587, 0.114.
const GRAY_R: u32 = 4899;
const GRAY_G: u32 = 9617;
const GRAY_B: u32 = 1868;
const GRAY_SHIFT: u32 = 14;

/// Gray value of one RGB pixel, `Y = 0.299 R + 0.587 G + 0.114 B`, rounded.
pub fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    let acc = r as u32 * GRAY_R + g as u32 * GRAY_G + b as u32 * GRAY_B;
    ((acc + (1 << (GRAY_SHIFT - 1))) >> GRAY_SHIFT) as u8
}

/// Convert an RGB image to single-channel gray.
pub fn to_gray(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgb([r, g, b]) = *image.get_pixel(x, y);
        Luma([luma_601(r, g, b)])
    })
}

/// Convert one RGB pixel to `[h, s, v]` with hue halved into `0..=179`.
pub fn rgb_to_hsv8(r: u8, g: u8, b: u8) -> [u8; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = (max - min) as f32;

    let s = if max == 0 {
        0
    } else {
        (255.0 * delta / max as f32).round() as u8
    };

    if delta == 0.0 {
        return [0, s, max];
    }

    let (r, g, b) = (r as f32, g as f32, b as f32);
    let mut hue = if max as f32 == r {
        60.0 * (g - b) / delta
    } else if max as f32 == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    // Halving can round 359.x up to 180, which is hue 0 again.
    let h = (hue / 2.0).round() as u16 % 180;
    [h as u8, s, max]
}

/// Convert an RGB image to HSV, packed into the three channels of an `RgbImage`.
pub fn to_hsv(image: &RgbImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgb([r, g, b]) = *image.get_pixel(x, y);
        Rgb(rgb_to_hsv8(r, g, b))
    })
}

/// 255 where the HSV pixel lies inside `[lower, upper]` on every channel, else 0.
pub fn in_range(hsv: &RgbImage, lower: &HsvTriple, upper: &HsvTriple) -> GrayImage {
    GrayImage::from_fn(hsv.width(), hsv.height(), |x, y| {
        let Rgb([h, s, v]) = *hsv.get_pixel(x, y);
        if HsvTriple::contains(lower, upper, h, s, v) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_of_primaries() {
        assert_eq!(luma_601(255, 0, 0), 76);
        assert_eq!(luma_601(0, 255, 0), 150);
        assert_eq!(luma_601(0, 0, 255), 29);
        assert_eq!(luma_601(255, 255, 255), 255);
        assert_eq!(luma_601(0, 0, 0), 0);
    }

    #[test]
    fn gray_keeps_dimensions() {
        let img = RgbImage::from_pixel(7, 3, Rgb([1, 2, 3]));
        let gray = to_gray(&img);
        assert_eq!(gray.dimensions(), (7, 3));
    }

    #[test]
    fn hsv_of_primaries() {
        assert_eq!(rgb_to_hsv8(255, 0, 0), [0, 255, 255]);
        assert_eq!(rgb_to_hsv8(0, 255, 0), [60, 255, 255]);
        assert_eq!(rgb_to_hsv8(0, 0, 255), [120, 255, 255]);
        assert_eq!(rgb_to_hsv8(255, 255, 0), [30, 255, 255]);
    }

    #[test]
    fn hsv_of_grays_has_no_hue_or_saturation() {
        assert_eq!(rgb_to_hsv8(0, 0, 0), [0, 0, 0]);
        assert_eq!(rgb_to_hsv8(128, 128, 128), [0, 0, 128]);
    }

    #[test]
    fn hue_near_full_circle_wraps_to_zero() {
        // Hue just below 360 degrees.
        let [h, _, _] = rgb_to_hsv8(255, 0, 1);
        assert!(h == 0 || h == 179, "hue was {h}");
        assert!(h <= 179);
    }

    #[test]
    fn in_range_marks_inclusive_band() {
        let mut hsv = RgbImage::new(3, 1);
        hsv.put_pixel(0, 0, Rgb([10, 100, 100]));
        hsv.put_pixel(1, 0, Rgb([20, 100, 100]));
        hsv.put_pixel(2, 0, Rgb([21, 100, 100]));
        let mask = in_range(&hsv, &HsvTriple::new(10, 0, 0), &HsvTriple::new(20, 255, 255));
        assert_eq!(mask.as_raw(), &vec![255, 255, 0]);
    }
}
