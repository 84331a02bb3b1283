// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Kernel taps and buffer conversions shared by the filters.
//
// Linear filters run through `imageproc::filter` on `f32` buffers so results
// can be rounded instead of truncated. The bilateral filter is hand-written
// and indexes its border with reflect-101 (`gfedcb|abcdefgh|gfedcba`).

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use imageproc::definitions::Image;

/// 5-tap binomial smoothing kernel.
pub(crate) const BINOMIAL_5: [f32; 5] = [1.0, 4.0, 6.0, 4.0, 1.0];

/// 5-tap first-derivative kernel paired with [`BINOMIAL_5`] for Sobel.
pub(crate) const DERIVATIVE_5: [f32; 5] = [-1.0, -2.0, 0.0, 2.0, 1.0];

/// Map a possibly out-of-range index onto `0..len` by reflect-101.
pub(crate) fn reflect_101(index: i64, len: usize) -> usize {
    let len = len as i64;
    if len <= 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let wrapped = index.rem_euclid(period);
    if wrapped >= len {
        (period - wrapped) as usize
    } else {
        wrapped as usize
    }
}

/// Widen an 8-bit RGB image to `f32` samples.
pub(crate) fn rgb_to_f32(image: &RgbImage) -> Image<Rgb<f32>> {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        Rgb(image.get_pixel(x, y).0.map(f32::from))
    })
}

/// Widen an 8-bit grayscale image to `f32` samples.
pub(crate) fn gray_to_f32(image: &GrayImage) -> Image<Luma<f32>> {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        Luma([f32::from(image.get_pixel(x, y).0[0])])
    })
}

/// Round and saturate an `f32` RGB image back to 8 bits.
pub(crate) fn rgb_from_f32(image: &Image<Rgb<f32>>) -> RgbImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        Rgb(image.get_pixel(x, y).0.map(|v| saturate_u8(f64::from(v))))
    })
}

/// Round and saturate a filtered value back to 8 bits.
pub(crate) fn saturate_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_101_mirrors_without_repeating_the_edge() {
        // gfedcb|abcdefgh|gfedcba
        assert_eq!(reflect_101(-1, 8), 1);
        assert_eq!(reflect_101(-2, 8), 2);
        assert_eq!(reflect_101(8, 8), 6);
        assert_eq!(reflect_101(9, 8), 5);
        assert_eq!(reflect_101(3, 8), 3);
    }

    #[test]
    fn reflect_101_degenerate_length() {
        assert_eq!(reflect_101(-5, 1), 0);
        assert_eq!(reflect_101(7, 1), 0);
    }

    #[test]
    fn saturate_rounds_and_clamps() {
        assert_eq!(saturate_u8(-3.0), 0);
        assert_eq!(saturate_u8(12.5), 13);
        assert_eq!(saturate_u8(300.0), 255);
    }

    #[test]
    fn f32_conversion_is_lossless_for_8_bit_input() {
        let img = RgbImage::from_fn(4, 3, |x, y| Rgb([x as u8 * 60, y as u8 * 100, 7]));
        assert_eq!(rgb_from_f32(&rgb_to_f32(&img)), img);

        let gray = GrayImage::from_fn(3, 3, |x, y| Luma([(x * 3 + y) as u8 * 20]));
        let widened = gray_to_f32(&gray);
        assert_eq!(widened.get_pixel(2, 1).0[0], 140.0);
    }
}
