// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Denoising: 5x5 Gaussian, 5x5 median and a 9-pixel bilateral filter, each
// with fixed constants. Unrecognised methods pass the image through.

use bildwerk_core::DenoiseMethod;
use image::{Rgb, RgbImage};
use imageproc::filter::{median_filter, separable_filter_equal};
use tracing::{debug, info, instrument, warn};

use super::kernel::{BINOMIAL_5, reflect_101, rgb_from_f32, rgb_to_f32, saturate_u8};

/// Median window radius (5x5 window).
const MEDIAN_RADIUS: u32 = 2;

/// Bilateral neighbourhood diameter.
const BILATERAL_DIAMETER: i64 = 9;
/// Bilateral range sigma, in 8-bit intensity units.
const BILATERAL_SIGMA_COLOR: f64 = 75.0;
/// Bilateral spatial sigma, in pixels.
const BILATERAL_SIGMA_SPACE: f64 = 75.0;

/// Smooth `image` with the selected method.
///
/// Output always has the input's dimensions and channel count.
#[instrument(skip(image), fields(method = %method, width = image.width(), height = image.height()))]
pub fn denoise(image: &RgbImage, method: &DenoiseMethod) -> RgbImage {
    info!("Denoising image");
    match method {
        DenoiseMethod::Gaussian => gaussian_5x5(image),
        DenoiseMethod::Median => median_filter(image, MEDIAN_RADIUS, MEDIAN_RADIUS),
        DenoiseMethod::Bilateral => bilateral(image),
        DenoiseMethod::Unrecognized(label) => {
            warn!(label = %label, "Unknown denoise method; returning input unchanged");
            image.clone()
        }
    }
}

/// Separable 5x5 Gaussian using binomial taps `[1 4 6 4 1] / 16`.
///
/// Filtered in `f32` and rounded, so an impulse keeps its exact binomial
/// weights. Borders are padded by continuity.
fn gaussian_5x5(image: &RgbImage) -> RgbImage {
    let taps = BINOMIAL_5.map(|t| t / 16.0);
    let output = rgb_from_f32(&separable_filter_equal(&rgb_to_f32(image), &taps));
    debug!("Gaussian blur applied");
    output
}

/// Edge-preserving bilateral filter over a circular neighbourhood.
///
/// `imageproc::filter::bilateral_filter` only takes grayscale input, so the
/// colour version is written out here.
///
/// The range distance is the sum of absolute channel differences, so colour
/// edges are preserved as a whole rather than per channel.
fn bilateral(image: &RgbImage) -> RgbImage {
    let (w, h) = image.dimensions();
    let radius = BILATERAL_DIAMETER / 2;
    let space_coeff = -0.5 / (BILATERAL_SIGMA_SPACE * BILATERAL_SIGMA_SPACE);
    let color_coeff = -0.5 / (BILATERAL_SIGMA_COLOR * BILATERAL_SIGMA_COLOR);

    // Circular window: offsets and their spatial weights.
    let window: Vec<(i64, i64, f64)> = (-radius..=radius)
        .flat_map(|dy| (-radius..=radius).map(move |dx| (dx, dy)))
        .filter(|(dx, dy)| dx * dx + dy * dy <= radius * radius)
        .map(|(dx, dy)| (dx, dy, (((dx * dx + dy * dy) as f64) * space_coeff).exp()))
        .collect();

    // Range weights depend only on the integer distance 0..=765.
    let color_weights: Vec<f64> = (0..=3 * 255)
        .map(|d| ((d * d) as f64 * color_coeff).exp())
        .collect();

    let output = RgbImage::from_fn(w, h, |x, y| {
        let centre = image.get_pixel(x, y).0;
        let mut acc = [0f64; 3];
        let mut weight_sum = 0f64;

        for &(dx, dy, space_weight) in &window {
            let nx = reflect_101(x as i64 + dx, w as usize) as u32;
            let ny = reflect_101(y as i64 + dy, h as usize) as u32;
            let neighbour = image.get_pixel(nx, ny).0;

            let distance: usize = (0..3)
                .map(|c| centre[c].abs_diff(neighbour[c]) as usize)
                .sum();
            let weight = space_weight * color_weights[distance];

            for c in 0..3 {
                acc[c] += neighbour[c] as f64 * weight;
            }
            weight_sum += weight;
        }

        // The centre tap always has weight 1, so weight_sum > 0.
        Rgb(acc.map(|v| saturate_u8(v / weight_sum)))
    });
    debug!(taps = window.len(), "Bilateral filter applied");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| {
            let v = ((x * 37 + y * 91) % 256) as u8;
            Rgb([v, v.wrapping_mul(3), 255 - v])
        })
    }

    #[test]
    fn gaussian_keeps_dimensions_and_channels() {
        let img = noisy(17, 11);
        let out = denoise(&img, &DenoiseMethod::Gaussian);
        assert_eq!(out.dimensions(), img.dimensions());
        assert_eq!(out.as_raw().len(), img.as_raw().len());
    }

    #[test]
    fn every_method_keeps_solid_images_unchanged() {
        let solid = RgbImage::from_pixel(12, 12, Rgb([90, 140, 10]));
        for method in [DenoiseMethod::Gaussian, DenoiseMethod::Median, DenoiseMethod::Bilateral] {
            assert_eq!(denoise(&solid, &method), solid, "{method}");
        }
    }

    #[test]
    fn unknown_method_is_identity() {
        let img = noisy(9, 9);
        let method: DenoiseMethod = "unknown-method".parse().unwrap();
        assert_eq!(denoise(&img, &method), img);
    }

    #[test]
    fn median_removes_single_outlier() {
        let mut img = RgbImage::from_pixel(9, 9, Rgb([50, 50, 50]));
        img.put_pixel(4, 4, Rgb([255, 255, 255]));
        let out = denoise(&img, &DenoiseMethod::Median);
        assert_eq!(out.get_pixel(4, 4).0, [50, 50, 50]);
    }

    #[test]
    fn gaussian_spreads_an_impulse() {
        let mut img = RgbImage::from_pixel(9, 9, Rgb([0, 0, 0]));
        img.put_pixel(4, 4, Rgb([255, 255, 255]));
        let out = denoise(&img, &DenoiseMethod::Gaussian);
        // Centre weight is (6/16)^2.
        assert_eq!(out.get_pixel(4, 4).0[0], 36);
        assert!(out.get_pixel(3, 4).0[0] > 0);
        assert_eq!(out.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn gaussian_keeps_a_ramp_and_pads_borders_by_continuity() {
        let img = RgbImage::from_fn(12, 6, |x, _| Rgb([(x * 10) as u8, 100, 0]));
        let out = denoise(&img, &DenoiseMethod::Gaussian);
        // A symmetric kernel leaves a linear ramp untouched away from borders.
        for x in 2..10 {
            assert_eq!(out.get_pixel(x, 3).0[0], (x * 10) as u8, "x = {x}");
        }
        // Left border repeats the first column: (0 + 0 + 0 + 4 * 10 + 20) / 16.
        assert_eq!(out.get_pixel(0, 3).0[0], 4);
        assert_eq!(out.get_pixel(0, 3).0[1], 100);
    }

    #[test]
    fn bilateral_preserves_a_hard_edge_better_than_gaussian() {
        let img = RgbImage::from_fn(20, 20, |x, _| {
            if x < 10 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
        });
        let bilateral = denoise(&img, &DenoiseMethod::Bilateral);
        let gaussian = denoise(&img, &DenoiseMethod::Gaussian);
        let edge_bilateral = bilateral.get_pixel(9, 10).0[0];
        let edge_gaussian = gaussian.get_pixel(9, 10).0[0];
        assert!(edge_bilateral < edge_gaussian, "{edge_bilateral} vs {edge_gaussian}");
    }
}
