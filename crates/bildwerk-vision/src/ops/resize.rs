// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Area-based resize.
//
// Shrinking averages every source pixel a destination pixel covers, weighted
// by the covered fraction. Enlarging an axis falls back to linear
// interpolation between pixel centres. Both axes are handled independently,
// so aspect ratio is never enforced.

use image::{Rgb, RgbImage};
use tracing::{debug, info, instrument};

/// Contribution of one source index to one destination index.
type Taps = Vec<(usize, f32)>;

/// Resize `image` to exactly `width` x `height` using area interpolation.
///
/// Zero targets are raised to 1. Resizing to the current dimensions returns
/// an identical copy.
#[instrument(skip(image), fields(from_w = image.width(), from_h = image.height()))]
pub fn resize_area(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (width, height) = (width.max(1), height.max(1));
    let (src_w, src_h) = image.dimensions();
    info!(width, height, "Resizing image");

    if src_w == 0 || src_h == 0 {
        return RgbImage::new(width, height);
    }
    if (src_w, src_h) == (width, height) {
        return image.clone();
    }

    let x_taps = axis_taps(src_w as usize, width as usize);
    let y_taps = axis_taps(src_h as usize, height as usize);

    // Horizontal pass: src_h rows of `width` pixels.
    let dst_w = width as usize;
    let mut rows = vec![[0f32; 3]; dst_w * src_h as usize];
    for y in 0..src_h {
        for (dx, taps) in x_taps.iter().enumerate() {
            let mut acc = [0f32; 3];
            for &(sx, weight) in taps {
                let Rgb(px) = *image.get_pixel(sx as u32, y);
                for c in 0..3 {
                    acc[c] += px[c] as f32 * weight;
                }
            }
            rows[y as usize * dst_w + dx] = acc;
        }
    }

    // Vertical pass.
    let output = RgbImage::from_fn(width, height, |dx, dy| {
        let mut acc = [0f32; 3];
        for &(sy, weight) in &y_taps[dy as usize] {
            let row = rows[sy * dst_w + dx as usize];
            for c in 0..3 {
                acc[c] += row[c] * weight;
            }
        }
        Rgb(acc.map(|v| v.round().clamp(0.0, 255.0) as u8))
    });

    debug!(new_w = output.width(), new_h = output.height(), "Resize complete");
    output
}

/// Per destination index, the source indices and weights that contribute.
fn axis_taps(src_len: usize, dst_len: usize) -> Vec<Taps> {
    if dst_len <= src_len {
        area_taps(src_len, dst_len)
    } else {
        linear_taps(src_len, dst_len)
    }
}

/// Coverage weights for shrinking (or keeping) an axis.
fn area_taps(src_len: usize, dst_len: usize) -> Vec<Taps> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = ((d + 1) as f64 * scale).min(src_len as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len);
            (first..last)
                .filter_map(|s| {
                    let covered = end.min((s + 1) as f64) - start.max(s as f64);
                    (covered > 1e-9).then(|| (s, (covered / scale) as f32))
                })
                .collect()
        })
        .collect()
}

/// Centre-aligned linear weights for enlarging an axis.
fn linear_taps(src_len: usize, dst_len: usize) -> Vec<Taps> {
    let scale = src_len as f64 / dst_len as f64;
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let centre = ((d as f64 + 0.5) * scale - 0.5).clamp(0.0, last as f64);
            let left = centre.floor() as usize;
            let right = (left + 1).min(last);
            let frac = (centre - left as f64) as f32;
            if right == left || frac == 0.0 {
                vec![(left, 1.0)]
            } else {
                vec![(left, 1.0 - frac), (right, frac)]
            }
        })
        .collect()
}
