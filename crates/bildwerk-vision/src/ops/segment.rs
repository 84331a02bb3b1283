// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Color-range segmentation in HSV space.

use bildwerk_core::HsvTriple;
use image::{Rgb, RgbImage};
use tracing::{debug, instrument};

use super::color::{in_range, to_hsv};

/// Keep pixels whose HSV value lies inside `[lower, upper]`; zero the rest.
///
/// No morphological cleanup is applied to the mask. An inverted range
/// (`lower > upper` on any channel) selects nothing.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn segment(image: &RgbImage, lower: &HsvTriple, upper: &HsvTriple) -> RgbImage {
    let mask = in_range(&to_hsv(image), lower, upper);

    let output = RgbImage::from_fn(image.width(), image.height(), |x, y| {
        if mask.get_pixel(x, y).0[0] == 255 {
            *image.get_pixel(x, y)
        } else {
            Rgb([0, 0, 0])
        }
    });

    let kept = mask.pixels().filter(|p| p.0[0] == 255).count();
    debug!(kept, total = mask.len(), "Segmentation complete");
    output
}
