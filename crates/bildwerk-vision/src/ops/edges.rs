// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge detection: Canny (thresholds 100/200), 3x3 Laplacian and 5x5 Sobel
// in x or y. Laplacian and Sobel keep their signed `f64` response.

use bildwerk_core::EdgeMethod;
use image::{GrayImage, RgbImage};
use imageproc::edges::canny;
use imageproc::filter::{laplacian_filter, separable_filter};
use tracing::{debug, info, instrument, warn};

use super::color::to_gray;
use super::kernel::{BINOMIAL_5, DERIVATIVE_5, gray_to_f32};
use crate::output::{GradientMap, OperationOutput};

const CANNY_LOW: f32 = 100.0;
const CANNY_HIGH: f32 = 200.0;

/// Direction of a Sobel derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Run the selected edge operator on the grayscale version of `image`.
///
/// Unrecognised methods return the grayscale image itself.
#[instrument(skip(image), fields(method = %method, width = image.width(), height = image.height()))]
pub fn detect_edges(image: &RgbImage, method: &EdgeMethod) -> OperationOutput {
    info!("Detecting edges");
    let gray = to_gray(image);
    match method {
        EdgeMethod::Canny => OperationOutput::Mask(canny(&gray, CANNY_LOW, CANNY_HIGH)),
        EdgeMethod::Laplacian => OperationOutput::Gradient(laplacian(&gray)),
        EdgeMethod::SobelX => OperationOutput::Gradient(sobel_5x5(&gray, Axis::X)),
        EdgeMethod::SobelY => OperationOutput::Gradient(sobel_5x5(&gray, Axis::Y)),
        EdgeMethod::Unrecognized(label) => {
            warn!(label = %label, "Unknown edge method; returning grayscale input");
            OperationOutput::Gray(gray)
        }
    }
}

/// 4-neighbour Laplacian `[0 1 0; 1 -4 1; 0 1 0]`. The `i16` response is
/// exact for 8-bit input.
fn laplacian(gray: &GrayImage) -> GradientMap {
    let response = laplacian_filter(gray);
    let map = GradientMap::from_samples(
        gray.width(),
        gray.height(),
        response.as_raw().iter().map(|&v| f64::from(v)),
    );
    debug!(range = ?map.min_max(), "Laplacian computed");
    map
}

fn sobel_5x5(gray: &GrayImage, axis: Axis) -> GradientMap {
    let (kx, ky) = match axis {
        Axis::X => (&DERIVATIVE_5, &BINOMIAL_5),
        Axis::Y => (&BINOMIAL_5, &DERIVATIVE_5),
    };
    let response = separable_filter(&gray_to_f32(gray), kx, ky);
    let map = GradientMap::from_samples(
        gray.width(),
        gray.height(),
        response.as_raw().iter().map(|&v| f64::from(v)),
    );
    debug!(?axis, range = ?map.min_max(), "Sobel computed");
    map
}
