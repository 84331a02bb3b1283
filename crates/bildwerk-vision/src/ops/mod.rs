// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The five workbench operations. Each is a pure function of the source image
// and its parameters.

pub mod binarize;
pub mod color;
pub mod denoise;
pub mod edges;
pub(crate) mod kernel;
pub mod resize;
pub mod segment;

pub use binarize::binarize;
pub use color::{in_range, to_gray, to_hsv};
pub use denoise::denoise;
pub use edges::detect_edges;
pub use resize::resize_area;
pub use segment::segment;
