// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bildwerk workbench.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Largest hue in the 8-bit HSV convention (hue degrees halved).
pub const HUE_MAX: u8 = 179;

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    Jpeg,
    Png,
}

impl SourceFormat {
    /// Infer the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Extensions offered by the file picker.
    pub const EXTENSIONS: [&'static str; 3] = ["jpg", "jpeg", "png"];
}

/// An `(h, s, v)` bound in the 8-bit HSV convention.
///
/// Hue is in `0..=179` (degrees halved), saturation and value in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HsvTriple {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl HsvTriple {
    /// Build a triple, clamping hue to [`HUE_MAX`].
    pub fn new(h: u8, s: u8, v: u8) -> Self {
        Self {
            h: h.min(HUE_MAX),
            s,
            v,
        }
    }

    /// The lowest possible bound.
    pub const MIN: Self = Self { h: 0, s: 0, v: 0 };

    /// The highest possible bound.
    pub const MAX: Self = Self {
        h: HUE_MAX,
        s: 255,
        v: 255,
    };

    /// Whether `(h, s, v)` lies inside `[lower, upper]` on every channel.
    pub fn contains(lower: &Self, upper: &Self, h: u8, s: u8, v: u8) -> bool {
        (lower.h..=upper.h).contains(&h)
            && (lower.s..=upper.s).contains(&s)
            && (lower.v..=upper.v).contains(&v)
    }
}

/// Smoothing filter selected for the Denoise operation.
///
/// `Unrecognized` carries any label that is not one of the known methods.
/// Denoise treats it as a pass-through rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenoiseMethod {
    Gaussian,
    Median,
    Bilateral,
    Unrecognized(String),
}

impl DenoiseMethod {
    /// Labels offered by the method select, in display order.
    pub const LABELS: [&'static str; 3] = ["Gaussian", "Median", "Bilateral"];

    pub fn label(&self) -> &str {
        match self {
            Self::Gaussian => "Gaussian",
            Self::Median => "Median",
            Self::Bilateral => "Bilateral",
            Self::Unrecognized(label) => label,
        }
    }
}

impl FromStr for DenoiseMethod {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Gaussian" => Self::Gaussian,
            "Median" => Self::Median,
            "Bilateral" => Self::Bilateral,
            other => Self::Unrecognized(other.to_string()),
        })
    }
}

impl fmt::Display for DenoiseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Edge operator selected for the Edge Detect operation.
///
/// `Unrecognized` falls back to the plain grayscale image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeMethod {
    Canny,
    Laplacian,
    SobelX,
    SobelY,
    Unrecognized(String),
}

impl EdgeMethod {
    /// Labels offered by the method select, in display order.
    pub const LABELS: [&'static str; 4] = ["Canny", "Laplacian", "SobelX", "SobelY"];

    pub fn label(&self) -> &str {
        match self {
            Self::Canny => "Canny",
            Self::Laplacian => "Laplacian",
            Self::SobelX => "SobelX",
            Self::SobelY => "SobelY",
            Self::Unrecognized(label) => label,
        }
    }
}

impl FromStr for EdgeMethod {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Canny" => Self::Canny,
            "Laplacian" => Self::Laplacian,
            "SobelX" => Self::SobelX,
            "SobelY" => Self::SobelY,
            other => Self::Unrecognized(other.to_string()),
        })
    }
}

impl fmt::Display for EdgeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
