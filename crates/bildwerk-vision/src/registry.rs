// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operation registry: the fixed, ordered menu of operations, their parameter
// descriptors, and dispatch from parameter values to the operation functions.
//
// Parameter values arriving from widgets are clamped into their declared
// domain rather than rejected. Choice values outside the known options are
// kept and handled by each operation's fallback branch.

use bildwerk_core::config::RESIZE_DIMENSION_CEILING;
use bildwerk_core::error::BildwerkError;
use bildwerk_core::{DenoiseMethod, EdgeMethod, HUE_MAX, HsvTriple};
use image::RgbImage;
use tracing::{debug, instrument};

use crate::ops;
use crate::output::OperationOutput;

/// The operations offered by the workbench, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    Binarize,
    Resize,
    Denoise,
    EdgeDetect,
    Segment,
}

impl OperationKind {
    /// Every operation, in registry order.
    pub const ALL: [Self; 5] = [
        Self::Binarize,
        Self::Resize,
        Self::Denoise,
        Self::EdgeDetect,
        Self::Segment,
    ];

    /// Stable operation name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Binarize => "Binarize",
            Self::Resize => "Resize",
            Self::Denoise => "Denoise",
            Self::EdgeDetect => "Edge Detect",
            Self::Segment => "Segment",
        }
    }

    /// Sidebar checkbox label.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Self::Binarize => "Binarize Image",
            Self::Resize => "Resize Image",
            Self::Denoise => "Denoise Image",
            Self::EdgeDetect => "Edge Detection",
            Self::Segment => "Segment Object",
        }
    }

    /// Caption shown under the rendered result.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Binarize => "Binarized Image",
            Self::Resize => "Resized Image",
            Self::Denoise => "Denoised Image",
            Self::EdgeDetect => "Edge Detected Image",
            Self::Segment => "Segmented Image",
        }
    }

    /// Ordered parameter descriptors.
    pub fn params(&self) -> &'static [ParamSpec] {
        match self {
            Self::Binarize => &BINARIZE_PARAMS,
            Self::Resize => &RESIZE_PARAMS,
            Self::Denoise => &DENOISE_PARAMS,
            Self::EdgeDetect => &EDGE_PARAMS,
            Self::Segment => &SEGMENT_PARAMS,
        }
    }

    /// Default parameter values for a source of the given `(width, height)`.
    pub fn default_values(&self, source_dims: (u32, u32)) -> Vec<ParamValue> {
        self.params()
            .iter()
            .map(|spec| spec.default_value(source_dims))
            .collect()
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// -- Parameter descriptors ----------------------------------------------------

/// Which widget edits a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Slider,
    NumberInput,
    Select,
}

/// Default for an integer parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntDefault {
    Fixed(i64),
    /// The source image's width.
    SourceWidth,
    /// The source image's height.
    SourceHeight,
}

/// Closed domain of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDomain {
    Integer {
        min: i64,
        max: i64,
        default: IntDefault,
    },
    Choice {
        options: &'static [&'static str],
        default: &'static str,
    },
}

/// Descriptor of one operation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    pub domain: ParamDomain,
}

impl ParamSpec {
    const fn slider(name: &'static str, label: &'static str, min: i64, max: i64, default: i64) -> Self {
        Self {
            name,
            label,
            widget: Widget::Slider,
            domain: ParamDomain::Integer {
                min,
                max,
                default: IntDefault::Fixed(default),
            },
        }
    }

    const fn dimension(name: &'static str, label: &'static str, default: IntDefault) -> Self {
        Self {
            name,
            label,
            widget: Widget::NumberInput,
            domain: ParamDomain::Integer {
                min: 1,
                max: RESIZE_DIMENSION_CEILING as i64,
                default,
            },
        }
    }

    const fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            widget: Widget::Select,
            domain: ParamDomain::Choice { options, default },
        }
    }

    /// Default value for a source of the given `(width, height)`.
    pub fn default_value(&self, (width, height): (u32, u32)) -> ParamValue {
        match self.domain {
            ParamDomain::Integer { min, max, default } => {
                let raw = match default {
                    IntDefault::Fixed(v) => v,
                    IntDefault::SourceWidth => width as i64,
                    IntDefault::SourceHeight => height as i64,
                };
                ParamValue::Integer(raw.clamp(min, max))
            }
            ParamDomain::Choice { default, .. } => ParamValue::Choice(default.to_string()),
        }
    }

    /// Bring `value` into this parameter's domain.
    ///
    /// Integers are clamped. Choices are kept verbatim even when they are not
    /// one of the listed options. A value of the wrong kind is an error.
    pub fn normalize(&self, value: &ParamValue) -> Result<ParamValue, BildwerkError> {
        match (&self.domain, value) {
            (ParamDomain::Integer { min, max, .. }, ParamValue::Integer(v)) => {
                Ok(ParamValue::Integer((*v).clamp(*min, *max)))
            }
            (ParamDomain::Choice { .. }, ParamValue::Choice(label)) => {
                Ok(ParamValue::Choice(label.clone()))
            }
            _ => Err(BildwerkError::InvalidParameters(format!(
                "{} expects {}, got {:?}",
                self.name,
                self.domain.kind_name(),
                value
            ))),
        }
    }
}

impl ParamDomain {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer { .. } => "an integer",
            Self::Choice { .. } => "a choice",
        }
    }
}

static BINARIZE_PARAMS: [ParamSpec; 1] = [ParamSpec::slider("threshold", "Threshold", 0, 255, 127)];

static RESIZE_PARAMS: [ParamSpec; 2] = [
    ParamSpec::dimension("width", "Width", IntDefault::SourceWidth),
    ParamSpec::dimension("height", "Height", IntDefault::SourceHeight),
];

static DENOISE_PARAMS: [ParamSpec; 1] = [ParamSpec::select(
    "method",
    "Denoise Method",
    &DenoiseMethod::LABELS,
    "Gaussian",
)];

static EDGE_PARAMS: [ParamSpec; 1] = [ParamSpec::select(
    "method",
    "Edge Detection Method",
    &EdgeMethod::LABELS,
    "Canny",
)];

const HUE: i64 = HUE_MAX as i64;

static SEGMENT_PARAMS: [ParamSpec; 6] = [
    ParamSpec::slider("lower_hue", "Lower Hue", 0, HUE, 0),
    ParamSpec::slider("lower_saturation", "Lower Saturation", 0, 255, 0),
    ParamSpec::slider("lower_value", "Lower Value", 0, 255, 0),
    ParamSpec::slider("upper_hue", "Upper Hue", 0, HUE, HUE),
    ParamSpec::slider("upper_saturation", "Upper Saturation", 0, 255, 255),
    ParamSpec::slider("upper_value", "Upper Value", 0, 255, 255),
];

// -- Parameter values ---------------------------------------------------------

/// A widget value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Integer(i64),
    Choice(String),
}

impl ParamValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Choice(_) => None,
        }
    }

    pub fn as_choice(&self) -> Option<&str> {
        match self {
            Self::Integer(_) => None,
            Self::Choice(label) => Some(label),
        }
    }
}

/// Typed parameters for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationParams {
    Binarize { threshold: u8 },
    Resize { width: u32, height: u32 },
    Denoise { method: DenoiseMethod },
    EdgeDetect { method: EdgeMethod },
    Segment { lower: HsvTriple, upper: HsvTriple },
}

impl OperationParams {
    /// Build typed parameters from ordered widget values.
    ///
    /// Values are normalized against the operation's descriptors first, so
    /// out-of-range numbers are clamped. Fails only when the number of
    /// values or a value's kind does not match the descriptors.
    pub fn from_values(kind: OperationKind, values: &[ParamValue]) -> Result<Self, BildwerkError> {
        let specs = kind.params();
        if values.len() != specs.len() {
            return Err(BildwerkError::InvalidParameters(format!(
                "{} takes {} parameter(s), got {}",
                kind,
                specs.len(),
                values.len()
            )));
        }

        let normalized = specs
            .iter()
            .zip(values)
            .map(|(spec, value)| spec.normalize(value))
            .collect::<Result<Vec<_>, _>>()?;
        let int = |i: usize| normalized[i].as_integer().unwrap_or_default();
        let choice = |i: usize| normalized[i].as_choice().unwrap_or_default();

        let params = match kind {
            OperationKind::Binarize => Self::Binarize {
                threshold: int(0) as u8,
            },
            OperationKind::Resize => Self::Resize {
                width: int(0) as u32,
                height: int(1) as u32,
            },
            OperationKind::Denoise => Self::Denoise {
                method: parse_choice(choice(0)),
            },
            OperationKind::EdgeDetect => Self::EdgeDetect {
                method: parse_choice(choice(0)),
            },
            OperationKind::Segment => Self::Segment {
                lower: HsvTriple::new(int(0) as u8, int(1) as u8, int(2) as u8),
                upper: HsvTriple::new(int(3) as u8, int(4) as u8, int(5) as u8),
            },
        };
        debug!(?params, "Parameters built");
        Ok(params)
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Binarize { .. } => OperationKind::Binarize,
            Self::Resize { .. } => OperationKind::Resize,
            Self::Denoise { .. } => OperationKind::Denoise,
            Self::EdgeDetect { .. } => OperationKind::EdgeDetect,
            Self::Segment { .. } => OperationKind::Segment,
        }
    }

    /// Run the operation on `image`. Pure: `image` is never modified.
    #[instrument(skip(self, image), fields(operation = %self.kind()))]
    pub fn apply(&self, image: &RgbImage) -> OperationOutput {
        match self {
            Self::Binarize { threshold } => OperationOutput::Mask(ops::binarize(image, *threshold)),
            Self::Resize { width, height } => {
                OperationOutput::Color(ops::resize_area(image, *width, *height))
            }
            Self::Denoise { method } => OperationOutput::Color(ops::denoise(image, method)),
            Self::EdgeDetect { method } => ops::detect_edges(image, method),
            Self::Segment { lower, upper } => {
                OperationOutput::Color(ops::segment(image, lower, upper))
            }
        }
    }
}

fn parse_choice<T: std::str::FromStr<Err = std::convert::Infallible>>(label: &str) -> T {
    match label.parse() {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn registry_order_is_fixed() {
        let names: Vec<_> = OperationKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names, ["Binarize", "Resize", "Denoise", "Edge Detect", "Segment"]);
        let mut sorted = OperationKind::ALL;
        sorted.sort();
        assert_eq!(sorted, OperationKind::ALL);
    }

    #[test]
    fn defaults_match_the_widget_contract() {
        let dims = (640, 480);
        assert_eq!(
            OperationKind::Binarize.default_values(dims),
            vec![ParamValue::Integer(127)]
        );
        assert_eq!(
            OperationKind::Resize.default_values(dims),
            vec![ParamValue::Integer(640), ParamValue::Integer(480)]
        );
        assert_eq!(
            OperationKind::Denoise.default_values(dims),
            vec![ParamValue::Choice("Gaussian".into())]
        );
        assert_eq!(
            OperationKind::EdgeDetect.default_values(dims),
            vec![ParamValue::Choice("Canny".into())]
        );
        let segment = OperationParams::from_values(
            OperationKind::Segment,
            &OperationKind::Segment.default_values(dims),
        )
        .unwrap();
        assert_eq!(
            segment,
            OperationParams::Segment {
                lower: HsvTriple::MIN,
                upper: HsvTriple::MAX
            }
        );
    }

    #[test]
    fn every_kind_builds_from_its_defaults() {
        for kind in OperationKind::ALL {
            let params = OperationParams::from_values(kind, &kind.default_values((32, 16))).unwrap();
            assert_eq!(params.kind(), kind);
        }
    }

    #[test]
    fn out_of_range_numbers_are_clamped() {
        let params =
            OperationParams::from_values(OperationKind::Binarize, &[ParamValue::Integer(999)]).unwrap();
        assert_eq!(params, OperationParams::Binarize { threshold: 255 });

        let params = OperationParams::from_values(
            OperationKind::Resize,
            &[ParamValue::Integer(0), ParamValue::Integer(-4)],
        )
        .unwrap();
        assert_eq!(params, OperationParams::Resize { width: 1, height: 1 });

        let params = OperationParams::from_values(
            OperationKind::Segment,
            &[
                ParamValue::Integer(300),
                ParamValue::Integer(0),
                ParamValue::Integer(0),
                ParamValue::Integer(300),
                ParamValue::Integer(255),
                ParamValue::Integer(255),
            ],
        )
        .unwrap();
        let OperationParams::Segment { lower, upper } = params else {
            panic!("expected segment params");
        };
        assert_eq!(lower.h, 179);
        assert_eq!(upper.h, 179);
    }

    #[test]
    fn unknown_choices_survive_as_unrecognized() {
        let params = OperationParams::from_values(
            OperationKind::Denoise,
            &[ParamValue::Choice("unknown-method".into())],
        )
        .unwrap();
        assert_eq!(
            params,
            OperationParams::Denoise {
                method: DenoiseMethod::Unrecognized("unknown-method".into())
            }
        );
    }

    #[test]
    fn wrong_arity_or_kind_is_an_error() {
        let err = OperationParams::from_values(OperationKind::Resize, &[ParamValue::Integer(5)])
            .unwrap_err();
        assert!(matches!(err, BildwerkError::InvalidParameters(_)));

        let err = OperationParams::from_values(
            OperationKind::Binarize,
            &[ParamValue::Choice("127".into())],
        )
        .unwrap_err();
        assert!(matches!(err, BildwerkError::InvalidParameters(_)));
    }

    #[test]
    fn apply_unknown_denoise_is_identity() {
        let img = RgbImage::from_fn(8, 8, |x, y| Rgb([x as u8 * 30, y as u8 * 30, 5]));
        let params = OperationParams::Denoise {
            method: "unknown-method".parse().unwrap(),
        };
        assert_eq!(params.apply(&img), OperationOutput::Color(img.clone()));
    }

    #[test]
    fn apply_preserves_dimensions_except_resize() {
        let img = RgbImage::from_pixel(12, 7, Rgb([10, 200, 90]));
        for kind in OperationKind::ALL {
            let params = OperationParams::from_values(kind, &kind.default_values((5, 3))).unwrap();
            let out = params.apply(&img);
            if kind == OperationKind::Resize {
                assert_eq!(out.dimensions(), (5, 3));
            } else {
                assert_eq!(out.dimensions(), (12, 7), "{kind}");
            }
        }
    }
}
