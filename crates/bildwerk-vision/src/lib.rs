// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildwerk-vision: Image processing for the Bildwerk workbench.
//
// Decodes uploads into an RGB source buffer, implements the five operations
// (binarize, resize, denoise, edge detect, segment), describes their
// parameters in an ordered registry, and computes the render pass that the
// UI displays.

pub mod encode;
pub mod ops;
pub mod output;
pub mod registry;
pub mod source;
pub mod workbench;

// Re-export the primary types so callers can use `bildwerk_vision::Session` etc.
pub use output::{GradientMap, OperationOutput};
pub use registry::{
    IntDefault, OperationKind, OperationParams, ParamDomain, ParamSpec, ParamValue, Widget,
};
pub use source::SourceImage;
pub use workbench::{Controls, ORIGINAL_CAPTION, RenderedView, Session, render_pass};
