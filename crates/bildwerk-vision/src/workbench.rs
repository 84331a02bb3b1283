// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Workbench state: the uploaded source, the sidebar controls, and the render
// pass that turns the two into a list of displayable results.
//
// Every enabled operation runs on the source image. Results never feed into
// each other.

use std::collections::BTreeMap;

use bildwerk_core::AppConfig;
use bildwerk_core::error::BildwerkError;
use tracing::{debug, info, instrument, warn};

use crate::output::OperationOutput;
use crate::registry::{OperationKind, OperationParams, ParamValue};
use crate::source::SourceImage;

/// Caption of the always-present first view.
pub const ORIGINAL_CAPTION: &str = "Original Image";

/// Whether an image has been uploaded.
#[derive(Debug, Clone, Default)]
pub enum Session {
    #[default]
    NoImage,
    Loaded(SourceImage),
}

impl Session {
    /// Decode an upload and make it the current source.
    ///
    /// On failure the session is cleared, so a stale image is never shown
    /// next to a fresh error.
    pub fn load(
        &mut self,
        name: impl Into<String>,
        data: Vec<u8>,
        config: &AppConfig,
    ) -> Result<(), BildwerkError> {
        match SourceImage::decode(name, data, config) {
            Ok(source) => {
                info!(name = source.name(), dims = ?source.dimensions(), "Image loaded");
                *self = Self::Loaded(source);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Upload failed; clearing session");
                *self = Self::NoImage;
                Err(err)
            }
        }
    }

    pub fn source(&self) -> Option<&SourceImage> {
        match self {
            Self::NoImage => None,
            Self::Loaded(source) => Some(source),
        }
    }
}

/// Sidebar state of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationControl {
    pub enabled: bool,
    pub values: Vec<ParamValue>,
}

/// Sidebar state for every operation, in registry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    entries: BTreeMap<OperationKind, OperationControl>,
    resize_limit: u32,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new((1, 1))
    }
}

impl Controls {
    /// All operations disabled, values at their defaults for a source of
    /// `source_dims`.
    pub fn new(source_dims: (u32, u32)) -> Self {
        let entries = OperationKind::ALL
            .into_iter()
            .map(|kind| {
                let control = OperationControl {
                    enabled: false,
                    values: kind.default_values(source_dims),
                };
                (kind, control)
            })
            .collect();
        Self {
            entries,
            resize_limit: bildwerk_core::config::RESIZE_DIMENSION_CEILING,
        }
    }

    /// Controls whose Resize inputs are additionally capped by the config.
    pub fn for_config(source_dims: (u32, u32), config: &AppConfig) -> Self {
        let mut controls = Self::new(source_dims);
        controls.set_resize_limit(config.max_resize_dimension);
        controls
    }

    /// Cap Resize width and height at `limit`, clamping current values.
    pub fn set_resize_limit(&mut self, limit: u32) {
        self.resize_limit = limit.max(1);
        let cap = self.resize_limit as i64;
        if let Some(control) = self.entries.get_mut(&OperationKind::Resize) {
            for value in &mut control.values {
                if let ParamValue::Integer(v) = value {
                    *v = (*v).min(cap);
                }
            }
        }
    }

    pub fn resize_limit(&self) -> u32 {
        self.resize_limit
    }

    pub fn is_enabled(&self, kind: OperationKind) -> bool {
        self.entries.get(&kind).is_some_and(|c| c.enabled)
    }

    pub fn set_enabled(&mut self, kind: OperationKind, enabled: bool) {
        if let Some(control) = self.entries.get_mut(&kind) {
            control.enabled = enabled;
        }
    }

    /// Current values for `kind`, in descriptor order.
    pub fn values(&self, kind: OperationKind) -> &[ParamValue] {
        self.entries
            .get(&kind)
            .map(|c| c.values.as_slice())
            .unwrap_or_default()
    }

    /// Set parameter `index` of `kind`, clamped into its domain.
    pub fn set_value(
        &mut self,
        kind: OperationKind,
        index: usize,
        value: ParamValue,
    ) -> Result<(), BildwerkError> {
        let spec = kind.params().get(index).ok_or_else(|| {
            BildwerkError::InvalidParameters(format!("{kind} has no parameter #{index}"))
        })?;
        let mut value = spec.normalize(&value)?;
        if kind == OperationKind::Resize {
            if let ParamValue::Integer(v) = &mut value {
                *v = (*v).min(self.resize_limit as i64);
            }
        }

        if let Some(control) = self.entries.get_mut(&kind) {
            debug!(%kind, param = spec.name, ?value, "Control changed");
            control.values[index] = value;
        }
        Ok(())
    }

    /// Point the source-dependent defaults (Resize width and height) at a
    /// newly loaded image. Other values and every enabled flag are kept.
    pub fn reset_source_defaults(&mut self, source_dims: (u32, u32)) {
        let defaults = OperationKind::Resize.default_values(source_dims);
        let cap = self.resize_limit as i64;
        if let Some(control) = self.entries.get_mut(&OperationKind::Resize) {
            control.values = defaults
                .into_iter()
                .map(|value| match value {
                    ParamValue::Integer(v) => ParamValue::Integer(v.min(cap)),
                    other => other,
                })
                .collect();
        }
    }

    /// Typed parameters for `kind` from the current values.
    pub fn params(&self, kind: OperationKind) -> Result<OperationParams, BildwerkError> {
        OperationParams::from_values(kind, self.values(kind))
    }

    /// Enabled operations, in registry order.
    pub fn enabled(&self) -> impl Iterator<Item = OperationKind> + '_ {
        self.entries
            .iter()
            .filter(|(_, c)| c.enabled)
            .map(|(kind, _)| *kind)
    }
}

/// One captioned entry of the result list.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    /// `None` for the original image.
    pub kind: Option<OperationKind>,
    pub caption: &'static str,
    pub output: OperationOutput,
}

/// Compute the views to display for the current session and controls.
///
/// With no image loaded the list is empty. Otherwise the original comes first,
/// followed by one view per enabled operation in registry order, each computed
/// from the source image alone.
#[instrument(skip_all)]
pub fn render_pass(session: &Session, controls: &Controls) -> Result<Vec<RenderedView>, BildwerkError> {
    let Some(source) = session.source() else {
        return Ok(Vec::new());
    };
    let pixels = source.pixels();

    let mut views = vec![RenderedView {
        kind: None,
        caption: ORIGINAL_CAPTION,
        output: OperationOutput::Color(pixels.clone()),
    }];
    for kind in controls.enabled() {
        let params = controls.params(kind)?;
        views.push(RenderedView {
            kind: Some(kind),
            caption: kind.caption(),
            output: params.apply(pixels),
        });
    }

    debug!(views = views.len(), "Render pass complete");
    Ok(views)
}
