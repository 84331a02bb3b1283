// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state: the workbench session and controls, shared with
// every page through a Dioxus signal.
//
// Each mutation ends in `refresh`, which runs one render pass and stores the
// resulting data URIs for the workbench to display.

use bildwerk_core::AppConfig;
use bildwerk_core::error::BildwerkError;
use bildwerk_core::human_errors::{HumanError, humanize_error};
use bildwerk_vision::{Controls, OperationKind, ParamValue, RenderedView, Session, render_pass};
use tracing::{info, warn};

/// A captioned image ready for an `img` element.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayView {
    pub caption: &'static str,
    pub src: String,
}

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application settings.
    pub config: AppConfig,
    /// The uploaded image, if any.
    pub session: Session,
    /// Sidebar checkboxes and parameter values.
    pub controls: Controls,
    /// Output of the last render pass.
    pub views: Vec<DisplayView>,
    /// Error banner contents.
    pub error: Option<HumanError>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let controls = Controls::for_config((1, 1), &config);
        Self {
            config,
            session: Session::NoImage,
            controls,
            views: Vec::new(),
            error: None,
        }
    }

    /// Decode an upload and re-render. Resize defaults follow the new image;
    /// every other control is kept.
    pub fn load_upload(&mut self, name: String, bytes: Vec<u8>) {
        let loaded = self.session.load(name, bytes, &self.config);
        if let Some(source) = self.session.source() {
            self.controls.reset_source_defaults(source.dimensions());
        }
        self.refresh();
        // Set after the refresh, which clears the banner on success.
        if let Err(e) = loaded {
            self.error = Some(humanize_error(&e));
        }
    }

    /// Surface an error that happened before decoding (e.g. reading the file).
    pub fn report(&mut self, err: &BildwerkError) {
        self.error = Some(humanize_error(err));
    }

    pub fn toggle(&mut self, kind: OperationKind, enabled: bool) {
        self.controls.set_enabled(kind, enabled);
        self.refresh();
    }

    pub fn set_param(&mut self, kind: OperationKind, index: usize, value: ParamValue) {
        if let Err(e) = self.controls.set_value(kind, index, value) {
            warn!(error = %e, "rejected control value");
            self.error = Some(humanize_error(&e));
            return;
        }
        self.refresh();
    }

    /// Adopt a newly saved config.
    pub fn apply_config(&mut self, config: AppConfig) {
        self.controls.set_resize_limit(config.max_resize_dimension);
        self.config = config;
        self.refresh();
    }

    /// Run one render pass and encode every view for display. A successful
    /// pass clears the error banner.
    pub fn refresh(&mut self) {
        let encoded = render_pass(&self.session, &self.controls)
            .and_then(|views| views.into_iter().map(display).collect::<Result<Vec<_>, _>>());
        match encoded {
            Ok(views) => {
                info!(views = views.len(), "workbench rendered");
                self.views = views;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "render pass failed");
                self.views.clear();
                self.error = Some(humanize_error(&e));
            }
        }
    }

    /// Dimensions of the loaded image, for the sidebar header.
    pub fn source_dims(&self) -> Option<(u32, u32)> {
        self.session.source().map(|s| s.dimensions())
    }
}

/// Every view, the original included, is encoded from its decoded buffer so
/// they all share one orientation.
fn display(view: RenderedView) -> Result<DisplayView, BildwerkError> {
    Ok(DisplayView {
        caption: view.caption,
        src: view.output.to_data_uri()?,
    })
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
