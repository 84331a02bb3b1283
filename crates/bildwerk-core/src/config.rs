// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

/// Smallest upload limit the settings page accepts (1 MiB).
pub const MIN_UPLOAD_BYTES: u64 = 1024 * 1024;

/// Hard ceiling for the resize number inputs, regardless of configuration.
pub const RESIZE_DIMENSION_CEILING: u32 = 32_768;

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Largest accepted upload, in bytes (default 200 MiB).
    pub max_upload_bytes: u64,
    /// Largest width or height the Resize inputs accept.
    pub max_resize_dimension: u32,
    /// Display width of rendered images in the workbench, in CSS pixels.
    pub preview_max_width: u32,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 200 * 1024 * 1024,
            max_resize_dimension: 8192,
            preview_max_width: 720,
            log_filter: "info".into(),
        }
    }
}

impl AppConfig {
    /// Return a copy with every field pulled back into a usable range.
    ///
    /// Hand-edited config files can contain zeros or absurd limits; those are
    /// clamped rather than rejected.
    pub fn validated(mut self) -> Self {
        self.max_upload_bytes = self.max_upload_bytes.max(MIN_UPLOAD_BYTES);
        self.max_resize_dimension = self.max_resize_dimension.clamp(1, RESIZE_DIMENSION_CEILING);
        self.preview_max_width = self.preview_max_width.clamp(64, 4096);
        if self.log_filter.trim().is_empty() {
            self.log_filter = "info".into();
        }
        self
    }
}
