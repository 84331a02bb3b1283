// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the workbench UI.
//
// Every technical error is mapped to a short plain-English heading and a
// suggestion. Severity drives the colour of the banner.

use crate::error::BildwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Trying again may work (I/O hiccup, full disk).
    Transient,
    /// The user must pick a different file or change a setting.
    ActionRequired,
    /// Nothing the user can do will make this input work.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives colour in UI).
    pub severity: Severity,
}

impl HumanError {
    /// Banner colour for this error's severity.
    pub fn colour(&self) -> &'static str {
        match self.severity {
            Severity::Transient => "#ff9500",
            Severity::ActionRequired => "#007aff",
            Severity::Permanent => "#ff3b30",
        }
    }
}

/// Convert a `BildwerkError` into a `HumanError` suitable for the error banner.
pub fn humanize_error(err: &BildwerkError) -> HumanError {
    match err {
        // -- Upload errors --
        BildwerkError::Decode(_) => HumanError {
            message: "This image couldn't be opened.".into(),
            suggestion: "The file may be damaged or only partly downloaded. Try opening it in another program, or pick a different file.".into(),
            severity: Severity::Permanent,
        },

        BildwerkError::UnsupportedFormat(detail) => HumanError {
            message: "This type of image isn't supported.".into(),
            suggestion: format!("Save the image as a JPEG or PNG first, then load it again. (Detected: {detail})"),
            severity: Severity::ActionRequired,
        },

        BildwerkError::UploadTooLarge { size, limit } => HumanError {
            message: "This image is too large.".into(),
            suggestion: format!(
                "The file is {} MiB but the limit is {} MiB. Shrink the image or raise the limit in Settings.",
                size / (1024 * 1024),
                limit / (1024 * 1024)
            ),
            severity: Severity::ActionRequired,
        },

        // -- Operation errors --
        BildwerkError::InvalidParameters(detail) => HumanError {
            message: "An operation received settings it can't use.".into(),
            suggestion: format!("Reset the operation's controls and try again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        BildwerkError::Encode(_) => HumanError {
            message: "A result couldn't be displayed.".into(),
            suggestion: "Try again. If this keeps happening, the image may be too large to preview.".into(),
            severity: Severity::Transient,
        },

        // -- Storage --
        BildwerkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app doesn't have permission to read that file.".into(),
                    suggestion: "Check the file permissions, or try copying the file to a different location first.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your device's storage may be full.".into(),
                    severity: Severity::Transient,
                }
            }
        }

        BildwerkError::Serialization(_) => HumanError {
            message: "The saved settings couldn't be read.".into(),
            suggestion: "Open Settings and save them again to replace the damaged file.".into(),
            severity: Severity::Transient,
        },
    }
}
