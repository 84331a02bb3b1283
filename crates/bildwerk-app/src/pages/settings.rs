// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page: upload limits, resize cap, preview width and log filter.

use dioxus::prelude::*;

use bildwerk_core::config::{MIN_UPLOAD_BYTES, RESIZE_DIMENSION_CEILING};
use bildwerk_core::human_errors::humanize_error;

use crate::services::app_services::AppServices;
use crate::state::AppState;

const MIB: u64 = 1024 * 1024;
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    // Edited copy; only applied to the workbench on save.
    let mut draft = use_signal(|| state.read().config.clone());
    let mut save_msg = use_signal(|| Option::<(String, &'static str)>::None);
    let data_dir = svc.data_dir().display().to_string();

    rsx! {
        div {
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "Uploads" }
                NumberRow {
                    label: "Maximum upload size (MiB)",
                    value: (draft.read().max_upload_bytes / MIB) as i64,
                    min: (MIN_UPLOAD_BYTES / MIB) as i64,
                    max: 4096,
                    on_change: move |v: i64| { draft.write().max_upload_bytes = v as u64 * MIB; },
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Workbench" }
                NumberRow {
                    label: "Largest resize width/height (px)",
                    value: i64::from(draft.read().max_resize_dimension),
                    min: 1,
                    max: i64::from(RESIZE_DIMENSION_CEILING),
                    on_change: move |v: i64| { draft.write().max_resize_dimension = v as u32; },
                }
                NumberRow {
                    label: "Preview width (px)",
                    value: i64::from(draft.read().preview_max_width),
                    min: 64,
                    max: 4096,
                    on_change: move |v: i64| { draft.write().preview_max_width = v as u32; },
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Diagnostics" }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Log filter (applies on restart)" }
                    input {
                        r#type: "text",
                        style: "width: 160px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: "{draft.read().log_filter}",
                        onchange: move |evt| {
                            draft.write().log_filter = evt.value();
                        },
                    }
                }
            }

            // Save button
            button {
                style: "width: 100%; max-width: 480px; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 8px;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let config = draft.read().clone();
                        match svc.save_config(&config) {
                            Ok(stored) => {
                                tracing::info!("settings saved");
                                draft.set(stored.clone());
                                state.write().apply_config(stored);
                                save_msg.set(Some(("Settings saved.".into(), "#34c759")));
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "failed to save settings");
                                let human = humanize_error(&e);
                                save_msg.set(Some((format!("{} {}", human.message, human.suggestion), human.colour())));
                            }
                        }
                    }
                },
                "Save Settings"
            }
            if let Some((msg, colour)) = save_msg.read().clone() {
                p { style: "color: {colour}; font-size: 14px; margin-top: 8px;",
                    "{msg}"
                }
            }

            section { style: "margin: 24px 0;",
                h3 { "About" }
                p { style: "color: #666; font-size: 14px;",
                    "Bildwerk v{VERSION}"
                    br {}
                    "Interactive Image-Processing Workbench"
                    br {}
                    "Settings stored in {data_dir}"
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}

#[component]
fn NumberRow(label: &'static str, value: i64, min: i64, max: i64, on_change: EventHandler<i64>) -> Element {
    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
            span { "{label}" }
            input {
                r#type: "number",
                style: "width: 100px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;",
                min: "{min}",
                max: "{max}",
                value: "{value}",
                onchange: move |evt| {
                    if let Ok(v) = evt.value().trim().parse::<i64>() {
                        on_change.call(v.clamp(min, max));
                    }
                },
            }
        }
    }
}
