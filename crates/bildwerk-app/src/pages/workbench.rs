// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Workbench page: upload an image, toggle operations in the sidebar, and see
// the original next to every enabled result.

use dioxus::prelude::*;

use bildwerk_core::SourceFormat;
use bildwerk_vision::{OperationKind, ParamDomain, ParamValue, Widget};

use crate::state::AppState;

#[component]
pub fn Workbench() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let preview_width = state.read().config.preview_max_width;
    let error = state.read().error.clone();
    let source_dims = state.read().source_dims();
    let views = state.read().views.clone();

    rsx! {
        div { style: "display: flex; gap: 24px; align-items: flex-start;",

            // Sidebar
            aside { style: "width: 280px; flex-shrink: 0; padding: 16px; border-radius: 12px; background: #f8f8f8;",
                h2 { style: "margin-top: 0;", "Operations" }
                for kind in OperationKind::ALL {
                    OperationPanel { key: "{kind.name()}", kind }
                }
            }

            // Main column
            div { style: "flex: 1; min-width: 0;",
                h1 { "Image Processing Workbench" }

                button {
                    style: "width: 100%; max-width: 400px; padding: 16px; border-radius: 12px; border: 2px dashed #007aff; background: #f0f7ff; color: #007aff; font-size: 18px; margin: 8px 0 16px;",
                    onclick: move |_| {
                        #[cfg(not(any(target_os = "ios", target_os = "android")))]
                        {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("Images", &SourceFormat::EXTENSIONS)
                                .pick_file()
                            {
                                let name = path.file_name()
                                    .map(|n| n.to_string_lossy().to_string())
                                    .unwrap_or_else(|| "image".into());
                                match std::fs::read(&path) {
                                    Ok(bytes) => {
                                        tracing::info!(file = %name, size = bytes.len(), "image picked");
                                        state.write().load_upload(name, bytes);
                                    }
                                    Err(e) => {
                                        tracing::warn!(file = %name, error = %e, "could not read picked file");
                                        state.write().report(&e.into());
                                    }
                                }
                            }
                        }
                    },
                    "Choose an image\u{2026}"
                }

                if let Some(err) = error {
                    div { style: "padding: 12px 16px; border-radius: 8px; border-left: 4px solid {err.colour()}; background: #fff8f0; margin-bottom: 16px; max-width: 600px;",
                        p { style: "margin: 0 0 4px; font-weight: 600; color: {err.colour()};", "{err.message}" }
                        p { style: "margin: 0; color: #555; font-size: 14px;", "{err.suggestion}" }
                    }
                }

                if let Some((w, h)) = source_dims {
                    p { style: "color: #888; font-size: 14px;", "Source: {w} \u{00D7} {h} px" }
                } else {
                    p { style: "color: #666;", "Upload a JPEG or PNG image to begin." }
                }

                for view in views {
                    figure { key: "{view.caption}", style: "margin: 0 0 24px;",
                        img {
                            src: "{view.src}",
                            style: "display: block; width: 100%; max-width: {preview_width}px; border-radius: 4px; background: #eee;",
                        }
                        figcaption { style: "color: #555; font-size: 14px; margin-top: 6px;", "{view.caption}" }
                    }
                }
            }
        }
    }
}

/// Checkbox plus parameter widgets for one operation.
#[component]
fn OperationPanel(kind: OperationKind) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let enabled = state.read().controls.is_enabled(kind);

    rsx! {
        div { style: "padding: 10px 0; border-bottom: 1px solid #e6e6e6;",
            label { style: "display: flex; align-items: center; gap: 8px; font-weight: 600;",
                input {
                    r#type: "checkbox",
                    checked: enabled,
                    onchange: move |evt| {
                        state.write().toggle(kind, evt.checked());
                    },
                }
                "{kind.toggle_label()}"
            }
            if enabled {
                for index in 0..kind.params().len() {
                    ParamControl { key: "{index}", kind, index }
                }
            }
        }
    }
}

/// One widget, chosen from the parameter's descriptor.
#[component]
fn ParamControl(kind: OperationKind, index: usize) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let Some(spec) = kind.params().get(index) else {
        return rsx! {};
    };
    let current = state.read().controls.values(kind).get(index).cloned();
    let resize_limit = i64::from(state.read().controls.resize_limit());

    let body = match (spec.widget, spec.domain) {
        (Widget::Select, ParamDomain::Choice { options, .. }) => {
            let selected = current
                .as_ref()
                .and_then(ParamValue::as_choice)
                .unwrap_or_default()
                .to_string();
            rsx! {
                select {
                    style: "width: 100%; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                    value: "{selected}",
                    onchange: move |evt| {
                        state.write().set_param(kind, index, ParamValue::Choice(evt.value()));
                    },
                    for opt in options.iter() {
                        option { key: "{opt}", value: "{opt}", selected: *opt == selected, "{opt}" }
                    }
                }
            }
        }
        (widget, ParamDomain::Integer { min, max, .. }) => {
            let max = if kind == OperationKind::Resize { max.min(resize_limit) } else { max };
            let value = current.as_ref().and_then(ParamValue::as_integer).unwrap_or(min);
            let input_type = if widget == Widget::Slider { "range" } else { "number" };
            rsx! {
                div { style: "display: flex; align-items: center; gap: 8px;",
                    input {
                        r#type: input_type,
                        style: "flex: 1;",
                        min: "{min}",
                        max: "{max}",
                        value: "{value}",
                        onchange: move |evt| {
                            if let Ok(v) = evt.value().trim().parse::<i64>() {
                                state.write().set_param(kind, index, ParamValue::Integer(v));
                            }
                        },
                    }
                    if widget == Widget::Slider {
                        span { style: "width: 36px; text-align: right; font-variant-numeric: tabular-nums;", "{value}" }
                    }
                }
            }
        }
        // Descriptors never pair a select with an integer domain or vice versa.
        (_, ParamDomain::Choice { .. }) => rsx! {},
    };

    rsx! {
        div { style: "margin: 8px 0 0 24px;",
            div { style: "font-size: 13px; color: #555; margin-bottom: 2px;", "{spec.label}" }
            {body}
        }
    }
}
