// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildwerk: Interactive Image-Processing Workbench
//
// Entry point. Reads the config once, installs logging with its filter, then
// launches the Dioxus UI with the services in context.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::settings::Settings;
use pages::workbench::Workbench;

use bildwerk_core::AppConfig;
use services::app_services::{AppServices, load_config};
use services::data_dir;

fn main() {
    let dir = data_dir::data_dir();
    let loaded = load_config(&dir);
    let config = match &loaded {
        Ok(found) => found.clone().unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
    .validated();

    // RUST_LOG wins; otherwise the filter saved in config.json.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!("Bildwerk starting");
    if let Err(e) = loaded {
        tracing::warn!(path = %dir.display(), error = %e, "ignoring unreadable config file");
    }

    dioxus::LaunchBuilder::new()
        .with_context(AppServices::new(dir, config))
        .launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[layout(TabLayout)]
    #[route("/")]
    Workbench {},
    #[route("/settings")]
    Settings {},
}

/// Root component.
fn app() -> Element {
    // Services come from the launch context; state is built from their config.
    let svc = use_context::<AppServices>();
    use_context_provider(|| Signal::new(state::AppState::new(svc.config())));

    rsx! {
        Router::<Route> {}
    }
}

/// Persistent bottom tab layout wrapping all pages.
#[component]
fn TabLayout() -> Element {
    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",

            // Page content
            div { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 16px;",
                Outlet::<Route> {}
            }

            // Bottom tab bar
            nav { class: "tab-bar",
                style: "display: flex; justify-content: space-around; padding: 8px 0; border-top: 1px solid #e0e0e0; background: #fafafa;",
                TabButton { to: Route::Workbench {}, label: "Workbench", icon: "W" }
                TabButton { to: Route::Settings {}, label: "Settings", icon: "S" }
            }
        }
    }
}

#[component]
fn TabButton(to: Route, label: &'static str, icon: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "display: flex; flex-direction: column; align-items: center; text-decoration: none; color: #333; font-size: 12px;",
            span { style: "font-size: 20px;", "{icon}" }
            span { "{label}" }
        }
    }
}
