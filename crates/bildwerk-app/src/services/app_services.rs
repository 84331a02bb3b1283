// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: owns the data directory and the persisted
// configuration, and hands both to the Dioxus UI.
//
// The config is wrapped in `Arc<Mutex<>>` so the struct stays cheaply
// cloneable into event handlers.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use bildwerk_core::AppConfig;
use bildwerk_core::error::Result;
use tracing::info;

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
}

impl AppServices {
    /// Services rooted at `dir`, starting from an already-loaded config.
    pub fn new(dir: PathBuf, config: AppConfig) -> Self {
        info!(path = %dir.display(), "initialising app services");
        Self {
            data_dir: dir,
            config: Arc::new(Mutex::new(config.validated())),
        }
    }

    // -- Config --------------------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validate, update and persist the config. Returns what was stored.
    pub fn save_config(&self, config: &AppConfig) -> Result<AppConfig> {
        let config = config.clone().validated();
        persist_config(&self.data_dir, &config)?;
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = config.clone();
        info!("config saved");
        Ok(config)
    }

    /// Path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

/// Read `config.json` from `data_dir`. `Ok(None)` when there is no file yet.
///
/// Runs before logging is installed, so it reports problems instead of
/// logging them.
pub fn load_config(data_dir: &Path) -> Result<Option<AppConfig>> {
    let data = match std::fs::read_to_string(data_dir.join(CONFIG_FILE)) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&data)?))
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bildwerk_core::error::BildwerkError;

    /// What `main` does on startup.
    fn open(dir: &Path) -> AppServices {
        let config = load_config(dir).unwrap().unwrap_or_default();
        AppServices::new(dir.to_path_buf(), config)
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let svc = open(dir.path());
        assert_eq!(svc.config(), AppConfig::default());
    }

    #[test]
    fn saved_config_survives_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let svc = open(dir.path());
        let config = AppConfig {
            preview_max_width: 480,
            log_filter: "debug".into(),
            ..AppConfig::default()
        };
        svc.save_config(&config).unwrap();

        let reopened = open(dir.path());
        assert_eq!(reopened.config(), config);
    }

    #[test]
    fn save_validates_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let svc = open(dir.path());
        let stored = svc
            .save_config(&AppConfig {
                max_resize_dimension: 0,
                ..AppConfig::default()
            })
            .unwrap();
        assert_eq!(stored.max_resize_dimension, 1);
        assert_eq!(load_config(dir.path()).unwrap(), Some(stored));
    }

    #[test]
    fn missing_config_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn malformed_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, BildwerkError::Serialization(_)));
    }

    #[test]
    fn new_validates_the_loaded_config() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::new(
            dir.path().to_path_buf(),
            AppConfig {
                max_resize_dimension: 0,
                ..AppConfig::default()
            },
        );
        assert_eq!(svc.config().max_resize_dimension, 1);
    }
}
