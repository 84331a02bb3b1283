// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Where `config.json` lives.

use std::ffi::OsString;
use std::path::PathBuf;

const APP_DIR: &str = "bildwerk";

/// `$XDG_DATA_HOME/bildwerk`, else `~/.local/share/bildwerk`, else a folder
/// in the system temp dir. Not created here; saving the config creates it.
pub fn data_dir() -> PathBuf {
    resolve(std::env::var_os("XDG_DATA_HOME"), std::env::var_os("HOME"))
}

fn resolve(xdg_data_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    // An empty XDG_DATA_HOME counts as unset.
    let base = xdg_data_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|home| PathBuf::from(home).join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir);
    base.join(APP_DIR)
}
