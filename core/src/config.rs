// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

/// The name of the application.
pub const APP_NAME: &str = "medbook";

/// Configuration of the local side of the application.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Directory of the record store. Defaults to `<state dir>/medbook/store`.
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Identifier of the signed-in user, used as the patient of new bookings
    /// and as the default statistics view.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Config {
    /// Normalize the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a path cannot be expanded or no default store
    /// location exists on this platform.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        self.store_path = Some(match &self.store_path {
            Some(path) => expand_path(path)
                .map_err(|e| format!("Failed to expand store path: {e}"))?,
            None => {
                let path = get_state_dir()?.join(APP_NAME).join("store");
                tracing::debug!(path = %path.display(), "using default store path");
                path
            }
        });
        Ok(())
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    if let Some(stripped) = home_prefixes.iter().find_map(|p| path.strip_prefix(p)) {
        return Ok(get_home_dir()?.join(stripped));
    }

    let state_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_STATE_HOME/", "${XDG_STATE_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    if let Some(stripped) = state_prefixes.iter().find_map(|p| path.strip_prefix(p)) {
        return Ok(get_state_dir()?.join(stripped));
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or_else(|| "User-specific home directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_local_dir();
    state_dir.ok_or_else(|| "User-specific state directory not found".into())
}
