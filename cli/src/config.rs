// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use medbook_api::ApiConfig;
use medbook_core::{APP_NAME, Config as CoreConfig};
use tokio::fs;

const MEDBOOK_CONFIG_ENV: &str = "MEDBOOK_CONFIG";
const MEDBOOK_DEV_ENV: &str = "MEDBOOK_DEV";

const MEDBOOK_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const MEDBOOK_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

/// Configuration of the command-line interface.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// The `[core]` section: record store and acting user.
    #[serde(default)]
    pub core: CoreConfig,

    /// The `[api]` section: backend location and credentials.
    #[serde(default)]
    pub api: ApiConfig,
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// Locates and parses the configuration.
///
/// The path is taken from `--config`, then `MEDBOOK_CONFIG`, then
/// `<config dir>/medbook/config.toml`. A missing default file means the
/// defaults, unless `MEDBOOK_DEV` is set.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(MEDBOOK_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({MEDBOOK_DEV_ENV} is set): config must be explicitly specified via --config or {MEDBOOK_CONFIG_ENV} environment variable",
            ).into());
        }

        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config found, using defaults");
            return Ok(Config::default());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<Config>()
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific config directory not found".into())
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(MEDBOOK_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if MEDBOOK_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if MEDBOOK_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {MEDBOOK_DEV_ENV}: '{val}'. Expected one of: true: {}, false: {}. Treating as unset.",
            MEDBOOK_DEV_VALID_TRUE.join(", "),
            MEDBOOK_DEV_VALID_FALSE.join(", "),
        );
        None
    }
}
