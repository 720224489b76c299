//! Client configuration.
//!
//! Precedence per setting: environment variable, then the user config file
//! (`<config_dir>/restoam/config.toml`), then the built-in default. The
//! resolution core is a pure function over already-gathered values so it can
//! be tested without touching the process environment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Workorder resource base URL when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8082/restoam/workorders";
/// Asset collaborator app base URL.
pub const DEFAULT_ASSET_APP_URL: &str = "http://localhost:5173";
/// Location collaborator app base URL.
pub const DEFAULT_LOCATION_APP_URL: &str = "http://localhost:5174";

/// Optional overrides read from the user config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UserConfig {
    pub workorder_api: Option<String>,
    pub asset_app_url: Option<String>,
    pub location_app_url: Option<String>,
    pub data_dir: Option<PathBuf>,
}

/// Environment overrides, gathered in one place.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub workorder_api: Option<String>,
    pub asset_app_url: Option<String>,
    pub location_app_url: Option<String>,
    pub data_dir: Option<String>,
}

impl EnvOverrides {
    fn from_process_env() -> Self {
        Self {
            workorder_api: env::var("RESTOAM_WORKORDER_API").ok(),
            asset_app_url: env::var("RESTOAM_ASSET_APP_URL").ok(),
            location_app_url: env::var("RESTOAM_LOCATION_APP_URL").ok(),
            data_dir: env::var("RESTOAM_DATA_DIR").ok(),
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub workorder_api: String,
    pub asset_app_url: String,
    pub location_app_url: String,
    /// Directory holding the persisted filter slots.
    pub data_dir: PathBuf,
}

/// Read the user config file, if any. A missing file yields the defaults; a
/// file that exists but does not parse is a hard error with context.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("restoam/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Pure precedence core: env beats file beats default.
#[must_use]
pub fn resolve(env: EnvOverrides, user: UserConfig, fallback_data_dir: PathBuf) -> AppConfig {
    AppConfig {
        workorder_api: env
            .workorder_api
            .or(user.workorder_api)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        asset_app_url: env
            .asset_app_url
            .or(user.asset_app_url)
            .unwrap_or_else(|| DEFAULT_ASSET_APP_URL.to_string()),
        location_app_url: env
            .location_app_url
            .or(user.location_app_url)
            .unwrap_or_else(|| DEFAULT_LOCATION_APP_URL.to_string()),
        data_dir: env
            .data_dir
            .map(PathBuf::from)
            .or(user.data_dir)
            .unwrap_or(fallback_data_dir),
    }
}

/// Resolve the effective configuration from the process environment and the
/// user config file.
pub fn load() -> Result<AppConfig> {
    let user = load_user_config()?;
    let fallback = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("restoam");
    Ok(resolve(EnvOverrides::from_process_env(), user, fallback))
}
