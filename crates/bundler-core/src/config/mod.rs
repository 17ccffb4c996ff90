//! Configuration management for Bundler.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Label Studio credentials default to the `LS_ENDPOINT` and
//! `LS_TOKEN` environment variables, which may also come from a `.env` file.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Bundler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Label Studio connection
    pub studio: StudioConfig,

    /// Batched export settings
    pub export: ExportConfig,

    /// Rendered table settings
    pub table: TableConfig,

    /// Thumbnail payload settings
    pub thumbnail: ThumbnailConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Resolved Label Studio credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioCredentials {
    pub endpoint: String,
    pub token: String,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.bundler.bundler/config.toml
    /// - Linux: ~/.config/bundler/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\bundler\config\config.toml
    ///
    /// Falls back to ~/.bundler/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "bundler", "bundler")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".bundler").join("config.toml")
            })
    }

    /// Resolve the Label Studio endpoint and token.
    ///
    /// Both are required before any export; an unset value is a startup-time
    /// configuration error.
    pub fn credentials(&self) -> Result<StudioCredentials, ConfigError> {
        let endpoint = resolve_setting(&self.studio.endpoint).ok_or_else(|| {
            ConfigError::MissingSetting {
                setting: "studio.endpoint".to_string(),
                hint: "Label Studio endpoint is missing. Set LS_ENDPOINT or studio.endpoint."
                    .to_string(),
            }
        })?;
        let token =
            resolve_setting(&self.studio.token).ok_or_else(|| ConfigError::MissingSetting {
                setting: "studio.token".to_string(),
                hint: "Authentication token missing. Set LS_TOKEN or studio.token.".to_string(),
            })?;

        Ok(StudioCredentials {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Populate the process environment from a `.env` file, if one is present.
///
/// Existing variables are never overwritten.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {e}"),
    }
}

/// Expand `${ENV_VAR}` references in a config string.
///
/// Returns `None` when the result is blank or references an unset variable.
pub fn resolve_setting(value: &str) -> Option<String> {
    let expanded = shellexpand::env(value.trim()).ok()?;
    let expanded = expanded.trim();
    if expanded.is_empty() {
        None
    } else {
        Some(expanded.to_string())
    }
}
