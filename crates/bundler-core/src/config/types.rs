//! Configuration section structs with their defaults.

use serde::{Deserialize, Serialize};

/// Label Studio connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Base URL of the Label Studio instance (supports ${ENV_VAR} syntax)
    pub endpoint: String,

    /// API token (supports ${ENV_VAR} syntax)
    pub token: String,

    /// User id attached to created views, if the server expects one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            endpoint: "${LS_ENDPOINT}".to_string(),
            token: "${LS_TOKEN}".to_string(),
            user_id: None,
        }
    }
}

/// Batched export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Per-call timeout in milliseconds
    pub timeout_ms: u64,

    /// Retries for transient failures (timeouts, 429, 5xx). 0 disables retrying.
    pub retry_attempts: u32,

    /// Base backoff delay in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            retry_attempts: 0,
            retry_delay_ms: 500,
        }
    }
}

/// Settings for the rendered table feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Shuffle the effective subset before rendering
    pub shuffle: bool,

    /// Rows shown before any selection is made (0 = none)
    pub preview_rows: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            shuffle: false,
            preview_rows: 20,
        }
    }
}

/// Thumbnail payload settings for image datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Whether local images are encoded into data URIs
    pub enabled: bool,

    /// Longest edge in pixels
    pub size: u32,

    /// JPEG quality (1-100)
    pub quality: u8,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 256,
            quality: 10,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
