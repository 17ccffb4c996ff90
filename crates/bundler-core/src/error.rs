//! Error types for Bundler.
//!
//! Errors are organized by concern. Configuration and dataset errors abort the
//! operation that raised them; export errors are recorded per chunk in the
//! [`ExportReport`](crate::export::ExportReport) and never abort an export.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Bundler operations.
#[derive(Error, Debug)]
pub enum BundlerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dataset loading and label mapping errors
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Layout computation errors
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// A required setting is absent (or references an unset environment variable)
    #[error("Missing setting {setting}: {hint}")]
    MissingSetting { setting: String, hint: String },
}

/// Errors raised while loading a dataset or deriving its color mapping.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The CSV reader failed (I/O or malformed record)
    #[error("Failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A column the pipeline depends on is absent from the header
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A cell could not be parsed into the type its column requires
    #[error("Invalid value {value:?} in column '{column}' at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// The color column holds a type the mapper cannot classify
    #[error(
        "Unsupported type for 'color' column: expected integer, float or text, got {detected}"
    )]
    UnsupportedColorType { detected: String },
}

/// Errors raised while computing a 2D layout from feature vectors.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Reading or writing the CSV failed
    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The feature column is absent from the header
    #[error("Missing feature column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A feature cell is not a JSON array of numbers
    #[error("Invalid feature vector at row {row}: {message}")]
    InvalidVector { row: usize, message: String },

    /// Feature vectors do not all have the same length
    #[error("Feature vector at row {row} has {found} dimensions, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Not enough data to compute a projection
    #[error("Cannot compute a layout: {0}")]
    Degenerate(String),
}

/// Failure of a single create-view call.
///
/// These are recovered locally by the exporter: the chunk is marked failed in
/// the report and the export continues.
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    /// The server answered with something other than `201 Created`
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The call did not complete within the configured timeout
    #[error("Timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The request never produced a response (DNS, connect, TLS, ...)
    #[error("Request failed: {0}")]
    Transport(String),
}

/// Convenience type alias for Bundler results.
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Convenience type alias for dataset-specific results.
pub type DatasetResult<T> = std::result::Result<T, DatasetError>;
