//! Error types for the Tracklens library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Tracklens operations.
#[derive(Debug, Error)]
pub enum TracklensError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Empty file or no rows to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote dataset could not be downloaded.
    #[error("Fetch from '{source_name}' failed: {message}")]
    Fetch {
        source_name: String,
        message: String,
    },

    /// Writing the dataset to local storage failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// No dataset could be obtained locally or remotely.
    #[error("Dataset unavailable: {0}")]
    DatasetUnavailable(String),

    /// An analysis referenced a column the dataset does not carry.
    #[error("Missing column: {column}")]
    MissingColumn { column: String },

    /// An analysis parameter is not usable (e.g. a categorical feature where a numeric one is needed).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A reduction produced no usable result.
    #[error("Computation error: {0}")]
    Computation(String),
}

impl TracklensError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TracklensError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for Tracklens operations.
pub type Result<T> = std::result::Result<T, TracklensError>;
