//! Error types for point sampling.

use thiserror::Error;

/// Errors that can occur while sampling, rendering or exporting.
///
/// Capacity overflow and out-of-extent clicks are not errors: the first is
/// ignored and the second resolves to the nearest edge cell.
#[derive(Error, Debug)]
pub enum SamplerError {
    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The in-memory dataset has an inconsistent shape.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// A band index outside the value axis was requested.
    #[error("band {band} out of range for {bands} bands")]
    BandOutOfRange { band: usize, bands: usize },

    /// Writing an export file failed.
    #[error("export to {path} failed: {message}")]
    Export { path: String, message: String },

    /// Shared geometry or style error.
    #[error(transparent)]
    Common(#[from] sampling_common::CommonError),

    /// Plot or image rendering error.
    #[error(transparent)]
    Render(#[from] renderer::RenderError),
}

impl SamplerError {
    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an InvalidDataset error.
    pub fn invalid_dataset(msg: impl Into<String>) -> Self {
        Self::InvalidDataset(msg.into())
    }

    /// Create an Export error.
    pub fn export(path: impl AsRef<std::path::Path>, msg: impl std::fmt::Display) -> Self {
        Self::Export {
            path: path.as_ref().display().to_string(),
            message: msg.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for SamplerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(format!("YAML error: {}", err))
    }
}

impl From<serde_json::Error> for SamplerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {}", err))
    }
}

/// Result type for point sampling operations.
pub type Result<T> = std::result::Result<T, SamplerError>;
