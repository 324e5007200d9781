//! Error types shared by the spectra-explorer crates.

use thiserror::Error;

/// Result type alias using CommonError.
pub type CommonResult<T> = Result<T, CommonError>;

/// Errors raised while constructing shared geometry and style types.
#[derive(Debug, Error)]
pub enum CommonError {
    // === Geometry Errors ===
    #[error("Invalid axis '{name}': {message}")]
    InvalidAxis { name: String, message: String },

    #[error("Invalid bounding box: {0}")]
    InvalidBbox(String),

    // === Style Errors ===
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    #[error("Invalid gradient: {0}")]
    InvalidGradient(String),

    #[error("Style parse error: {0}")]
    StyleParse(String),
}

impl CommonError {
    /// Create an InvalidAxis error.
    pub fn invalid_axis(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAxis {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        CommonError::StyleParse(format!("JSON error: {}", err))
    }
}
