//! Error types for rendering.

use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while drawing plots and images.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Pixel buffer does not match the declared image size.
    #[error("buffer of {actual} values does not match {width}x{height} image")]
    DimensionMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },

    /// Image or plot with a zero dimension.
    #[error("image dimensions must be non-zero: {0}x{1}")]
    EmptyImage(u32, u32),

    /// The generated SVG could not be parsed.
    #[error("SVG parse error: {0}")]
    Svg(String),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        Self::Encode(err.to_string())
    }
}
