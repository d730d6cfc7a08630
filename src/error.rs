//! Error types shared by the engine, the codec layer and the command layer.
//!
//! Engine errors (`InvalidArgument`, `OutOfBounds`) are precondition
//! violations and always propagate to the caller. The remaining variants
//! only come out of the codec boundary.

use thiserror::Error;

/// Result type for raster operations
pub type Result<T> = std::result::Result<T, RasterError>;

/// Errors that can occur while transforming, loading or saving images.
#[derive(Debug, Error)]
pub enum RasterError {
    /// A required image was absent or an argument violated a precondition
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Pixel coordinate outside the buffer extent
    #[error("pixel ({row}, {col}) is out of bounds for a {width}x{height} image")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    /// No codec is registered for the file extension
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Persisted image data is malformed
    #[error("format error: {0}")]
    Format(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RasterError {
    /// Shorthand for the error raised when an image reference is absent.
    pub fn null_image() -> Self {
        Self::InvalidArgument("image cannot be null".to_string())
    }
}

impl From<image::ImageError> for RasterError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => Self::Io(io),
            image::ImageError::Unsupported(u) => Self::UnsupportedFormat(u.to_string()),
            other => Self::Format(other.to_string()),
        }
    }
}
