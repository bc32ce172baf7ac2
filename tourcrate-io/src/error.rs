//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file format: {format}")]
    InvalidFormat { format: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IoError> for tourcrate_core::Error {
    fn from(e: IoError) -> Self {
        match e {
            IoError::FileNotFound { path } => tourcrate_core::Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            )),
            IoError::InvalidFormat { format } => tourcrate_core::Error::UnsupportedFormat(format),
            IoError::Io(e) => tourcrate_core::Error::Io(e),
            other => tourcrate_core::Error::InvalidData(other.to_string()),
        }
    }
}
