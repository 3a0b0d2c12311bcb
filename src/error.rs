use std::path::PathBuf;
use thiserror::Error;

/// The main error type for kvadrat operations.
///
/// Every failure aborts the whole conversion: there is no partial document.
#[derive(Debug, Error)]
pub enum KvadratError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid pixel grid: {message}")]
    Validation { message: String },

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Malformed path data '{input}': {message}")]
    Format { input: String, message: String },

    #[error("Failed to write document JSON: {0}")]
    JsonWrite(#[from] serde_json::Error),

    #[error("Invalid conversion options: {0}")]
    InvalidOptions(String),

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),
}

impl KvadratError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn geometry(message: impl Into<String>) -> Self {
        Self::Geometry(message.into())
    }

    pub(crate) fn format(input: &str, message: impl Into<String>) -> Self {
        Self::Format {
            input: input.to_string(),
            message: message.into(),
        }
    }
}
