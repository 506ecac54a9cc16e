/// Error types shared between the worker and the UI
///
/// `GenerateError` travels inside a `Message`, and iced messages must be
/// `Clone`, so non-cloneable sources are wrapped in `Arc`.

use std::sync::Arc;

/// Anything that can go wrong between clicking "Generate" and getting pixels
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerateError {
    /// The HTTP client could not be constructed (TLS backend, etc.)
    #[error("could not start HTTP client: {0}")]
    Client(Arc<reqwest::Error>),

    /// Network, DNS, TLS or timeout failure
    #[error("request failed: {0}")]
    Request(Arc<reqwest::Error>),

    /// The service answered with a non-2xx status
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    /// The service answered 2xx but the body is not an image we can read
    #[error("could not decode image: {0}")]
    Decode(Arc<image::ImageError>),

    /// The blocking resize task panicked or was cancelled
    #[error("background task failed: {0}")]
    Worker(String),
}

impl From<reqwest::Error> for GenerateError {
    fn from(error: reqwest::Error) -> Self {
        GenerateError::Request(Arc::new(error))
    }
}

impl From<image::ImageError> for GenerateError {
    fn from(error: image::ImageError) -> Self {
        GenerateError::Decode(Arc::new(error))
    }
}

impl From<tokio::task::JoinError> for GenerateError {
    fn from(error: tokio::task::JoinError) -> Self {
        GenerateError::Worker(error.to_string())
    }
}

/// Failure while writing the current image to disk
#[derive(Debug, Clone, thiserror::Error)]
pub enum SaveError {
    #[error("could not create {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("could not write PNG: {0}")]
    Encode(Arc<image::ImageError>),

    /// The blocking encode task panicked or was cancelled
    #[error("background task failed: {0}")]
    Worker(String),
}

impl From<image::ImageError> for SaveError {
    fn from(error: image::ImageError) -> Self {
        SaveError::Encode(Arc::new(error))
    }
}

impl From<tokio::task::JoinError> for SaveError {
    fn from(error: tokio::task::JoinError) -> Self {
        SaveError::Worker(error.to_string())
    }
}
