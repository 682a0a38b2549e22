//! Error types for storage operations

use bytes::Bytes;
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Non-success response from storage, kept verbatim for relaying
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    /// HTTP status code returned by storage
    pub status: u16,
    /// `Content-Type` header returned by storage
    pub content_type: Option<String>,
    /// Response body returned by storage
    pub body: Bytes,
}

/// Errors that can occur while fetching an object
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    /// The key does not exist in the bucket
    #[error("Object not found: {bucket}/{key}")]
    NotFound {
        /// Requested bucket
        bucket: String,
        /// Requested key
        key: String,
    },

    /// Storage answered with an error status other than "no such key"
    #[error("Upstream responded with status {}", .0.status)]
    Upstream(UpstreamResponse),

    /// Storage could not be reached or the body could not be read
    #[error("Storage transport error: {0}")]
    Transport(String),

    /// The outbound request could not be built
    #[error("Invalid storage request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

impl From<reqwest_middleware::Error> for StorageError {
    fn from(error: reqwest_middleware::Error) -> Self {
        Self::Transport(error.to_string())
    }
}
