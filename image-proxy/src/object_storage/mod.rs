//! Object retrieval from remote storage
//!
//! Two backends fetch a bucket/key pair: [`HttpObjectStore`] issues a plain GET
//! against the regional endpoint (so signed-URL query strings pass through
//! untouched) and [`S3ObjectStore`] goes through the AWS SDK. Both make a single
//! attempt and classify failures the same way.

mod error;
mod http;
#[cfg(feature = "test-utils")]
mod memory;
mod s3;

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;

pub use error::{StorageError, StorageResult, UpstreamResponse};
pub use http::HttpObjectStore;
#[cfg(feature = "test-utils")]
pub use memory::{InMemoryObjectStore, RecordedRequest};
pub use s3::S3ObjectStore;

/// Query parameters forwarded to storage, sorted by name
pub type QueryParams = BTreeMap<String, String>;

/// Object body as returned by storage
#[derive(Debug, Clone)]
pub struct RawObject {
    /// Full object body
    pub bytes: Bytes,
    /// Content type declared by storage
    pub content_type: Option<String>,
}

/// Read access to objects addressed by bucket and key
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches the whole object in a single attempt
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the key does not exist
    /// Returns `StorageError::Upstream` for any other non-success response
    /// Returns `StorageError::Transport` if storage could not be reached
    async fn get_object(
        &self,
        bucket: &str,
        key: &str,
        query: &QueryParams,
    ) -> StorageResult<RawObject>;
}
