use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;

use super::{ObjectStore, QueryParams, RawObject, StorageError, StorageResult, UpstreamResponse};

/// A request received by [`InMemoryObjectStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Requested bucket
    pub bucket: String,
    /// Requested key
    pub key: String,
    /// Forwarded query parameters
    pub query: QueryParams,
}

/// Object store stub for tests
///
/// Unknown keys answer `NotFound`; objects and failures are registered per bucket/key.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    entries: Mutex<HashMap<(String, String), StorageResult<RawObject>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryObjectStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an object
    pub fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: impl Into<Bytes>,
        content_type: Option<&str>,
    ) {
        self.set(
            bucket,
            key,
            Ok(RawObject {
                bytes: bytes.into(),
                content_type: content_type.map(ToString::to_string),
            }),
        );
    }

    /// Makes `bucket/key` answer with a non-success storage response
    pub fn put_upstream_error(
        &self,
        bucket: &str,
        key: &str,
        status: u16,
        content_type: Option<&str>,
        body: impl Into<Bytes>,
    ) {
        self.set(
            bucket,
            key,
            Err(StorageError::Upstream(UpstreamResponse {
                status,
                content_type: content_type.map(ToString::to_string),
                body: body.into(),
            })),
        );
    }

    /// Makes `bucket/key` fail as if storage were unreachable
    pub fn put_transport_error(&self, bucket: &str, key: &str, message: &str) {
        self.set(bucket, key, Err(StorageError::Transport(message.to_string())));
    }

    /// Requests received so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    fn set(&self, bucket: &str, key: &str, entry: StorageResult<RawObject>) {
        lock(&self.entries).insert((bucket.to_string(), key.to_string()), entry);
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn get_object(
        &self,
        bucket: &str,
        key: &str,
        query: &QueryParams,
    ) -> StorageResult<RawObject> {
        lock(&self.requests).push(RecordedRequest {
            bucket: bucket.to_string(),
            key: key.to_string(),
            query: query.clone(),
        });

        lock(&self.entries)
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .unwrap_or_else(|| {
                Err(StorageError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                })
            })
    }
}
