use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use tracing::{debug, instrument};
use url::Url;

use super::{ObjectStore, QueryParams, RawObject, StorageError, StorageResult, UpstreamResponse};

/// Error code S3 puts in the body of a 404 for a missing key
const NO_SUCH_KEY: &[u8] = b"<Code>NoSuchKey</Code>";

/// Storage client issuing unsigned GETs against an S3-compatible endpoint
///
/// The inbound query string is forwarded as-is, so presigned parameters
/// supplied by the caller authenticate the request.
pub struct HttpObjectStore {
    client: ClientWithMiddleware,
    endpoint: Url,
}

impl HttpObjectStore {
    /// Creates a new HTTP object store
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for every request, wrapped with tracing middleware
    /// * `endpoint` - Base URL objects are addressed under as `{endpoint}/{bucket}/{key}`
    #[must_use]
    pub fn new(client: reqwest::Client, endpoint: Url) -> Self {
        let client = ClientBuilder::new(client)
            .with(TracingMiddleware::default())
            .build();

        Self { client, endpoint }
    }

    /// Builds the URL of an object
    ///
    /// Bucket and key are percent-encoded as path segments; a `/` inside the key
    /// stays a separator.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRequest` if the endpoint cannot carry a path
    pub fn object_url(&self, bucket: &str, key: &str, query: &QueryParams) -> StorageResult<Url> {
        let mut url = self.endpoint.clone();

        url.path_segments_mut()
            .map_err(|()| {
                StorageError::InvalidRequest(format!(
                    "endpoint cannot be used as a base URL: {}",
                    self.endpoint
                ))
            })?
            .pop_if_empty()
            .push(bucket)
            .extend(key.split('/'));

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }
}

fn is_no_such_key(body: &[u8]) -> bool {
    body.windows(NO_SUCH_KEY.len())
        .any(|window| window == NO_SUCH_KEY)
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    #[instrument(skip(self, query), fields(forwarded_params = query.len()))]
    async fn get_object(
        &self,
        bucket: &str,
        key: &str,
        query: &QueryParams,
    ) -> StorageResult<RawObject> {
        let url = self.object_url(bucket, key, query)?;
        debug!(path = url.path(), "Fetching object over HTTP");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(RawObject {
                bytes: body,
                content_type,
            });
        }

        if status == StatusCode::NOT_FOUND && is_no_such_key(&body) {
            return Err(StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }

        debug!(status = status.as_u16(), "Storage returned an error response");

        Err(StorageError::Upstream(UpstreamResponse {
            status: status.as_u16(),
            content_type,
            body,
        }))
    }
}
