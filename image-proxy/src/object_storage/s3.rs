use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::{error::SdkError, operation::get_object::GetObjectError, Client as S3Client};
use bytes::Bytes;
use tracing::{debug, instrument, warn};

use super::{ObjectStore, QueryParams, RawObject, StorageError, StorageResult, UpstreamResponse};

/// Storage client going through the AWS SDK `GetObject` operation
pub struct S3ObjectStore {
    s3_client: Arc<S3Client>,
}

impl S3ObjectStore {
    /// Creates a new SDK-backed object store
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client (retries disabled)
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>) -> Self {
        Self { s3_client }
    }
}

/// Appends `query` to `uri`, keeping any parameters the SDK already set
fn append_query(uri: &str, query: &QueryParams) -> String {
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query)
        .finish();

    if uri.contains('?') {
        format!("{uri}&{encoded}")
    } else {
        format!("{uri}?{encoded}")
    }
}

fn classify(bucket: &str, key: &str, error: SdkError<GetObjectError>) -> StorageError {
    match error {
        SdkError::ServiceError(service_err) => {
            if matches!(service_err.err(), GetObjectError::NoSuchKey(_)) {
                return StorageError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                };
            }

            let raw = service_err.raw();
            StorageError::Upstream(UpstreamResponse {
                status: raw.status().as_u16(),
                content_type: raw.headers().get("content-type").map(ToString::to_string),
                body: raw
                    .body()
                    .bytes()
                    .map(Bytes::copy_from_slice)
                    .unwrap_or_default(),
            })
        }
        other => StorageError::Transport(other.to_string()),
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self, query), fields(forwarded_params = query.len()))]
    async fn get_object(
        &self,
        bucket: &str,
        key: &str,
        query: &QueryParams,
    ) -> StorageResult<RawObject> {
        debug!("Fetching object through the S3 SDK");

        let request = self.s3_client.get_object().bucket(bucket).key(key);

        let result = if query.is_empty() {
            request.send().await
        } else {
            let query = query.clone();
            request
                .customize()
                .mutate_request(move |http_request| {
                    let uri = append_query(http_request.uri(), &query);
                    if let Err(e) = http_request.set_uri(uri) {
                        warn!("Failed to forward query parameters to S3: {e}");
                    }
                })
                .send()
                .await
        };

        let output = result.map_err(|e| classify(bucket, key, e))?;

        let content_type = output.content_type().map(ToString::to_string);
        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Transport(format!("Failed to read object body: {e}")))?
            .into_bytes();

        Ok(RawObject {
            bytes,
            content_type,
        })
    }
}
