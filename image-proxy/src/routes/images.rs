use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Extension,
};
use tracing::instrument;

use crate::{
    object_storage::ObjectStore,
    processor::{self, ImageRequest, ProxyError},
};

/// Serves an object, resized when `width` and/or `height` are given
///
/// All other query parameters are forwarded to storage unchanged.
///
/// # Errors
///
/// This function can return the following errors:
/// - `StorageError::NotFound` - the key does not exist (404 `not_found_404`)
/// - `StorageError::Upstream` - storage answered with another error (relayed verbatim)
/// - anything else - generic 500 `internal_error`
#[instrument(skip_all, fields(bucket = %bucket, key = %file))]
pub async fn get_image(
    Extension(object_store): Extension<Arc<dyn ObjectStore>>,
    Path((bucket, file)): Path<(String, String)>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Response, ProxyError> {
    let request = ImageRequest::new(bucket, file, query);

    let image = processor::process(object_store.as_ref(), &request).await?;

    Ok(([(CONTENT_TYPE, image.content_type.to_string())], image.body).into_response())
}
