//! Per-request failure handling

use std::backtrace::Backtrace;

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};
use image_pipeline::PipelineError;
use thiserror::Error;
use tokio::task::JoinError;

use crate::object_storage::{StorageError, UpstreamResponse};
use crate::types::AppError;

/// Result type for request processing
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Everything that can end an image request early
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Fetching the object failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Decoding or encoding failed
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The blocking image task panicked or was cancelled
    #[error("Image processing task failed: {0}")]
    Task(#[from] JoinError),
}

fn relay(upstream: UpstreamResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);

    match upstream.content_type {
        Some(content_type) => (status, [(CONTENT_TYPE, content_type)], upstream.body).into_response(),
        None => (status, upstream.body).into_response(),
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            Self::Storage(StorageError::NotFound { bucket, key }) => {
                tracing::debug!("Object not found: {bucket}/{key}");
                AppError::not_found().into_response()
            }
            Self::Storage(StorageError::Upstream(upstream)) => {
                tracing::warn!(
                    status = upstream.status,
                    "Relaying storage error response"
                );
                relay(upstream)
            }
            unrecoverable => {
                tracing::error!(
                    error = %unrecoverable,
                    details = ?unrecoverable,
                    backtrace = %Backtrace::force_capture(),
                    "Unrecoverable failure while serving image"
                );
                AppError::internal().into_response()
            }
        }
    }
}
