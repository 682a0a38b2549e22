//! Request orchestration: fetch, then optionally decode, plan, resize and encode

mod content_type;
mod error;
mod request;

use std::time::{Duration, Instant};

use bytes::Bytes;
use image_pipeline::{PipelineResult, ResizePlan};
use mime::Mime;
use tracing::{debug, warn, Span};

use crate::object_storage::ObjectStore;

pub use content_type::content_type_for_key;
pub use error::{ProxyError, ProxyResult};
pub use request::ImageRequest;

/// Wall-clock time spent in each phase of a request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTimings {
    /// Storage round-trip
    pub fetch: Duration,
    /// Decode, planning and resampling
    pub resize: Duration,
    /// Re-encoding
    pub encode: Duration,
}

/// Final response body for an image request
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    /// Bytes sent to the caller
    pub body: Bytes,
    /// Content type derived from the requested key
    pub content_type: Mime,
    /// Time spent per phase
    pub timings: PhaseTimings,
}

struct Transformed {
    body: Bytes,
    resize: Duration,
    encode: Duration,
}

/// Runs the full pipeline for one request
///
/// Without a requested width or height the fetched bytes are returned untouched.
///
/// # Errors
///
/// Returns `ProxyError::Storage` if the fetch fails
/// Returns `ProxyError::Pipeline` if the object cannot be decoded or re-encoded
/// Returns `ProxyError::Task` if the blocking image task does not complete
pub async fn process(store: &dyn ObjectStore, request: &ImageRequest) -> ProxyResult<ProcessedImage> {
    let started = Instant::now();
    let object = store
        .get_object(request.bucket(), request.key(), request.passthrough())
        .await?;
    let fetch = started.elapsed();

    let content_type = content_type_for_key(request.key());

    if !request.wants_resize() {
        debug!(fetch = ?fetch, "Serving object as stored");
        return Ok(ProcessedImage {
            body: object.bytes,
            content_type,
            timings: PhaseTimings {
                fetch,
                ..PhaseTimings::default()
            },
        });
    }

    let (width, height) = (request.width(), request.height());
    let key = request.key().to_string();
    let span = Span::current();
    let transformed = tokio::task::spawn_blocking(move || {
        span.in_scope(|| transform(object.bytes, width, height, &key))
    })
    .await??;

    let timings = PhaseTimings {
        fetch,
        resize: transformed.resize,
        encode: transformed.encode,
    };
    debug!(
        fetch = ?timings.fetch,
        resize = ?timings.resize,
        encode = ?timings.encode,
        "Image processed"
    );

    Ok(ProcessedImage {
        body: transformed.body,
        content_type,
        timings,
    })
}

fn transform(bytes: Bytes, width: u32, height: u32, key: &str) -> PipelineResult<Transformed> {
    let started = Instant::now();
    let decoded = image_pipeline::decode(&bytes)?;

    if !decoded.format().is_encodable() {
        warn!(format = %decoded.format(), key, "Unknown image format, serving original bytes");
        return Ok(Transformed {
            body: bytes,
            resize: started.elapsed(),
            encode: Duration::ZERO,
        });
    }

    let plan = ResizePlan::new(width, height, decoded.width(), decoded.height());
    let resized = image_pipeline::resize(decoded.image(), plan)?;
    let resize = started.elapsed();

    let encode_started = Instant::now();
    let encoded = image_pipeline::encode(&resized, decoded.format())?;

    Ok(Transformed {
        body: Bytes::from(encoded),
        resize,
        encode: encode_started.elapsed(),
    })
}
