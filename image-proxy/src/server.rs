use std::any::Any;
use std::backtrace::Backtrace;
use std::sync::Arc;

use aide::openapi::OpenApi;
use axum::{
    response::{IntoResponse, Response},
    Extension, Router,
};
use datadog_tracing::axum::{shutdown_signal, OtelAxumLayer, OtelInResponseLayer};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use crate::object_storage::ObjectStore;
use crate::routes;
use crate::types::{AppError, ServerConfig};

/// Builds the application router with all layers applied
#[must_use]
pub fn router(config: &ServerConfig, object_store: Arc<dyn ObjectStore>) -> Router {
    let mut openapi = OpenApi::default();

    let mut router = routes::handler(config.show_api_docs)
        .finish_api(&mut openapi)
        .fallback(routes::not_found)
        .layer(Extension(openapi))
        .layer(Extension(object_store))
        // Last line of defence: a panic becomes a generic 500
        .layer(CatchPanicLayer::custom(handle_panic));

    if let Some(origin) = &config.allow_origin {
        router = router.layer(CorsLayer::new().allow_origin(origin.clone()));
    }

    router
        // Include trace context as header into the response
        .layer(OtelInResponseLayer)
        // Start OpenTelemetry trace on incoming request
        .layer(OtelAxumLayer::default())
        .layer(tower_http::timeout::TimeoutLayer::new(config.request_timeout))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    tracing::error!(
        panic = message,
        backtrace = %Backtrace::force_capture(),
        "Request handler panicked"
    );

    AppError::internal().into_response()
}

/// Starts the server with the given configuration and object store
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(config: ServerConfig, object_store: Arc<dyn ObjectStore>) -> anyhow::Result<()> {
    let router = router(&config, object_store);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Image Proxy started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}
