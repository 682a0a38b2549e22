use aide::{axum::ApiRouter, openapi::OpenApi, scalar::Scalar};
use axum::{routing::get, Extension, Json};

const OPENAPI_PATH: &str = "/openapi.json";

/// Scalar reference page and the raw OpenAPI document
///
/// Only mounted when API docs are enabled; otherwise both paths hit the 404 fallback.
pub fn handler() -> ApiRouter {
    let reference = Scalar::new(OPENAPI_PATH).with_title("Image Proxy API Reference");

    ApiRouter::new()
        .route("/docs", reference.axum_route())
        .route(OPENAPI_PATH, get(openapi_document))
}

#[allow(clippy::unused_async)]
async fn openapi_document(Extension(openapi): Extension<OpenApi>) -> Json<OpenApi> {
    Json(openapi)
}
