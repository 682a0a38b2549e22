mod docs;
mod health;
pub mod images;

use aide::axum::{routing::get, ApiRouter};

use crate::types::AppError;

/// Creates the router with all handler routes
///
/// `/docs` and `/openapi.json` exist only when `show_api_docs` is set.
pub fn handler(show_api_docs: bool) -> ApiRouter {
    let router = ApiRouter::new()
        .api_route("/health", get(health::handler))
        .route("/{bucket}/{file}", axum::routing::get(images::get_image));

    if show_api_docs {
        router.merge(docs::handler())
    } else {
        router
    }
}

/// Fallback for unmatched routes
#[allow(clippy::unused_async)]
pub async fn not_found() -> AppError {
    AppError::not_found()
}
