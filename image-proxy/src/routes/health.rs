use aide::axum::IntoApiResponse;
use axum::Json;
use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process accepts requests
    status: String,
    /// Crate version of the running proxy
    semver: String,
    /// `GIT_REV` captured at build time
    rev: Option<String>,
}

/// Liveness check
///
/// Does not touch object storage, so it stays green while S3 is unreachable.
pub async fn handler() -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        semver: env!("CARGO_PKG_VERSION").to_string(),
        rev: option_env!("GIT_REV").map(ToString::to_string),
    })
}
