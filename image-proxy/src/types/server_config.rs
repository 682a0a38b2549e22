use std::time::Duration;

use axum::http::HeaderValue;

/// HTTP server settings, resolved once at start-up
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Value sent as `Access-Control-Allow-Origin`, if any
    pub allow_origin: Option<HeaderValue>,
    /// Upper bound on the time spent serving a single request
    pub request_timeout: Duration,
    /// Whether `/docs` and `/openapi.json` are served
    pub show_api_docs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            allow_origin: None,
            request_timeout: Duration::from_secs(30),
            show_api_docs: false,
        }
    }
}
