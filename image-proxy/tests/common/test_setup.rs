use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use image_proxy::{object_storage::InMemoryObjectStore, server, types::ServerConfig};
use tower::ServiceExt;

/// Setup test logging
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Router wired to an in-memory object store
pub struct TestSetup {
    pub router: Router,
    pub object_store: Arc<InMemoryObjectStore>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        setup_test_env();

        let object_store = Arc::new(InMemoryObjectStore::new());
        let router = server::router(&config, object_store.clone());

        Self {
            router,
            object_store,
        }
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request_with_origin(
        &self,
        route: &str,
        origin: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .header("Origin", origin)
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
