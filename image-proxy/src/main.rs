use std::sync::Arc;

use anyhow::Context;
use aws_sdk_s3::Client as S3Client;
use image_proxy::{
    object_storage::{HttpObjectStore, ObjectStore, S3ObjectStore},
    server,
    types::{Environment, StorageBackend},
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // Use JSON format for staging/production (Datadog), regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    let server_config = environment.server_config()?;

    let backend = environment.storage_backend();
    let object_store: Arc<dyn ObjectStore> = match backend {
        StorageBackend::Http => {
            let http_client = reqwest::Client::builder()
                .build()
                .context("failed to build storage HTTP client")?;
            Arc::new(HttpObjectStore::new(
                http_client,
                environment.storage_endpoint()?,
            ))
        }
        StorageBackend::Sdk => {
            let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
            Arc::new(S3ObjectStore::new(s3_client))
        }
    };

    tracing::info!(
        environment = ?environment,
        backend = ?backend,
        region = %environment.aws_region(),
        "Initialized object storage"
    );

    server::start(server_config, object_store).await
}
