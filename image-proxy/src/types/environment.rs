//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use anyhow::Context;
use aws_config::{retry::RetryConfig, BehaviorVersion, Region};
use axum::http::HeaderValue;
use url::Url;

use super::ServerConfig;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REGION: &str = "us-east-1";
const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

/// Application environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

/// How objects are fetched from storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Plain HTTP GET against the regional endpoint, query string forwarded as-is
    Http,
    /// Signed `GetObject` through the AWS SDK
    Sdk,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Storage backend selected by `STORAGE_BACKEND` (`http` by default)
    ///
    /// # Panics
    ///
    /// Panics if `STORAGE_BACKEND` contains an invalid value
    #[must_use]
    pub fn storage_backend(&self) -> StorageBackend {
        let backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "http".to_string())
            .trim()
            .to_lowercase();

        match backend.as_str() {
            "http" => StorageBackend::Http,
            "sdk" => StorageBackend::Sdk,
            _ => panic!("Invalid storage backend: {backend}"),
        }
    }

    /// AWS region hosting the buckets
    #[must_use]
    pub fn aws_region(&self) -> String {
        env::var("AWS_DEFAULT_REGION")
            .or_else(|_| env::var("AWS_REGION"))
            .ok()
            .filter(|region| !region.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // LocalStack endpoint for development
            Self::Development => Some(LOCALSTACK_ENDPOINT),
        }
    }

    /// Base URL for the plain HTTP storage backend
    ///
    /// `STORAGE_ENDPOINT` wins; otherwise `LocalStack` in development and the
    /// regional S3 endpoint everywhere else.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting endpoint is not a valid URL
    pub fn storage_endpoint(&self) -> anyhow::Result<Url> {
        let endpoint = env::var("STORAGE_ENDPOINT")
            .ok()
            .filter(|endpoint| !endpoint.trim().is_empty())
            .or_else(|| self.override_aws_endpoint_url().map(ToString::to_string))
            .unwrap_or_else(|| format!("https://s3.{}.amazonaws.com", self.aws_region()));

        Url::parse(&endpoint).with_context(|| format!("invalid storage endpoint: {endpoint}"))
    }

    /// AWS configuration; requests are attempted exactly once
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let mut config_loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.aws_region()))
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_loader = config_loader.endpoint_url(endpoint_url);
        }

        config_loader.load().await
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// HTTP server settings
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT`, `REQUEST_TIMEOUT_SECS` or `ALLOW_ORIGIN` cannot be parsed
    pub fn server_config(&self) -> anyhow::Result<ServerConfig> {
        let port = env::var("PORT")
            .map_or(Ok(DEFAULT_PORT), |p| p.trim().parse())
            .context("PORT must be a valid port number")?;

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .map_or(Ok(DEFAULT_REQUEST_TIMEOUT_SECS), |s| s.trim().parse())
            .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        let allow_origin = env::var("ALLOW_ORIGIN")
            .ok()
            .filter(|origin| !origin.trim().is_empty())
            .map(|origin| HeaderValue::from_str(origin.trim()))
            .transpose()
            .context("ALLOW_ORIGIN must be a valid header value")?;

        Ok(ServerConfig {
            port,
            allow_origin,
            request_timeout: Duration::from_secs(request_timeout_secs),
            show_api_docs: self.show_api_docs(),
        })
    }
}
