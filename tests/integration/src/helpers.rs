//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and reading `{success, data}` envelopes.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use store_api::{create_app, create_app_state};
use store_common::AppConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{Envelope, ErrorEnvelope};

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with URL-encoded query parameters
    pub async fn get_with(&self, path: &str, params: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).query(params).send().await?)
    }

    /// GET and unwrap the `data` of a success envelope
    pub async fn data<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        expected_status: StatusCode,
    ) -> Result<T> {
        let response = self.get_with(path, params).await?;
        let envelope: Envelope<T> = assert_json(response, expected_status).await?;
        anyhow::ensure!(envelope.success, "success flag is false");
        Ok(envelope.data)
    }

    /// GET and read an error envelope
    pub async fn error(
        &self,
        path: &str,
        params: &[(&str, &str)],
        expected_status: StatusCode,
    ) -> Result<ErrorEnvelope> {
        let response = self.get_with(path, params).await?;
        let envelope: ErrorEnvelope = assert_json(response, expected_status).await?;
        anyhow::ensure!(!envelope.success, "success flag is true");
        Ok(envelope)
    }
}

/// Create a test configuration
///
/// Rate limiting is off and migrations come from the workspace directory.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let migrations = concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations");
    AppConfig::from_lookup(|key| match key {
        "RATE_LIMIT_ENABLED" => Some("false".to_string()),
        "DATABASE_RUN_MIGRATIONS" => Some("true".to_string()),
        "DATABASE_MIGRATIONS_DIR" => Some(migrations.to_string()),
        _ => std::env::var(key).ok(),
    })
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
