//! reqwest-backed HTTP transport.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, info};

use aer_core::{Error, Result, Transport, TransportConfig, TransportResponse};

/// HTTP transport for the Aer API.
pub struct ReqwestTransport {
    client: Client,
    config: TransportConfig,
}

impl ReqwestTransport {
    /// Create a transport with the given configuration.
    pub fn new(config: TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            timeout_secs = config.timeout_seconds,
            user_agent = %config.user_agent,
            "Initializing HTTP transport"
        );

        Ok(Self { client, config })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(TransportConfig::default())
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(TransportConfig::from_env())
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    async fn read(&self, req: reqwest::RequestBuilder) -> Result<TransportResponse> {
        let response = req.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, body_len = body.len(), "HTTP response received");
        Ok(TransportResponse { status, body })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &JsonValue,
    ) -> Result<TransportResponse> {
        let mut req = self.client.post(url).json(body);
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        debug!(endpoint = %url, authorized = bearer.is_some(), "POST");
        self.read(req).await
    }

    async fn options(&self, url: &str) -> Result<TransportResponse> {
        debug!(endpoint = %url, "OPTIONS");
        self.read(self.client.request(Method::OPTIONS, url)).await
    }
}
