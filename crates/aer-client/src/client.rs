//! High-level client bundling a transport, a notifier and configuration.

use std::sync::Arc;

use tracing::{info, warn};

use aer_core::{
    CapturedArtifact, ClientConfig, Notifier, Result, SearchResultItem, Transport,
    TransportConfig, UploadResponse,
};

use crate::notify::TracingNotifier;
use crate::search::{assist_search, semantic_search, AssistResults};
use crate::tags::{fetch_tags, filter_with_server_tags};
use crate::transport::ReqwestTransport;
use crate::upload::UploadOrchestrator;

/// Entry point for every remote Aer operation.
///
/// The configuration is a plain value owned by the client; nothing is cached
/// globally, and each call reads it without mutating it.
#[derive(Clone)]
pub struct AerClient {
    transport: Arc<dyn Transport>,
    uploader: UploadOrchestrator,
    config: ClientConfig,
}

impl AerClient {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let uploader = UploadOrchestrator::new(transport.clone(), notifier);
        Self {
            transport,
            uploader,
            config,
        }
    }

    /// Client over HTTP that reports notifications to the log.
    pub fn http(config: ClientConfig, transport: TransportConfig) -> Result<Self> {
        config.validate()?;
        let transport = Arc::new(ReqwestTransport::new(transport)?);
        Ok(Self::new(config, transport, Arc::new(TracingNotifier)))
    }

    /// HTTP client configured entirely from the environment.
    pub fn from_env() -> Result<Self> {
        Self::http(ClientConfig::from_env(), TransportConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Encrypt and upload one artifact.
    pub async fn upload(&self, artifact: impl Into<CapturedArtifact>) -> Result<UploadResponse> {
        self.uploader.upload(artifact, &self.config).await
    }

    /// Raw search results, in server order.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResultItem>> {
        semantic_search(self.transport.as_ref(), &self.config, query, limit).await
    }

    /// Locally ranked top results for a prompt.
    pub async fn assist(&self, query: &str) -> Result<AssistResults> {
        assist_search(self.transport.as_ref(), &self.config, query).await
    }

    pub async fn tags(&self, text: &str, title: &str) -> Vec<String> {
        fetch_tags(self.transport.as_ref(), &self.config, text, title).await
    }

    /// Prune `text` with tags the server suggests for it.
    pub async fn filter(&self, text: &str, title: &str) -> String {
        filter_with_server_tags(self.transport.as_ref(), &self.config, text, title).await
    }

    /// Whether the upload endpoint answers at all.
    ///
    /// Any HTTP response counts as reachable, including error statuses.
    pub async fn test_connection(&self) -> bool {
        let url = self.config.upload_url();
        match self.transport.options(&url).await {
            Ok(response) => {
                info!(endpoint = %url, status = response.status, "API reachable");
                true
            }
            Err(e) => {
                warn!(endpoint = %url, error = %e, "API unreachable");
                false
            }
        }
    }
}
