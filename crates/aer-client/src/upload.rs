//! Upload orchestration.
//!
//! Normalizes a captured artifact, seals its content under the key derived
//! from the auth token and submits it to the upload endpoint. Every call to
//! [`UploadOrchestrator::upload`] emits exactly one notification.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, Instrument};

use aer_core::defaults::{PREVIEW_MAX_CHARS, SUMMARY_MAX_CHARS};
use aer_core::{
    bounded_preview, new_request_id, normalize, now_millis, CapturedArtifact, ClientConfig,
    Error, NormalizedPayload, Notifier, Result, Transport, UploadResponse,
};
use aer_crypto::{derive_key, encrypt, DerivedKey};

use crate::notify::{upload_failure, upload_success};

/// Normalize and seal an artifact into the wire payload.
///
/// Ordering matters: the summary-only overwrite runs last so that it replaces
/// any full-content encryption rather than merging with it.
pub fn prepare_payload(
    artifact: impl Into<CapturedArtifact>,
    config: &ClientConfig,
) -> Result<NormalizedPayload> {
    let mut payload = normalize(artifact);
    if payload.timestamp.unwrap_or(0) == 0 {
        payload.timestamp = Some(now_millis());
    }

    if !payload.has_content() {
        return Err(Error::MissingContent);
    }

    let token = config.require_token()?;
    let key = derive_key(token)?;

    seal(&mut payload, &key)?;
    Ok(payload)
}

fn seal(payload: &mut NormalizedPayload, key: &DerivedKey) -> Result<()> {
    let source = payload.source_text().map(str::to_string);
    let summary_only = payload.is_summary_only();

    if !payload.is_sealed() {
        if let Some(src) = source.as_deref() {
            payload.encrypted_content = Some(encrypt(src, key)?);
        }
    }
    if !summary_only && payload.is_sealed() {
        payload.content = None;
        payload.plaintext = None;
    }

    let Some(src) = source else {
        return Ok(());
    };

    if !summary_only {
        if !src.trim().is_empty() {
            payload.plaintext = Some(bounded_preview(&src, PREVIEW_MAX_CHARS));
        }
        return Ok(());
    }

    let short = bounded_preview(&src, SUMMARY_MAX_CHARS);
    payload.extra.remove("encryptedContent");
    payload.encrypted_content = Some(encrypt(&short, key)?);
    payload.encrypted_summary = Some(encrypt(&short, key)?);
    let preview = bounded_preview(&src, PREVIEW_MAX_CHARS);
    if !preview.is_empty() {
        payload.plaintext = Some(preview);
    }
    Ok(())
}

/// Sends sealed payloads to the upload endpoint.
#[derive(Clone)]
pub struct UploadOrchestrator {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
}

impl UploadOrchestrator {
    pub fn new(transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
        }
    }

    /// Upload one artifact.
    pub async fn upload(
        &self,
        artifact: impl Into<CapturedArtifact>,
        config: &ClientConfig,
    ) -> Result<UploadResponse> {
        let artifact = artifact.into();
        let request_id = new_request_id();
        let span = tracing::info_span!(
            "upload",
            request_id = %request_id,
            subsystem = "upload",
            component = "orchestrator",
        );

        let result = self.run(artifact, config).instrument(span).await;

        match &result {
            Ok(_) => self.notifier.notify(upload_success()),
            Err(e) => self.notifier.notify(upload_failure(e)),
        }
        result
    }

    async fn run(&self, artifact: CapturedArtifact, config: &ClientConfig) -> Result<UploadResponse> {
        let start = Instant::now();

        let payload = prepare_payload(artifact, config).map_err(|e| {
            error!(error = %e, "Upload rejected before sending");
            e
        })?;
        let token = config.require_token()?;
        let url = config.upload_url();

        debug!(
            endpoint = %url,
            summary_only = payload.is_summary_only(),
            has_preview = payload.plaintext.is_some(),
            "Sending sealed payload"
        );

        let body = serde_json::to_value(&payload)?;
        let response = self
            .transport
            .post_json(&url, Some(token), &body)
            .await
            .map_err(|e| {
                error!(endpoint = %url, error = %e, "Upload transport failed");
                e
            })?;

        if !response.is_success() {
            error!(status = response.status, "Upload rejected by server");
            return Err(Error::UploadFailed {
                status: response.status,
                body: response.body,
            });
        }

        info!(
            status = response.status,
            duration_ms = start.elapsed().as_millis() as u64,
            "Upload complete"
        );
        Ok(UploadResponse::from_body(&response.body))
    }
}
