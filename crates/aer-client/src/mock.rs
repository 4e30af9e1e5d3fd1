//! In-memory collaborators for deterministic tests.
//!
//! `MockTransport` answers from a queue of scripted responses and records
//! every request; `RecordingNotifier` keeps every notification it receives.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use aer_core::{Error, Notification, Notifier, Result, Transport, TransportResponse};

/// A request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<JsonValue>,
}

/// Scripted transport. Each call pops the next response; once the script is
/// exhausted every call fails with a network error.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<Result<TransportResponse>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with `status` and `body`.
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Ok(TransportResponse::new(status, body)))
    }

    /// Queue a JSON response.
    pub fn respond_json(self, status: u16, body: &JsonValue) -> Self {
        self.respond(status, body.to_string())
    }

    /// Queue a transport failure.
    pub fn fail(self, message: &str) -> Self {
        self.push(Err(Error::Network(message.to_string())))
    }

    fn push(self, item: Result<TransportResponse>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(item);
        }
        self
    }

    /// Every request made so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn answer(&self, request: RecordedRequest) -> Result<TransportResponse> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request);
        }
        self.script
            .lock()
            .ok()
            .and_then(|mut s| s.pop_front())
            .unwrap_or_else(|| Err(Error::Network("no scripted response".to_string())))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &JsonValue,
    ) -> Result<TransportResponse> {
        self.answer(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            bearer: bearer.map(str::to_string),
            body: Some(body.clone()),
        })
    }

    async fn options(&self, url: &str) -> Result<TransportResponse> {
        self.answer(RecordedRequest {
            method: "OPTIONS",
            url: url.to_string(),
            bearer: None,
            body: None,
        })
    }
}

/// Notifier that keeps everything it is given.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().map(|n| n.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_transport_script_and_log() {
        let transport = MockTransport::new().respond(201, "created").fail("down");

        let first = transport
            .post_json("http://x/a", Some("aer_u"), &json!({"k": 1}))
            .await
            .unwrap();
        assert_eq!(first.status, 201);

        let second = transport.options("http://x/b").await;
        assert!(matches!(second, Err(Error::Network(_))));

        let third = transport.options("http://x/c").await;
        assert!(third.is_err());

        let log = transport.requests();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].bearer.as_deref(), Some("aer_u"));
        assert_eq!(log[1].method, "OPTIONS");
    }

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::success("t", "m"));
        assert_eq!(notifier.notifications().len(), 1);
    }
}
