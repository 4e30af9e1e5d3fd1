//! Collaborator traits for the Aer pipeline.
//!
//! The pipeline talks to the outside world only through these seams, so
//! concrete HTTP clients and notification sinks can be swapped out in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;

// =============================================================================
// TRANSPORT
// =============================================================================

/// Status and raw body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP transport capable of JSON POSTs with bearer auth.
///
/// Implementations own timeout policy. A transport error means no response
/// was received at all; any HTTP status, success or not, is a response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON, with `Authorization: Bearer {bearer}` when given.
    async fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &JsonValue,
    ) -> Result<TransportResponse>;

    /// Send an OPTIONS request, used as a reachability probe.
    async fn options(&self, url: &str) -> Result<TransportResponse>;
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

/// Outcome class of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Failure,
}

/// User-facing result of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}

/// Receives success/failure notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that discards everything.
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, _notification: Notification) {}
}
