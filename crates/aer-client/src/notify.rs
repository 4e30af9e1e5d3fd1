//! Notification sinks.

use tracing::{error, info};

use aer_core::{Error, Notification, NotificationKind, Notifier};

pub const UPLOAD_SUCCESS_TITLE: &str = "Upload Successful";
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Data uploaded to Aer successfully!";
pub const UPLOAD_FAILURE_TITLE: &str = "Upload Failed";

/// Notification for a finished upload.
pub fn upload_success() -> Notification {
    Notification::success(UPLOAD_SUCCESS_TITLE, UPLOAD_SUCCESS_MESSAGE)
}

/// Notification for a failed upload, carrying the error text.
pub fn upload_failure(err: &Error) -> Notification {
    Notification::failure(UPLOAD_FAILURE_TITLE, err.to_string())
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.kind {
            NotificationKind::Success => {
                info!(subsystem = "notify", title = %n.title, "{}", n.message)
            }
            NotificationKind::Failure => {
                error!(subsystem = "notify", title = %n.title, "{}", n.message)
            }
        }
    }
}
