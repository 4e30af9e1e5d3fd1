//! # aer-core
//!
//! Core types, payload normalization and collaborator traits for the Aer
//! client.
//!
//! This crate holds everything the upload and search pipelines share: the
//! error taxonomy, the canonical payload and search result models, client
//! configuration, and the `Transport`/`Notifier` seams implemented by
//! `aer-client`.

pub mod capture;
pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod text;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use capture::{
    capture_artifact, clean_text, is_restricted_url, is_stub, page_text, summary_capture,
    CaptureKind, CaptureOrigin,
};
pub use config::{ClientConfig, TransportConfig};
pub use error::{Error, Result};
pub use models::*;
pub use normalize::{normalize, CapturedArtifact};
pub use text::{bounded_preview, char_len, truncate_chars};
pub use traits::*;
pub use uuid_utils::{new_request_id, now_millis};
