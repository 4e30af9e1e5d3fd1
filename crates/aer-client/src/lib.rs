//! # aer-client
//!
//! Encrypted upload and ranked search client for the Aer context store.
//!
//! This crate provides:
//! - An HTTP transport built on reqwest
//! - The upload orchestrator (normalize, seal, submit, notify)
//! - Semantic search with endpoint fallback and local re-ranking
//! - Server tag suggestions and tag-assisted content filtering
//! - Logging setup shared by the binaries
//!
//! # Example
//!
//! ```rust,no_run
//! use aer_client::AerClient;
//!
//! #[tokio::main]
//! async fn main() -> aer_core::Result<()> {
//!     let client = AerClient::from_env()?;
//!     client.upload("Remember this").await?;
//!
//!     let found = client.assist("things to remember").await?;
//!     for hit in found.results {
//!         println!("{:>6.1}  {:?}", hit.score, hit.item.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod logging;
pub mod notify;
pub mod search;
pub mod tags;
pub mod transport;
pub mod upload;

// In-memory collaborators for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use client::AerClient;
pub use notify::TracingNotifier;
pub use search::{assist_search, semantic_search, AssistResults};
pub use tags::{fetch_tags, filter_with_server_tags};
pub use transport::ReqwestTransport;
pub use upload::{prepare_payload, UploadOrchestrator};
