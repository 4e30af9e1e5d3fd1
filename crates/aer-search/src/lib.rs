//! # aer-search
//!
//! Text heuristics for the Aer client.
//!
//! This crate provides:
//! - Anchor-preserving content filtering of long captures
//! - Composite relevance ranking of remote search results
//! - Result previews and prompt insertion text
//!
//! ## Example
//!
//! ```
//! use aer_core::SearchResultItem;
//! use aer_search::{filter_by_first_half, rank_by_relevance};
//!
//! let kept = filter_by_first_half("Main content here.\n\nNew chat", &[]);
//! assert_eq!(kept, "Main content here.");
//!
//! let items = vec![
//!     SearchResultItem { title: Some("Other".into()), ..Default::default() },
//!     SearchResultItem { title: Some("Rust book".into()), ..Default::default() },
//! ];
//! let ranked = rank_by_relevance("rust", items);
//! assert_eq!(ranked[0].item.title.as_deref(), Some("Rust book"));
//! ```

pub mod filter;
pub mod preview;
pub mod rank;
pub mod tokens;

pub use filter::{filter_by_first_half, split_blocks, BlockScorer, KEEP_THRESHOLD};
pub use preview::{compose_insertion, meta_line, resolve_preview};
pub use rank::{rank_by_relevance, relevance_score};
pub use tokens::{query_tokens, tokenize, top_tokens};
