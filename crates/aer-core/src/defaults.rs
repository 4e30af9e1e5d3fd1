//! Centralized default constants for the Aer client.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers. Weighting constants for ranking and filtering live next to their
//! algorithms in `aer-search`.

// =============================================================================
// SERVER
// =============================================================================

/// Default API base URL when none is configured.
pub const API_BASE_URL: &str = "https://honorable-porpoise-222.convex.site";

/// Upload endpoint path.
pub const UPLOAD_PATH: &str = "/api/context/upload";

/// Search endpoint paths, tried in order.
pub const SEARCH_PATHS: [&str; 2] = ["/api/search", "/api/context/search"];

/// Tag suggestion endpoint path.
pub const TAGS_PATH: &str = "/api/tags";

/// Auth token prefix (`aer_{userId}`).
pub use aer_crypto::TOKEN_PREFIX;

// =============================================================================
// UPLOAD
// =============================================================================

/// Maximum characters of the plaintext preview sent for server enrichment.
pub const PREVIEW_MAX_CHARS: usize = 1200;

/// Maximum characters kept (and encrypted) by summary-only uploads.
pub const SUMMARY_MAX_CHARS: usize = 500;

// =============================================================================
// SEARCH
// =============================================================================

/// Result limit requested from the server by assist search.
pub const SEARCH_LIMIT: usize = 30;

/// Ranked results kept by assist search.
pub const ASSIST_TOP_K: usize = 15;

/// Queries shorter than this (after trimming) skip the network entirely.
pub const ASSIST_MIN_QUERY_CHARS: usize = 3;

/// Queries are truncated to this many characters before searching.
pub const QUERY_MAX_CHARS: usize = 500;

// =============================================================================
// TAGS
// =============================================================================

/// Characters of text sent to the tag endpoint.
pub const TAGS_CONTENT_MAX_CHARS: usize = 6000;

/// Minimum anchor probe length for server-tag filtering.
pub const TAGS_MIN_PROBE_CHARS: usize = 200;

// =============================================================================
// PRESENTATION
// =============================================================================

/// Characters of decrypted content shown when no summary exists.
pub const CONTENT_SNIPPET_CHARS: usize = 180;

/// Shown when nothing about a result can be decrypted.
pub const PREVIEW_PLACEHOLDER: &str = "[Encrypted content – cannot preview]";

// =============================================================================
// TRANSPORT
// =============================================================================

/// HTTP request timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 60;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("aer-client/", env!("CARGO_PKG_VERSION"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_fits_in_preview() {
        assert!(SUMMARY_MAX_CHARS <= PREVIEW_MAX_CHARS);
    }

    #[test]
    fn test_paths_are_absolute() {
        assert!(UPLOAD_PATH.starts_with('/'));
        assert!(TAGS_PATH.starts_with('/'));
        assert!(SEARCH_PATHS.iter().all(|p| p.starts_with('/')));
    }

    #[test]
    fn test_assist_limits() {
        assert!(ASSIST_TOP_K <= SEARCH_LIMIT);
        assert_eq!(TOKEN_PREFIX, "aer_");
    }
}
