//! Structured logging schema and field name constants for the Aer client.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log output can be filtered by the same names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Operation failed and was surfaced to the caller |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Operation completions (upload sent, search ranked) |
//! | DEBUG | Decision points, intermediate values, endpoint choices |
//! | TRACE | Per-item iteration (block scores, result scores) |
//!
//! Secrets never appear in logs: tokens are reported as present/absent and
//! ciphertext is omitted.

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID for one upload or search invocation.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "upload", "search", "filter", "crypto", "config"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "orchestrator", "ranker", "transport", "notifier"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "upload", "semantic_search", "fetch_tags"
pub const OPERATION: &str = "op";

// ─── Request fields ────────────────────────────────────────────────────────

/// Endpoint URL a request was sent to.
pub const ENDPOINT: &str = "endpoint";

/// HTTP status code of a response.
pub const STATUS: &str = "status";

/// Search query text.
pub const QUERY: &str = "query";

/// Whether an upload is in summary-only mode.
pub const SUMMARY_ONLY: &str = "summary_only";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a search.
pub const RESULT_COUNT: &str = "result_count";

/// Number of text blocks considered by the content filter.
pub const BLOCK_COUNT: &str = "block_count";

/// Character length of a text or preview.
pub const TEXT_LEN: &str = "text_len";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
