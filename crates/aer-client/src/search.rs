//! Remote semantic search with endpoint fallback, and assist search.

use std::time::Instant;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn, Instrument};

use aer_core::defaults::{ASSIST_MIN_QUERY_CHARS, ASSIST_TOP_K, QUERY_MAX_CHARS, SEARCH_LIMIT};
use aer_core::{
    char_len, new_request_id, truncate_chars, ClientConfig, Error, RankedResult, Result,
    SearchResponse, SearchResultItem, Transport,
};
use aer_crypto::user_id_from_token;
use aer_search::rank_by_relevance;

/// Query each candidate search endpoint in turn.
///
/// The first endpoint answering with a success status and a body carrying
/// `success: true` or a `results` list wins. When every endpoint fails the
/// last failure is returned as [`Error::SearchFailed`].
pub async fn semantic_search(
    transport: &dyn Transport,
    config: &ClientConfig,
    query: &str,
    limit: usize,
) -> Result<Vec<SearchResultItem>> {
    let token = config.require_token()?;
    let body = json!({ "query": query, "limit": limit });
    let mut last_error: Option<String> = None;

    for url in config.search_urls() {
        let response = match transport.post_json(&url, Some(token), &body).await {
            Ok(r) => r,
            Err(e) => {
                warn!(endpoint = %url, error = %e, "Search endpoint unreachable, trying next");
                last_error = Some(e.to_string());
                continue;
            }
        };

        let parsed: SearchResponse = serde_json::from_str(&response.body).unwrap_or_default();
        if response.is_success() && parsed.is_accepted() {
            let items = parsed.into_items();
            debug!(endpoint = %url, result_count = items.len(), "Search endpoint answered");
            return Ok(items);
        }

        let reason = parsed
            .error
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        warn!(endpoint = %url, status = response.status, error = %reason, "Search endpoint failed, trying next");
        last_error = Some(reason);
    }

    Err(Error::SearchFailed(
        last_error.unwrap_or_else(|| "Semantic search failed".to_string()),
    ))
}

/// Ranked results for a prompt, plus the user id needed to derive the key
/// that opens them.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistResults {
    pub user_id: Option<String>,
    pub results: Vec<RankedResult>,
}

/// Search on behalf of a prompt being typed.
///
/// Short queries return nothing without touching the network; long ones are
/// truncated. Results are re-ranked locally and cut to the top few.
pub async fn assist_search(
    transport: &dyn Transport,
    config: &ClientConfig,
    query: &str,
) -> Result<AssistResults> {
    let query = query.trim();
    if char_len(query) < ASSIST_MIN_QUERY_CHARS {
        return Ok(AssistResults::default());
    }
    let query = truncate_chars(query, QUERY_MAX_CHARS);

    let request_id = new_request_id();
    let span = tracing::info_span!(
        "assist_search",
        request_id = %request_id,
        subsystem = "search",
        component = "assist",
    );

    async {
        let start = Instant::now();
        let token = config.require_token()?;
        let user_id = user_id_from_token(token)?.to_string();

        let items = semantic_search(transport, config, query, SEARCH_LIMIT).await?;
        let mut results = rank_by_relevance(query, items);
        results.truncate(ASSIST_TOP_K);

        info!(
            result_count = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Assist search ranked"
        );
        Ok::<_, Error>(AssistResults {
            user_id: Some(user_id),
            results,
        })
    }
    .instrument(span)
    .await
}
