//! Client-side relevance ranking of remote search results.
//!
//! The composite score adds heuristic text, tag and URL signals to whatever
//! score the server returned. The two scales are unrelated; the weights below
//! are tunables, not calibrated values.

use std::cmp::Ordering;

use tracing::trace;

use aer_core::{RankedResult, SearchResultItem};

use crate::tokens::query_tokens;

/// Title contains the whole query.
pub const TITLE_PHRASE_WEIGHT: f64 = 20.0;
/// Per query token found in the title.
pub const TITLE_TOKEN_WEIGHT: f64 = 3.0;
/// Per tag equal to a query token.
pub const TAG_WEIGHT: f64 = 5.0;
/// URL looks like code hosting and the query asks for code.
pub const CODE_HOST_WEIGHT: f64 = 2.0;
/// URL looks like documentation and the query asks for docs.
pub const DOCS_WEIGHT: f64 = 2.0;
/// Plain preview contains the whole query.
pub const PREVIEW_PHRASE_WEIGHT: f64 = 15.0;
/// Per query token found in the plain preview.
pub const PREVIEW_TOKEN_WEIGHT: f64 = 2.0;
/// Preview token matches counted at most.
pub const PREVIEW_TOKEN_CAP: usize = 5;
/// Result carries an encrypted summary.
pub const SUMMARY_WEIGHT: f64 = 1.0;

/// Composite relevance of one result for `query`.
pub fn relevance_score(query: &str, item: &SearchResultItem) -> f64 {
    let q = query.to_lowercase();
    let tokens = query_tokens(&q);
    let title = item.title.as_deref().unwrap_or_default().to_lowercase();
    let url = item.url.as_deref().unwrap_or_default().to_lowercase();

    let mut score = 0.0;

    if !title.is_empty() {
        if title.contains(&q) {
            score += TITLE_PHRASE_WEIGHT;
        }
        let hits = tokens.iter().filter(|t| title.contains(t.as_str())).count();
        score += TITLE_TOKEN_WEIGHT * hits as f64;
    }

    let tag_hits = item
        .tag_list()
        .iter()
        .filter(|tag| tokens.contains(&tag.to_lowercase()))
        .count();
    score += TAG_WEIGHT * tag_hits as f64;

    if url.contains("github") && (q.contains("code") || q.contains("repo")) {
        score += CODE_HOST_WEIGHT;
    }
    if url.contains("docs") && q.contains("docs") {
        score += DOCS_WEIGHT;
    }

    score += preview_score(&q, &tokens, item);

    if item.encrypted_summary.is_some() {
        score += SUMMARY_WEIGHT;
    }
    if let Some(server) = item.score.filter(|s| s.is_finite()) {
        score += server;
    }

    score
}

fn preview_score(q: &str, tokens: &[String], item: &SearchResultItem) -> f64 {
    let preview = match item.plain_preview() {
        Some(p) if !p.is_empty() => p.to_lowercase(),
        _ => return 0.0,
    };

    if preview.contains(q) {
        return PREVIEW_PHRASE_WEIGHT;
    }
    let hits = tokens.iter().filter(|t| preview.contains(t.as_str())).count();
    PREVIEW_TOKEN_WEIGHT * hits.min(PREVIEW_TOKEN_CAP) as f64
}

/// Score every result and sort by descending score.
///
/// The sort is stable: equal scores keep server order.
pub fn rank_by_relevance(query: &str, items: Vec<SearchResultItem>) -> Vec<RankedResult> {
    let mut ranked: Vec<RankedResult> = items
        .into_iter()
        .map(|item| {
            let score = relevance_score(query, &item);
            trace!(title = item.title.as_deref().unwrap_or(""), score, "result scored");
            RankedResult { item, score }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
}
