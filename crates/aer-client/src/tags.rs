//! Server tag suggestions and tag-assisted content filtering.
//!
//! Both operations degrade silently: a tag lookup that fails yields no tags,
//! and a filter that cannot reach the server returns the text untouched.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use aer_core::defaults::{TAGS_CONTENT_MAX_CHARS, TAGS_MIN_PROBE_CHARS};
use aer_core::{char_len, truncate_chars, ClientConfig, Result, Transport};
use aer_search::filter_by_first_half;

/// Accepted tag endpoint bodies.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagsBody {
    Bare(Vec<serde_json::Value>),
    Wrapped {
        #[serde(default)]
        tags: Vec<serde_json::Value>,
    },
}

impl TagsBody {
    fn into_tags(self) -> Vec<String> {
        let raw = match self {
            TagsBody::Bare(tags) | TagsBody::Wrapped { tags } => tags,
        };
        raw.into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }
}

async fn request_tags(
    transport: &dyn Transport,
    config: &ClientConfig,
    text: &str,
    title: &str,
) -> Result<Vec<String>> {
    let token = config.require_token()?;
    let body = json!({
        "content": truncate_chars(text, TAGS_CONTENT_MAX_CHARS),
        "title": title,
        "totalContexts": 1,
    });

    let response = transport
        .post_json(&config.tags_url(), Some(token), &body)
        .await?;
    if !response.is_success() {
        return Err(aer_core::Error::Network(format!("HTTP {}", response.status)));
    }
    let parsed: TagsBody = serde_json::from_str(&response.body)?;
    Ok(parsed.into_tags())
}

/// Tags the server suggests for `text`. Any failure yields no tags.
pub async fn fetch_tags(
    transport: &dyn Transport,
    config: &ClientConfig,
    text: &str,
    title: &str,
) -> Vec<String> {
    match request_tags(transport, config, text, title).await {
        Ok(tags) => {
            debug!(tag_count = tags.len(), "Server tags fetched");
            tags
        }
        Err(e) => {
            warn!(error = %e, "Tag lookup failed, continuing without tags");
            Vec::new()
        }
    }
}

/// Filter `text` using tags the server suggests for its leading half.
pub async fn filter_with_server_tags(
    transport: &dyn Transport,
    config: &ClientConfig,
    text: &str,
    title: &str,
) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }
    let probe_len = TAGS_MIN_PROBE_CHARS.max(char_len(text) / 2);
    let probe = truncate_chars(text, probe_len);
    let tags = fetch_tags(transport, config, probe, title).await;
    filter_by_first_half(text, &tags)
}
