//! Text shown for, and inserted from, a search result.

use aer_core::defaults::{CONTENT_SNIPPET_CHARS, PREVIEW_PLACEHOLDER};
use aer_core::{char_len, truncate_chars, SearchResultItem};
use aer_crypto::{decrypt, DerivedKey, EncryptedBlob};

/// Heading placed before inserted context.
pub const INSERTION_HEADING: &str = "Context from Aer — Full content";

/// Characters of the extra text checked for duplication before appending.
const DEDUP_PROBE_CHARS: usize = 40;
/// A stub holds at most this many lines.
const STUB_MAX_LINES: usize = 3;
/// Tags shown in the meta line.
const META_TAGS: usize = 3;

fn open(blob: Option<&EncryptedBlob>, key: &DerivedKey) -> Option<String> {
    decrypt(blob?, key).filter(|s| !s.is_empty())
}

/// Snippet for a result card.
///
/// Preference: plain-sentinel preview, then decrypted summary, then a
/// truncated decryption of the full content, then a placeholder.
pub fn resolve_preview(item: &SearchResultItem, key: &DerivedKey) -> String {
    if let Some(plain) = item.plain_preview().filter(|p| !p.is_empty()) {
        return plain.to_string();
    }
    if let Some(summary) = open(item.encrypted_summary.as_ref(), key) {
        return summary;
    }
    if let Some(content) = open(item.encrypted_content.as_ref(), key) {
        let mut snippet = truncate_chars(&content, CONTENT_SNIPPET_CHARS).to_string();
        if char_len(&content) > CONTENT_SNIPPET_CHARS {
            snippet.push('…');
        }
        return snippet;
    }
    PREVIEW_PLACEHOLDER.to_string()
}

/// Text with only `Page:`/`Title:` header lines and no real body.
fn looks_like_stub(text: &str) -> bool {
    (text.starts_with("Page:") || text.starts_with("Title:"))
        && text.trim().split('\n').count() <= STUB_MAX_LINES
}

/// Text to insert into a prompt for this result, or `None` when nothing
/// could be decrypted.
pub fn compose_insertion(item: &SearchResultItem, key: &DerivedKey, query: &str) -> Option<String> {
    let mut full = open(item.encrypted_content.as_ref(), key).unwrap_or_default();
    let extra = open(item.encrypted_summary.as_ref(), key)
        .or_else(|| item.plain_preview().filter(|p| !p.is_empty()).map(str::to_string));

    if full.is_empty() || looks_like_stub(&full) {
        if let Some(extra) = extra {
            let probe = truncate_chars(&extra, DEDUP_PROBE_CHARS);
            if full.is_empty() {
                full = extra;
            } else if !full.contains(probe) {
                full = format!("{}\n\n{}", full, extra);
            }
        }
    }

    if full.is_empty() {
        return None;
    }

    let mut header = Vec::new();
    if let Some(url) = item.url.as_deref().filter(|u| !u.is_empty()) {
        header.push(format!("URL: {}", url));
    }
    if !item.tag_list().is_empty() {
        header.push(format!("Tags: {}", item.tag_list().join(", ")));
    }
    let header_block = if header.is_empty() {
        String::new()
    } else {
        format!("{}\n\n", header.join("\n"))
    };
    let prefix = if query.is_empty() {
        String::new()
    } else {
        format!("{}\n\n", query)
    };

    let payload = format!("{}{}\n{}{}", prefix, INSERTION_HEADING, header_block, full);
    Some(payload.trim().to_string())
}

/// `#tag` list (at most three) followed by the URL host.
pub fn meta_line(item: &SearchResultItem) -> String {
    let mut line = String::new();
    let tags = item.tag_list();
    if !tags.is_empty() {
        let shown: Vec<&str> = tags.iter().take(META_TAGS).map(String::as_str).collect();
        line.push('#');
        line.push_str(&shown.join(" #"));
    }
    let host = item
        .url
        .as_deref()
        .and_then(|u| url::Url::parse(u).ok())
        .and_then(|u| u.host_str().map(str::to_string));
    if let Some(host) = host {
        line.push_str("  ·  ");
        line.push_str(&host);
    }
    line
}
