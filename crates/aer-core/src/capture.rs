//! Capture composition.
//!
//! Pure helpers turning page facts reported by an extraction collaborator
//! into artifacts ready for [`normalize`](crate::normalize::normalize).

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value as JsonValue};

use crate::normalize::CapturedArtifact;

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());
static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// URL schemes extraction is never attempted on.
const RESTRICTED_SCHEMES: [&str; 6] = [
    "chrome://",
    "edge://",
    "about:",
    "view-source:",
    "chrome-extension://",
    "file://",
];

/// `metadata.context` of a regular capture.
pub const CONTEXT_CAPTURE: &str = "context_menu";
/// `metadata.context` of a summary-only capture.
pub const CONTEXT_SUMMARY: &str = "context_menu_summary";

/// Normalize whitespace in extracted text.
pub fn clean_text(text: &str) -> String {
    let text = text.replace('\u{00A0}', " ");
    let text = SPACE_RUNS.replace_all(&text, " ");
    let text = NEWLINE_RUNS.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Text for a whole page; a `Page:` stub when nothing was extracted.
pub fn page_text(title: &str, url: &str, content: &str) -> String {
    if content.is_empty() {
        format!("Page: {}\nURL: {}", title, url)
    } else {
        format!("Title: {}\nURL: {}\n\n{}", title, url, content)
    }
}

/// Whether the text is a page stub with no extracted body.
pub fn is_stub(text: &str) -> bool {
    text.starts_with("Page: ")
}

/// Pages whose content cannot be extracted.
pub fn is_restricted_url(url: Option<&str>) -> bool {
    match url {
        None => true,
        Some(url) => {
            let lower = url.to_lowercase();
            RESTRICTED_SCHEMES.iter().any(|s| lower.starts_with(s))
        }
    }
}

/// What the user captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureKind {
    Selection(String),
    Link(String),
    Image(String),
    Page {
        title: String,
        url: String,
        content: String,
    },
}

impl CaptureKind {
    /// Content string for this capture.
    pub fn content(&self) -> String {
        match self {
            CaptureKind::Selection(text) => text.clone(),
            CaptureKind::Link(url) => format!("Link: {}", url),
            CaptureKind::Image(url) => format!("Image: {}", url),
            CaptureKind::Page {
                title,
                url,
                content,
            } => page_text(title, url, content),
        }
    }
}

/// Where a capture came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureOrigin {
    pub page_url: Option<String>,
    pub tab_title: Option<String>,
}

impl CaptureOrigin {
    fn metadata(&self, context: &str) -> Map<String, JsonValue> {
        let mut meta = Map::new();
        if let Some(url) = &self.page_url {
            meta.insert("pageUrl".into(), json!(url));
        }
        if let Some(title) = &self.tab_title {
            meta.insert("tabTitle".into(), json!(title));
        }
        meta.insert("context".into(), json!(context));
        meta
    }
}

/// Artifact for a regular (full content) capture.
pub fn capture_artifact(kind: &CaptureKind, origin: &CaptureOrigin) -> CapturedArtifact {
    let mut record = Map::new();
    record.insert("content".into(), JsonValue::String(kind.content()));
    record.insert(
        "metadata".into(),
        JsonValue::Object(origin.metadata(CONTEXT_CAPTURE)),
    );
    CapturedArtifact::Record(record)
}

/// Artifact for a summary-only capture.
///
/// A non-blank selection wins over the page; the page falls back to its
/// stub form when no content was extracted.
pub fn summary_capture(
    selection: Option<&str>,
    page: Option<(&str, &str, &str)>,
    origin: &CaptureOrigin,
) -> CapturedArtifact {
    let plaintext = match (selection.map(str::trim).filter(|s| !s.is_empty()), page) {
        (Some(selected), _) => selected.to_string(),
        (None, Some((title, url, content))) => page_text(title, url, content),
        (None, None) => String::new(),
    };

    let mut record = Map::new();
    record.insert("plaintext".into(), JsonValue::String(plaintext));
    record.insert("summaryOnly".into(), JsonValue::Bool(true));
    record.insert(
        "metadata".into(),
        JsonValue::Object(origin.metadata(CONTEXT_SUMMARY)),
    );
    CapturedArtifact::Record(record)
}
