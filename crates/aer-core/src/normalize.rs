//! Payload normalization.
//!
//! Turns whatever a capture collaborator produced into a [`NormalizedPayload`].
//! The input is modelled as a closed [`CapturedArtifact`] variant at the
//! boundary; record handling is a fixed, ordered rule table. Normalization has
//! no error path.

use serde_json::{Map, Value as JsonValue};

use crate::models::{is_truthy, NormalizedPayload};

/// Record fields carried over unchanged whichever rule produces the content.
pub const PASSTHROUGH_FIELDS: [&str; 10] = [
    "metadata",
    "timestamp",
    "summaryOnly",
    "tags",
    "encryptedTitle",
    "encryptedSummary",
    "url",
    "fileName",
    "fileType",
    "title",
];

/// Fields already in canonical form; a record carrying any of them is kept whole.
const CANONICAL_FIELDS: [&str; 3] = ["content", "plaintext", "encryptedContent"];

/// Fields probed in order for text content.
pub const CONTENT_FIELDS: [&str; 6] = ["text", "message", "body", "data", "value", "html"];

/// Raw captured unit of content, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedArtifact {
    Empty,
    Text(String),
    Sequence(Vec<JsonValue>),
    Record(Map<String, JsonValue>),
    /// Numbers and booleans.
    Scalar(JsonValue),
}

impl From<JsonValue> for CapturedArtifact {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Empty,
            JsonValue::String(s) => Self::Text(s),
            JsonValue::Array(items) => Self::Sequence(items),
            JsonValue::Object(map) => Self::Record(map),
            other => Self::Scalar(other),
        }
    }
}

impl From<Option<JsonValue>> for CapturedArtifact {
    fn from(value: Option<JsonValue>) -> Self {
        value.map(Self::from).unwrap_or(Self::Empty)
    }
}

impl From<String> for CapturedArtifact {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for CapturedArtifact {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

type RecordRule = fn(&Map<String, JsonValue>) -> Option<Map<String, JsonValue>>;

/// Record rules, evaluated in priority order. The first match wins; the
/// serialize-everything fallback runs when none match.
const RECORD_RULES: [(&str, RecordRule); 3] = [
    ("canonical", canonical_record),
    ("encrypted", encrypted_record),
    ("content_field", content_field_record),
];

/// Normalize any captured artifact into a canonical payload.
pub fn normalize(artifact: impl Into<CapturedArtifact>) -> NormalizedPayload {
    match artifact.into() {
        CapturedArtifact::Empty => NormalizedPayload::from_content(""),
        CapturedArtifact::Text(s) => NormalizedPayload::from_content(s),
        CapturedArtifact::Sequence(items) => {
            NormalizedPayload::from_content(JsonValue::Array(items).to_string())
        }
        CapturedArtifact::Scalar(v) => NormalizedPayload::from_content(v.to_string()),
        CapturedArtifact::Record(record) => normalize_record(&record),
    }
}

fn normalize_record(record: &Map<String, JsonValue>) -> NormalizedPayload {
    let fields = RECORD_RULES
        .iter()
        .find_map(|(name, rule)| {
            let fields = rule(record)?;
            tracing::trace!(rule = name, "record normalization rule matched");
            Some(fields)
        })
        .unwrap_or_else(|| {
            let serialized = JsonValue::Object(record.clone()).to_string();
            with_passthrough(record, "content", JsonValue::String(serialized))
        });

    NormalizedPayload::from_fields(fields)
}

/// Passthrough fields of `record`, with `key` set to `value`.
fn with_passthrough(
    record: &Map<String, JsonValue>,
    key: &str,
    value: JsonValue,
) -> Map<String, JsonValue> {
    let mut out: Map<String, JsonValue> = PASSTHROUGH_FIELDS
        .iter()
        .filter_map(|f| record.get(*f).map(|v| (f.to_string(), v.clone())))
        .collect();
    out.insert(key.to_string(), value);
    out
}

fn canonical_record(record: &Map<String, JsonValue>) -> Option<Map<String, JsonValue>> {
    CANONICAL_FIELDS
        .iter()
        .any(|f| record.get(*f).is_some_and(is_truthy))
        .then(|| record.clone())
}

fn encrypted_record(record: &Map<String, JsonValue>) -> Option<Map<String, JsonValue>> {
    let encrypted = record.get("encrypted").filter(|v| is_truthy(v))?;
    Some(with_passthrough(record, "encryptedContent", encrypted.clone()))
}

fn content_field_record(record: &Map<String, JsonValue>) -> Option<Map<String, JsonValue>> {
    let value = CONTENT_FIELDS.iter().find_map(|f| record.get(*f))?;
    let content = match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    };
    Some(with_passthrough(record, "content", JsonValue::String(content)))
}
