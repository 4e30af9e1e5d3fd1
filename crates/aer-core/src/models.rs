//! Core data models for the Aer client.
//!
//! These types are shared across all Aer crates: the canonical upload
//! payload, the search result shapes and the server responses.

use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

pub use aer_crypto::EncryptedBlob;

/// Deserialize an optional field, turning values of the wrong type into `None`.
///
/// Server and collaborator JSON is loosely typed; one odd field must not
/// discard a whole search hit or response.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// JavaScript-style truthiness, used where capture collaborators rely on it.
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

// =============================================================================
// UPLOAD TYPES
// =============================================================================

/// Canonical payload shape sent to the upload endpoint.
///
/// Known fields are typed; anything else a capture record carried rides along
/// in `extra` and is serialized back at the top level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plaintext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_content: Option<EncryptedBlob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_summary: Option<EncryptedBlob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_title: Option<EncryptedBlob>,
    /// Capture time, milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, JsonValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl NormalizedPayload {
    /// Payload holding only `content`.
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Lift known keys out of a JSON record into typed fields.
    ///
    /// Every known key leaves the map, so none is serialized twice. A value
    /// of the wrong type is dropped, except a truthy `encryptedContent` that
    /// is not a blob: that one stays in `extra` as opaque sealed content.
    /// `content` and `plaintext` scalars are rendered to their JSON text;
    /// `null` for either is dropped.
    pub fn from_fields(mut fields: Map<String, JsonValue>) -> Self {
        let mut encrypted_content = None;
        if let Some(raw) = fields.remove("encryptedContent") {
            match serde_json::from_value::<EncryptedBlob>(raw.clone()) {
                Ok(blob) => encrypted_content = Some(blob),
                Err(_) if is_truthy(&raw) => {
                    fields.insert("encryptedContent".to_string(), raw);
                }
                Err(_) => {}
            }
        }

        let mut payload = Self {
            content: take_text(&mut fields, "content"),
            plaintext: take_text(&mut fields, "plaintext"),
            encrypted_content,
            encrypted_summary: take_typed(&mut fields, "encryptedSummary"),
            encrypted_title: take_typed(&mut fields, "encryptedTitle"),
            timestamp: take_timestamp(&mut fields),
            summary_only: take_typed(&mut fields, "summaryOnly"),
            tags: take_typed(&mut fields, "tags"),
            metadata: take_typed(&mut fields, "metadata"),
            url: take_typed(&mut fields, "url"),
            title: take_typed(&mut fields, "title"),
            file_name: take_typed(&mut fields, "fileName"),
            file_type: take_typed(&mut fields, "fileType"),
            extra: Map::new(),
        };
        payload.extra = fields;
        payload
    }

    /// Sealed content in a shape other than `{ciphertext, nonce}`, carried
    /// through untouched.
    pub fn opaque_encrypted_content(&self) -> Option<&JsonValue> {
        self.extra.get("encryptedContent")
    }

    /// Content is already sealed, as a blob or in opaque form.
    pub fn is_sealed(&self) -> bool {
        self.encrypted_content.is_some() || self.opaque_encrypted_content().is_some()
    }

    /// At least one of `content`, `plaintext`, `encryptedContent` is usable.
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|s| !s.is_empty())
            || self.plaintext.as_deref().is_some_and(|s| !s.is_empty())
            || self.is_sealed()
    }

    /// Text to encrypt: non-empty `plaintext`, else non-empty `content`.
    pub fn source_text(&self) -> Option<&str> {
        self.plaintext
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.content.as_deref().filter(|s| !s.is_empty()))
    }

    /// Whether the upload keeps only a short summary.
    pub fn is_summary_only(&self) -> bool {
        self.summary_only == Some(true)
    }
}

fn take_text(fields: &mut Map<String, JsonValue>, key: &str) -> Option<String> {
    match fields.remove(key)? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn take_typed<T: DeserializeOwned>(fields: &mut Map<String, JsonValue>, key: &str) -> Option<T> {
    serde_json::from_value(fields.remove(key)?).ok()
}

fn take_timestamp(fields: &mut Map<String, JsonValue>) -> Option<i64> {
    let value = fields.remove("timestamp")?;
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}

/// Parsed body of a successful upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl UploadResponse {
    /// Interpret a 2xx body: a JSON object is taken as-is, anything else is
    /// wrapped as a success carrying the raw body as its message.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<JsonValue>(body) {
            Ok(value @ JsonValue::Object(_)) => {
                serde_json::from_value(value).unwrap_or_else(|_| Self::raw(body))
            }
            _ => Self::raw(body),
        }
    }

    fn raw(body: &str) -> Self {
        Self {
            success: Some(true),
            message: Some(body.to_string()),
            extra: Map::new(),
        }
    }

    /// Success unless the server said otherwise.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }
}

// =============================================================================
// SEARCH TYPES
// =============================================================================

/// A single hit returned by the remote search surface.
///
/// Known fields are typed. A known field whose value has the wrong type is
/// kept verbatim in `extra`, so serializing the item reproduces what the
/// server sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, JsonValue>")]
pub struct SearchResultItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_content: Option<EncryptedBlob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_summary: Option<EncryptedBlob>,
    /// Server-side preview, normally under the `"plain"` sentinel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_plain: Option<EncryptedBlob>,
    /// Server relevance score, on the server's own scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl From<Map<String, JsonValue>> for SearchResultItem {
    fn from(mut fields: Map<String, JsonValue>) -> Self {
        let mut item = Self {
            title: lift(&mut fields, "title"),
            url: lift(&mut fields, "url"),
            tags: lift(&mut fields, "tags"),
            encrypted_content: lift(&mut fields, "encryptedContent"),
            encrypted_summary: lift(&mut fields, "encryptedSummary"),
            preview_plain: lift(&mut fields, "previewPlain"),
            score: lift(&mut fields, "score"),
            extra: Map::new(),
        };
        item.extra = fields;
        item
    }
}

/// Take `key` out of `fields` when it parses as `T`; otherwise leave it.
fn lift<T: DeserializeOwned>(fields: &mut Map<String, JsonValue>, key: &str) -> Option<T> {
    let typed = serde_json::from_value(fields.get(key)?.clone()).ok()?;
    fields.remove(key);
    Some(typed)
}

impl SearchResultItem {
    /// Cleartext preview, only when served under the plain sentinel.
    pub fn plain_preview(&self) -> Option<&str> {
        self.preview_plain.as_ref().and_then(EncryptedBlob::plain_text)
    }

    /// Tags, empty when absent.
    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// A search hit with its client-side composite score.
///
/// Serializes as the item's own fields plus `_score`, which replaces any
/// `_score` the server sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub item: SearchResultItem,
    #[serde(rename = "_score")]
    pub score: f64,
}

impl Serialize for RankedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut fields = match serde_json::to_value(&self.item).map_err(S::Error::custom)? {
            JsonValue::Object(map) => map,
            _ => Map::new(),
        };
        fields.insert("_score".to_string(), JsonValue::from(self.score));
        fields.serialize(serializer)
    }
}

/// Response body of a search endpoint.
///
/// Accepted shapes are `{success, results}` and a bare `{results}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub results: Option<Vec<JsonValue>>,
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Whether this body counts as an answer.
    pub fn is_accepted(&self) -> bool {
        self.success == Some(true) || self.results.is_some()
    }

    /// Result objects; entries that are not JSON objects are skipped.
    pub fn into_items(self) -> Vec<SearchResultItem> {
        self.results
            .unwrap_or_default()
            .into_iter()
            .filter(JsonValue::is_object)
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect()
    }
}
