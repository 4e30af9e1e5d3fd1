//! Client configuration.
//!
//! Configuration is an explicit value handed to every pipeline call. It is
//! built from the storage collaborator's settings record or from environment
//! variables; nothing is cached process-wide.

use std::env;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::defaults::{
    API_BASE_URL, HTTP_TIMEOUT_SECS, SEARCH_PATHS, TAGS_PATH, UPLOAD_PATH, USER_AGENT,
};
use crate::error::{Error, Result};

/// Settings keys holding the auth token, in order of preference.
const TOKEN_KEYS: [&str; 2] = ["authToken", "token"];
/// Settings keys holding the API base URL, in order of preference.
const BASE_URL_KEYS: [&str; 2] = ["apiUrl", "apiBaseUrl"];

const TOKEN_ENV: [&str; 2] = ["AER_AUTH_TOKEN", "AER_TOKEN"];
const BASE_URL_ENV: [&str; 2] = ["AER_API_URL", "AER_API_BASE_URL"];

/// Auth token and API location for one pipeline call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Bearer token of the form `aer_{userId}`.
    pub auth_token: Option<String>,
    pub api_base_url: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_token: None,
            api_base_url: API_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Config with a token against the default API.
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self::default().with_token(auth_token)
    }

    /// Replace the token. A blank token counts as absent.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = non_blank(token.into());
        self
    }

    /// Replace the API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Build from a settings record as persisted by the storage collaborator.
    ///
    /// Accepts the legacy key aliases `token` and `apiBaseUrl`.
    pub fn from_settings(settings: &Map<String, JsonValue>) -> Self {
        let pick = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| settings.get(*k).and_then(JsonValue::as_str))
                .find_map(|s| non_blank(s.to_string()))
        };

        Self {
            auth_token: pick(&TOKEN_KEYS[..]),
            api_base_url: pick(&BASE_URL_KEYS[..]).unwrap_or_else(|| API_BASE_URL.to_string()),
        }
    }

    /// Load from environment variables.
    ///
    /// - `AER_AUTH_TOKEN` (or `AER_TOKEN`)
    /// - `AER_API_URL` (or `AER_API_BASE_URL`)
    pub fn from_env() -> Self {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |keys: &[&str]| keys.iter().find_map(|k| lookup(k).and_then(non_blank));

        Self {
            auth_token: pick(&TOKEN_ENV[..]),
            api_base_url: pick(&BASE_URL_ENV[..]).unwrap_or_else(|| API_BASE_URL.to_string()),
        }
    }

    /// Check the base URL is usable.
    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(Error::Config("API base URL is empty".to_string()));
        }
        if !url.starts_with("http") {
            return Err(Error::Config(format!(
                "API base URL must start with http: {}",
                url
            )));
        }
        Ok(())
    }

    /// Whether a token is configured.
    pub fn has_token(&self) -> bool {
        self.auth_token.is_some()
    }

    /// The configured token, or [`Error::Unauthenticated`].
    pub fn require_token(&self) -> Result<&str> {
        self.auth_token.as_deref().ok_or(Error::Unauthenticated)
    }

    /// Absolute URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim().trim_end_matches('/'), path)
    }

    pub fn upload_url(&self) -> String {
        self.endpoint(UPLOAD_PATH)
    }

    /// Search endpoints, in the order they are tried.
    pub fn search_urls(&self) -> Vec<String> {
        SEARCH_PATHS.iter().map(|p| self.endpoint(p)).collect()
    }

    pub fn tags_url(&self) -> String {
        self.endpoint(TAGS_PATH)
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// HTTP transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: HTTP_TIMEOUT_SECS,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl TransportConfig {
    /// Load from environment variables (`AER_HTTP_TIMEOUT`).
    pub fn from_env() -> Self {
        Self {
            timeout_seconds: env::var("AER_HTTP_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(HTTP_TIMEOUT_SECS),
            ..Self::default()
        }
    }
}
