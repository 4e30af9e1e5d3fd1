//! Wire shape of an encrypted field.

use serde::{Deserialize, Serialize};

use crate::format::PLAIN_NONCE;

/// `{ciphertext, nonce}` pair, both base64.
///
/// A nonce of `"plain"` marks a server-side preview whose `ciphertext` is
/// cleartext. Such blobs must be passed through untouched, never re-sealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBlob {
    pub ciphertext: String,
    pub nonce: String,
}

impl EncryptedBlob {
    /// Build a blob from already-encoded parts.
    pub fn new(ciphertext: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            ciphertext: ciphertext.into(),
            nonce: nonce.into(),
        }
    }

    /// Wrap cleartext with the plain sentinel.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, PLAIN_NONCE)
    }

    /// Whether this blob carries cleartext under the plain sentinel.
    pub fn is_plain(&self) -> bool {
        self.nonce == PLAIN_NONCE
    }

    /// Cleartext of a plain-sentinel blob; `None` for sealed blobs.
    pub fn plain_text(&self) -> Option<&str> {
        self.is_plain().then_some(self.ciphertext.as_str())
    }
}
