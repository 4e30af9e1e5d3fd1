//! Deterministic key derivation from Aer auth tokens.
//!
//! Tokens have the shape `aer_{userId}`. The symmetric key is the SHA-256
//! digest of the UTF-8 user id, so any holder of the same token (or user id)
//! derives the same key and can open blobs sealed elsewhere. There is no salt:
//! confidentiality rests on the token staying secret.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, CryptoResult};
use crate::format::{base64_decode, base64_encode, KEY_LEN};

/// Prefix every auth token must carry.
pub const TOKEN_PREFIX: &str = "aer_";

/// Key wrapper with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Create a new derived key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { key: bytes }
    }

    /// Decode a base64 key; it must decode to exactly 32 bytes.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let mut decoded = base64_decode(encoded.trim())
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;

        if decoded.len() != KEY_LEN {
            let len = decoded.len();
            decoded.zeroize();
            return Err(CryptoError::InvalidKey(format!(
                "Expected {} bytes, got {}",
                KEY_LEN, len
            )));
        }

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self { key })
    }

    /// Get the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// Base64 form, as exchanged with other Aer clients.
    pub fn to_base64(&self) -> String {
        base64_encode(&self.key)
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for DerivedKey {}

/// Extract the user id from an `aer_{userId}` token.
pub fn user_id_from_token(token: &str) -> CryptoResult<&str> {
    match token.strip_prefix(TOKEN_PREFIX) {
        Some(user_id) if !user_id.is_empty() => Ok(user_id),
        _ => Err(CryptoError::InvalidTokenFormat),
    }
}

/// Derive the 256-bit key for a user id: first 32 bytes of SHA-256(user_id).
pub fn derive_key_from_user_id(user_id: &str) -> DerivedKey {
    let digest = Sha256::digest(user_id.as_bytes());
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&digest[..KEY_LEN]);
    DerivedKey { key }
}

/// Derive the symmetric key for an auth token.
pub fn derive_key(token: &str) -> CryptoResult<DerivedKey> {
    let user_id = user_id_from_token(token)?;
    Ok(derive_key_from_user_id(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_deterministic() {
        let key1 = derive_key("aer_user123").unwrap();
        let key2 = derive_key("aer_user123").unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
        assert_eq!(key1.to_base64(), key2.to_base64());
    }

    #[test]
    fn test_derive_key_matches_user_id_derivation() {
        let from_token = derive_key("aer_abc").unwrap();
        let from_user = derive_key_from_user_id("abc");
        assert_eq!(from_token, from_user);
    }

    #[test]
    fn test_derive_key_known_digest() {
        // SHA-256("abc")
        let key = derive_key_from_user_id("abc");
        assert_eq!(key.as_bytes()[0], 0xba);
        assert_eq!(key.as_bytes()[1], 0x78);
        assert_eq!(key.as_bytes()[31], 0xad);
        assert_eq!(
            key.to_base64(),
            "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0="
        );
    }

    #[test]
    fn test_different_users_different_keys() {
        let key1 = derive_key("aer_alice").unwrap();
        let key2 = derive_key("aer_bob").unwrap();
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_missing_prefix_rejected() {
        assert!(matches!(
            derive_key("user123"),
            Err(CryptoError::InvalidTokenFormat)
        ));
        assert!(matches!(
            derive_key("AER_user123"),
            Err(CryptoError::InvalidTokenFormat)
        ));
    }

    #[test]
    fn test_empty_user_id_rejected() {
        assert!(matches!(
            user_id_from_token("aer_"),
            Err(CryptoError::InvalidTokenFormat)
        ));
    }

    #[test]
    fn test_user_id_from_token() {
        assert_eq!(user_id_from_token("aer_k57xyz").unwrap(), "k57xyz");
    }

    #[test]
    fn test_base64_roundtrip() {
        let key = derive_key("aer_roundtrip").unwrap();
        let restored = DerivedKey::from_base64(&key.to_base64()).unwrap();
        assert_eq!(key, restored);
    }

    #[test]
    fn test_from_base64_wrong_length() {
        let result = DerivedKey::from_base64(&base64_encode(&[1u8; 16]));
        assert!(matches!(result, Err(CryptoError::InvalidKey(_))));
    }

    #[test]
    fn test_derived_key_debug_redacted() {
        let key = DerivedKey::from_bytes([7u8; 32]);
        let debug_str = format!("{:?}", key);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains('7'));
    }
}
