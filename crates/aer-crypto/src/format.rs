//! Shared format utilities.

use base64::Engine;

use crate::error::{CryptoError, CryptoResult};

/// Nonce value marking a blob whose `ciphertext` field is unencrypted text.
pub const PLAIN_NONCE: &str = "plain";

/// Nonce length for XSalsa20-Poly1305 (NaCl secretbox).
pub const NONCE_LEN: usize = 24;

/// Key length for XSalsa20-Poly1305.
pub const KEY_LEN: usize = 32;

/// Poly1305 tag length, prefixed to every sealed message.
pub const TAG_LEN: usize = 16;

/// Encode bytes as base64.
pub fn base64_encode(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

/// Decode base64 string to bytes.
pub fn base64_decode(data: &str) -> CryptoResult<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| CryptoError::InvalidInput(format!("Invalid base64: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_roundtrip() {
        let original = [42u8; 32];
        let encoded = base64_encode(&original);
        let decoded = base64_decode(&encoded).unwrap();
        assert_eq!(original.as_slice(), decoded.as_slice());
    }

    #[test]
    fn test_base64_decode_invalid() {
        let result = base64_decode("not valid base64!!!");
        assert!(matches!(result, Err(CryptoError::InvalidInput(_))));
    }

    #[test]
    fn test_secretbox_constants() {
        assert_eq!(NONCE_LEN, 24);
        assert_eq!(KEY_LEN, 32);
        assert_eq!(TAG_LEN, 16);
    }
}
