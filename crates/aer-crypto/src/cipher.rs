//! XSalsa20-Poly1305 (NaCl secretbox) cipher operations.
//!
//! Sealed output is `tag || ciphertext`, byte-compatible with `nacl.secretbox`,
//! so blobs produced here open in any NaCl-based Aer client and vice versa.

use crypto_secretbox::aead::generic_array::GenericArray;
use crypto_secretbox::aead::{Aead, KeyInit};
use crypto_secretbox::XSalsa20Poly1305;
use rand::RngCore;
use serde_json::Value;
use tracing::debug;

use crate::blob::EncryptedBlob;
use crate::error::{CryptoError, CryptoResult};
use crate::format::{base64_decode, base64_encode, NONCE_LEN, TAG_LEN};
use crate::kdf::DerivedKey;

/// Generate cryptographically secure random bytes.
pub fn generate_random<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

/// Generate a random nonce (24 bytes).
///
/// Every call draws fresh OS-seeded randomness, so concurrent encryptions
/// under one key never share a nonce.
pub fn generate_nonce() -> [u8; NONCE_LEN] {
    generate_random()
}

/// Seal plaintext with XSalsa20-Poly1305.
///
/// Returns the 16-byte authentication tag followed by the ciphertext.
pub fn secretbox_seal(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> CryptoResult<Vec<u8>> {
    let cipher = XSalsa20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    cipher
        .encrypt(GenericArray::from_slice(nonce), plaintext)
        .map_err(|_| CryptoError::Encryption("secretbox seal failed".into()))
}

/// Open a sealed message with XSalsa20-Poly1305.
pub fn secretbox_open(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    sealed: &[u8],
) -> CryptoResult<Vec<u8>> {
    if sealed.len() < TAG_LEN {
        return Err(CryptoError::Decryption(format!(
            "sealed message shorter than {} byte tag",
            TAG_LEN
        )));
    }

    let cipher = XSalsa20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|_| CryptoError::Decryption("Invalid key".to_string()))?;

    cipher
        .decrypt(GenericArray::from_slice(nonce), sealed)
        .map_err(|_| CryptoError::Authentication)
}

/// Encrypt a string into a base64 `{ciphertext, nonce}` blob.
pub fn encrypt(plaintext: &str, key: &DerivedKey) -> CryptoResult<EncryptedBlob> {
    let nonce = generate_nonce();
    let sealed = secretbox_seal(key, &nonce, plaintext.as_bytes())?;
    Ok(EncryptedBlob::new(
        base64_encode(&sealed),
        base64_encode(&nonce),
    ))
}

/// Encrypt an arbitrary JSON value; strings are sealed as-is, anything else
/// as its JSON text.
pub fn encrypt_value(value: &Value, key: &DerivedKey) -> CryptoResult<EncryptedBlob> {
    match value {
        Value::String(s) => encrypt(s, key),
        other => encrypt(&other.to_string(), key),
    }
}

/// Encrypt with a base64-encoded key.
pub fn encrypt_with_key_b64(plaintext: &str, key_b64: &str) -> CryptoResult<EncryptedBlob> {
    let key = DerivedKey::from_base64(key_b64)?;
    encrypt(plaintext, &key)
}

/// Open a blob, reporting why it failed.
///
/// Plain-sentinel blobs return their `ciphertext` verbatim without touching
/// the key.
pub fn open_blob(blob: &EncryptedBlob, key: &DerivedKey) -> CryptoResult<String> {
    if let Some(text) = blob.plain_text() {
        return Ok(text.to_string());
    }

    if blob.nonce.is_empty() || blob.ciphertext.is_empty() {
        return Err(CryptoError::InvalidInput("empty blob".to_string()));
    }

    let nonce_bytes = base64_decode(&blob.nonce)?;
    let nonce: [u8; NONCE_LEN] = nonce_bytes.as_slice().try_into().map_err(|_| {
        CryptoError::InvalidInput(format!(
            "nonce must be {} bytes, got {}",
            NONCE_LEN,
            nonce_bytes.len()
        ))
    })?;
    let sealed = base64_decode(&blob.ciphertext)?;

    let opened = secretbox_open(key, &nonce, &sealed)?;
    String::from_utf8(opened)
        .map_err(|e| CryptoError::Decryption(format!("plaintext is not UTF-8: {}", e)))
}

/// Decrypt a blob; `None` means "cannot preview".
///
/// Never fails loudly: wrong keys, tampering and malformed input all collapse
/// to `None` so presentation code can show a placeholder.
pub fn decrypt(blob: &EncryptedBlob, key: &DerivedKey) -> Option<String> {
    match open_blob(blob, key) {
        Ok(text) => Some(text),
        Err(e) => {
            debug!(error = %e, "blob could not be opened");
            None
        }
    }
}

/// Decrypt with a base64-encoded key; malformed keys also yield `None`.
pub fn decrypt_with_key_b64(blob: &EncryptedBlob, key_b64: &str) -> Option<String> {
    if blob.is_plain() {
        return blob.plain_text().map(str::to_string);
    }
    let key = DerivedKey::from_base64(key_b64).ok()?;
    decrypt(blob, &key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::derive_key;

    fn test_key() -> DerivedKey {
        DerivedKey::from_bytes([42u8; 32])
    }

    #[test]
    fn test_generate_nonce() {
        let nonce1 = generate_nonce();
        let nonce2 = generate_nonce();

        assert_eq!(nonce1.len(), 24);
        assert_ne!(nonce1, nonce2);
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let key = test_key();
        let nonce = [1u8; 24];
        let plaintext = b"Hello, World!";

        let sealed = secretbox_seal(&key, &nonce, plaintext).unwrap();
        let opened = secretbox_open(&key, &nonce, &sealed).unwrap();

        assert_eq!(plaintext.as_slice(), opened.as_slice());
    }

    #[test]
    fn test_sealed_length_includes_tag() {
        let key = test_key();
        let nonce = [1u8; 24];
        let plaintext = b"Hello, World!";

        let sealed = secretbox_seal(&key, &nonce, plaintext).unwrap();
        assert_eq!(sealed.len(), plaintext.len() + TAG_LEN);
    }

    #[test]
    fn test_open_wrong_nonce() {
        let key = test_key();
        let sealed = secretbox_seal(&key, &[1u8; 24], b"Secret data").unwrap();
        let result = secretbox_open(&key, &[2u8; 24], &sealed);
        assert!(matches!(result, Err(CryptoError::Authentication)));
    }

    #[test]
    fn test_open_truncated() {
        let result = secretbox_open(&test_key(), &[1u8; 24], &[0u8; 4]);
        assert!(matches!(result, Err(CryptoError::Decryption(_))));
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let key = derive_key("aer_user123").unwrap();
        let blob = encrypt("Hello world", &key).unwrap();

        assert!(!blob.is_plain());
        assert_eq!(base64_decode(&blob.nonce).unwrap().len(), 24);
        assert_eq!(decrypt(&blob, &key).as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_encrypt_empty_and_unicode() {
        let key = test_key();
        for text in ["", "naïve café ✓", "line1\n\nline2"] {
            let blob = encrypt(text, &key).unwrap();
            assert_eq!(decrypt(&blob, &key).as_deref(), Some(text));
        }
    }

    #[test]
    fn test_same_plaintext_different_blobs() {
        let key = test_key();
        let blob1 = encrypt("Same message", &key).unwrap();
        let blob2 = encrypt("Same message", &key).unwrap();

        assert_ne!(blob1.nonce, blob2.nonce);
        assert_ne!(blob1.ciphertext, blob2.ciphertext);
    }

    #[test]
    fn test_decrypt_wrong_key_is_none() {
        let blob = encrypt("Secret", &derive_key("aer_alice").unwrap()).unwrap();
        assert_eq!(decrypt(&blob, &derive_key("aer_mallory").unwrap()), None);
    }

    #[test]
    fn test_decrypt_tampered_is_none() {
        let key = test_key();
        let blob = encrypt("Secret data", &key).unwrap();
        let mut sealed = base64_decode(&blob.ciphertext).unwrap();
        sealed[TAG_LEN] ^= 0xFF;
        let tampered = EncryptedBlob::new(base64_encode(&sealed), blob.nonce.clone());

        assert_eq!(decrypt(&tampered, &key), None);
    }

    #[test]
    fn test_decrypt_malformed_is_none() {
        let key = test_key();
        assert_eq!(decrypt(&EncryptedBlob::new("!!", "??"), &key), None);
        assert_eq!(decrypt(&EncryptedBlob::new("", ""), &key), None);
        let short_nonce = EncryptedBlob::new(base64_encode(&[0u8; 32]), base64_encode(&[0u8; 12]));
        assert_eq!(decrypt(&short_nonce, &key), None);
    }

    #[test]
    fn test_decrypt_non_utf8_plaintext_is_none() {
        let key = test_key();
        let nonce = generate_nonce();
        let sealed = secretbox_seal(&key, &nonce, &[0xff, 0xfe, 0x41]).unwrap();
        let blob = EncryptedBlob::new(base64_encode(&sealed), base64_encode(&nonce));

        assert!(matches!(open_blob(&blob, &key), Err(CryptoError::Decryption(_))));
        assert_eq!(decrypt(&blob, &key), None);
    }

    #[test]
    fn test_plain_sentinel_ignores_key() {
        let blob = EncryptedBlob::plain("server preview");
        assert_eq!(
            decrypt(&blob, &test_key()).as_deref(),
            Some("server preview")
        );
        assert_eq!(
            decrypt_with_key_b64(&blob, "not-a-key").as_deref(),
            Some("server preview")
        );
    }

    #[test]
    fn test_encrypt_value_stringifies_non_strings() {
        let key = test_key();
        let blob = encrypt_value(&serde_json::json!({"a": 1}), &key).unwrap();
        assert_eq!(decrypt(&blob, &key).as_deref(), Some(r#"{"a":1}"#));

        let blob = encrypt_value(&serde_json::json!("text"), &key).unwrap();
        assert_eq!(decrypt(&blob, &key).as_deref(), Some("text"));
    }

    #[test]
    fn test_key_b64_helpers() {
        let key = derive_key("aer_b64").unwrap();
        let blob = encrypt_with_key_b64("payload", &key.to_base64()).unwrap();
        assert_eq!(
            decrypt_with_key_b64(&blob, &key.to_base64()).as_deref(),
            Some("payload")
        );
        assert_eq!(decrypt_with_key_b64(&blob, "short"), None);
    }
}
