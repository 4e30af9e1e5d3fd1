//! # aer-crypto
//!
//! Client-side end-to-end encryption for Aer context uploads.
//!
//! ## Cryptographic Primitives
//!
//! - **Key derivation**: SHA-256 of the user id embedded in an `aer_{userId}` token
//! - **Symmetric cipher**: XSalsa20-Poly1305 (NaCl secretbox, AEAD)
//! - **Nonces**: 24 random bytes per call from a CSPRNG
//! - **Encoding**: standard base64 for keys, nonces and ciphertext
//!
//! ## Blob Format
//!
//! ```text
//! { "ciphertext": base64(tag[16] || sealed), "nonce": base64(nonce[24]) }
//! { "ciphertext": "cleartext preview",       "nonce": "plain" }
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use aer_crypto::{decrypt, derive_key, encrypt};
//!
//! let key = derive_key("aer_user123").unwrap();
//! let blob = encrypt("Hello world", &key).unwrap();
//! assert_eq!(decrypt(&blob, &key).as_deref(), Some("Hello world"));
//! ```
//!
//! ```rust
//! use aer_crypto::{decrypt, derive_key, EncryptedBlob};
//!
//! let key = derive_key("aer_user123").unwrap();
//! let preview = EncryptedBlob::plain("served in the clear");
//! assert_eq!(decrypt(&preview, &key).as_deref(), Some("served in the clear"));
//! ```

pub mod blob;
pub mod cipher;
pub mod error;
pub mod format;
pub mod kdf;

// Re-export commonly used types
pub use blob::EncryptedBlob;
pub use cipher::{
    decrypt, decrypt_with_key_b64, encrypt, encrypt_value, encrypt_with_key_b64, generate_nonce,
    open_blob,
};
pub use error::{CryptoError, CryptoResult};
pub use format::{base64_decode, base64_encode, NONCE_LEN, PLAIN_NONCE};
pub use kdf::{derive_key, derive_key_from_user_id, user_id_from_token, DerivedKey, TOKEN_PREFIX};

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Token -> key -> seal -> open, as two independent clients would.
    #[test]
    fn test_independent_clients_share_key() {
        let writer_key = derive_key("aer_shared-user").unwrap();
        let blob = encrypt("context captured on device A", &writer_key).unwrap();

        // Device B only knows the user id handed back by search.
        let reader_key = derive_key_from_user_id("shared-user");
        assert_eq!(
            decrypt(&blob, &reader_key).as_deref(),
            Some("context captured on device A")
        );

        // Base64 transport of the key keeps it usable.
        assert_eq!(
            decrypt_with_key_b64(&blob, &reader_key.to_base64()).as_deref(),
            Some("context captured on device A")
        );
    }

    #[test]
    fn test_blob_survives_json() {
        let key = derive_key("aer_json").unwrap();
        let blob = encrypt("over the wire", &key).unwrap();

        let json = serde_json::to_string(&blob).unwrap();
        let parsed: EncryptedBlob = serde_json::from_str(&json).unwrap();

        assert_eq!(decrypt(&parsed, &key).as_deref(), Some("over the wire"));
    }
}
