//! Integration tests for token-derived secretbox encryption.
//!
//! This test suite validates:
//! - Cryptographic correctness (encrypt/decrypt roundtrips)
//! - Nonce discipline under sequential and concurrent use
//! - Failure signalling for wrong keys and malformed blobs
//! - Plain-sentinel pass-through

use std::collections::HashSet;

use aer_crypto::{
    base64_decode, base64_encode, decrypt, derive_key, derive_key_from_user_id, encrypt,
    open_blob, CryptoError, EncryptedBlob, NONCE_LEN,
};

// ============================================================================
// Test Category 1: Cryptographic Correctness
// ============================================================================

#[test]
fn test_roundtrip_for_varied_plaintexts() {
    let key = derive_key("aer_k5712abc").unwrap();

    let long = "x".repeat(200_000);
    let plaintexts = [
        "",
        "Hello world",
        "Title: Page\nURL: https://example.com\n\nBody text",
        "emoji 🚀 and CJK 漢字",
        long.as_str(),
    ];

    for plaintext in plaintexts {
        let blob = encrypt(plaintext, &key).unwrap();
        assert_eq!(decrypt(&blob, &key).as_deref(), Some(plaintext));
    }
}

#[test]
fn test_key_derivation_is_stable_across_calls() {
    let keys: Vec<String> = (0..5)
        .map(|_| derive_key("aer_stable").unwrap().to_base64())
        .collect();
    assert!(keys.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(keys[0], derive_key_from_user_id("stable").to_base64());
}

#[test]
fn test_token_without_prefix_fails() {
    for token in ["", "stable", "aer", "bearer aer_x", "aer_"] {
        assert!(
            matches!(derive_key(token), Err(CryptoError::InvalidTokenFormat)),
            "token {:?} should be rejected",
            token
        );
    }
}

// ============================================================================
// Test Category 2: Nonce Discipline
// ============================================================================

#[test]
fn test_sequential_nonces_unique() {
    let key = derive_key("aer_nonce").unwrap();
    let mut seen = HashSet::new();

    for _ in 0..1000 {
        let blob = encrypt("same text", &key).unwrap();
        assert_eq!(base64_decode(&blob.nonce).unwrap().len(), NONCE_LEN);
        assert!(seen.insert(blob.nonce), "nonce repeated");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_nonces_unique() {
    let mut handles = Vec::new();
    for _ in 0..8 {
        handles.push(tokio::spawn(async {
            let key = derive_key("aer_concurrent").unwrap();
            (0..200)
                .map(|i| encrypt(&format!("message {}", i), &key).unwrap().nonce)
                .collect::<Vec<_>>()
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        for nonce in handle.await.unwrap() {
            assert!(seen.insert(nonce), "nonce repeated across tasks");
        }
    }
    assert_eq!(seen.len(), 8 * 200);
}

// ============================================================================
// Test Category 3: Failure Signalling
// ============================================================================

#[test]
fn test_wrong_key_yields_none() {
    let blob = encrypt("private", &derive_key("aer_owner").unwrap()).unwrap();
    assert_eq!(decrypt(&blob, &derive_key("aer_other").unwrap()), None);
    assert!(matches!(
        open_blob(&blob, &derive_key("aer_other").unwrap()),
        Err(CryptoError::Authentication)
    ));
}

#[test]
fn test_swapped_nonce_yields_none() {
    let key = derive_key("aer_swap").unwrap();
    let a = encrypt("first", &key).unwrap();
    let b = encrypt("second", &key).unwrap();

    let mixed = EncryptedBlob::new(a.ciphertext, b.nonce);
    assert_eq!(decrypt(&mixed, &key), None);
}

#[test]
fn test_malformed_blobs_yield_none() {
    let key = derive_key("aer_malformed").unwrap();
    let cases = [
        EncryptedBlob::new("", ""),
        EncryptedBlob::new("not base64", base64_encode(&[0u8; NONCE_LEN])),
        EncryptedBlob::new(base64_encode(&[0u8; 40]), "not base64"),
        EncryptedBlob::new(base64_encode(&[0u8; 8]), base64_encode(&[0u8; NONCE_LEN])),
        EncryptedBlob::new(base64_encode(&[0u8; 40]), base64_encode(&[0u8; 23])),
    ];

    for blob in &cases {
        assert_eq!(decrypt(blob, &key), None, "blob {:?} should not open", blob);
    }
}

// ============================================================================
// Test Category 4: Plain Sentinel
// ============================================================================

#[test]
fn test_plain_sentinel_returned_verbatim() {
    let blob: EncryptedBlob =
        serde_json::from_str(r#"{"ciphertext":"Short server preview","nonce":"plain"}"#).unwrap();

    for token in ["aer_a", "aer_b"] {
        let key = derive_key(token).unwrap();
        assert_eq!(decrypt(&blob, &key).as_deref(), Some("Short server preview"));
    }
}
