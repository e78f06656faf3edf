//! Integration tests for the CredVault crypto module.

use credvault::crypto::kdf::{KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
use credvault::crypto::{decrypt, derive, encrypt, generate_salt};
use credvault::CredVaultError;

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = [0xABu8; 32];
    let plaintext = br#"[{"service":"GitHub","password":"x1!Q"}]"#;

    let ciphertext = encrypt(&key, plaintext).expect("encrypt should succeed");

    // Ciphertext must be longer than plaintext (12-byte nonce + 16-byte tag).
    assert!(ciphertext.len() > plaintext.len());

    let recovered = decrypt(&key, &ciphertext).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = [0xCDu8; 32];
    let plaintext = b"same payload";

    let ct1 = encrypt(&key, plaintext).expect("encrypt 1");
    let ct2 = encrypt(&key, plaintext).expect("encrypt 2");

    // Each call picks a fresh nonce, so the outputs (and their nonces) differ.
    assert_ne!(ct1, ct2);
    assert_ne!(ct1[..12], ct2[..12], "nonce must not be reused");
}

#[test]
fn decrypt_with_wrong_key_is_locked_vault() {
    let key = [0x11u8; 32];
    let wrong_key = [0x22u8; 32];

    let ciphertext = encrypt(&key, b"top secret").expect("encrypt");
    let result = decrypt(&wrong_key, &ciphertext);

    assert!(matches!(result, Err(CredVaultError::LockedVault)));
}

#[test]
fn decrypt_with_truncated_data_fails() {
    let key = [0xAAu8; 32];
    assert!(matches!(
        decrypt(&key, &[0u8; 5]),
        Err(CredVaultError::LockedVault)
    ));
    // A nonce with no tag is still too short.
    assert!(matches!(
        decrypt(&key, &[0u8; 20]),
        Err(CredVaultError::LockedVault)
    ));
}

#[test]
fn flipping_any_byte_fails_authentication() {
    let key = [0xBBu8; 32];
    let ciphertext = encrypt(&key, b"VALUE=abc").expect("encrypt");

    for i in 0..ciphertext.len() {
        let mut tampered = ciphertext.clone();
        tampered[i] ^= 0x01;
        assert!(
            matches!(decrypt(&key, &tampered), Err(CredVaultError::LockedVault)),
            "flip at offset {i} was not detected"
        );
    }
}

// ---------------------------------------------------------------------------
// Key derivation (PBKDF2-HMAC-SHA256)
// ---------------------------------------------------------------------------

#[test]
fn iteration_count_is_in_the_hardened_range() {
    assert!(PBKDF2_ITERATIONS >= 10_000);
    assert!(PBKDF2_ITERATIONS <= 1_000_000);
}

#[test]
fn derive_same_inputs_same_output() {
    let salt = generate_salt().expect("salt");

    let key1 = derive(b"my-secure-passphrase", &salt).expect("derive 1");
    let key2 = derive(b"my-secure-passphrase", &salt).expect("derive 2");

    assert_eq!(key1.as_bytes(), key2.as_bytes());
    assert_eq!(key1.as_bytes().len(), KEY_LEN);
}

#[test]
fn derive_different_salts_different_keys() {
    let salt1 = generate_salt().expect("salt 1");
    let salt2 = generate_salt().expect("salt 2");
    assert_ne!(salt1, salt2);

    let key1 = derive(b"same-password", &salt1).expect("derive 1");
    let key2 = derive(b"same-password", &salt2).expect("derive 2");

    assert_ne!(key1.as_bytes(), key2.as_bytes());
}

#[test]
fn derive_different_passwords_different_keys() {
    let salt = [0x5Au8; SALT_LEN];

    let key1 = derive(b"password-one", &salt).expect("derive 1");
    let key2 = derive(b"password-two", &salt).expect("derive 2");

    assert_ne!(key1.as_bytes(), key2.as_bytes());
}

#[test]
fn derive_rejects_empty_salt() {
    assert!(matches!(
        derive(b"pw", b""),
        Err(CredVaultError::ConfigurationError(_))
    ));
}

// ---------------------------------------------------------------------------
// End-to-end: passphrase -> key -> encrypt/decrypt
// ---------------------------------------------------------------------------

#[test]
fn full_crypto_pipeline() {
    let salt = generate_salt().expect("salt");

    let key = derive(b"hunter2", &salt).expect("derive");
    let ciphertext = encrypt(key.as_bytes(), b"payload").expect("encrypt");

    // Re-deriving on a "later run" reproduces the key.
    let again = derive(b"hunter2", &salt).expect("derive again");
    let recovered = decrypt(again.as_bytes(), &ciphertext).expect("decrypt");
    assert_eq!(recovered, b"payload");

    let wrong = derive(b"hunter3", &salt).expect("derive wrong");
    assert!(decrypt(wrong.as_bytes(), &ciphertext).is_err());
}
