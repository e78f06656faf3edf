//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count is a fixed constant.  It is never stored in the
//! vault, so changing it would lock every existing vault.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{CredVaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Number of PBKDF2 rounds applied to the master passphrase.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// A 32-byte key derived from the master passphrase.
///
/// Zeroed on drop and never written to disk.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"<redacted>")
            .finish()
    }
}

/// Derive a 32-byte key from a passphrase and salt.
///
/// The same passphrase + salt always produce the same key, which is what
/// lets a vault be reopened without storing the key anywhere.
pub fn derive(passphrase: &[u8], salt: &[u8]) -> Result<DerivedKey> {
    if salt.is_empty() {
        return Err(CredVaultError::ConfigurationError(
            "key derivation requires a non-empty salt".into(),
        ));
    }

    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase, salt, PBKDF2_ITERATIONS, &mut bytes);
    let key = DerivedKey::new(bytes);
    bytes.zeroize();

    Ok(key)
}

/// Generate a cryptographically random 16-byte salt from the OS.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.try_fill_bytes(&mut salt).map_err(|e| {
        CredVaultError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("OS random source failed: {e}"),
        ))
    })?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_salt_is_a_configuration_error() {
        let result = derive(b"passphrase", &[]);
        assert!(matches!(
            result,
            Err(CredVaultError::ConfigurationError(_))
        ));
    }

    #[test]
    fn debug_output_hides_key_bytes() {
        let key = DerivedKey::new([0x42; KEY_LEN]);
        let shown = format!("{key:?}");
        assert!(shown.contains("redacted"));
        assert!(!shown.contains("66"));
    }

    #[test]
    fn matches_pbkdf2_sha256_reference_vector() {
        // RFC 7914 section 11, PBKDF2-HMAC-SHA256 with P="passwd", S="salt", c=1.
        let mut out = [0u8; 32];
        pbkdf2_hmac::<Sha256>(b"passwd", b"salt", 1, &mut out);
        assert_eq!(
            out[..8],
            [0x55, 0xac, 0x04, 0x6e, 0x56, 0xe3, 0x08, 0x9f]
        );
    }
}
