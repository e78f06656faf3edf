//! Random password generation.
//!
//! Characters are drawn uniformly from the pool with `rand::rng()`, a
//! ChaCha-based CSPRNG seeded and periodically reseeded from the OS.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{CredVaultError, Result};

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Longest password `generate` will produce.
pub const MAX_LENGTH: usize = 4096;

/// What a generated password may contain.
///
/// Letters (both cases) are always in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    pub length: usize,
    pub use_symbols: bool,
    pub use_numbers: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: 16,
            use_symbols: true,
            use_numbers: true,
        }
    }
}

impl PasswordPolicy {
    /// The character pool this policy draws from.
    pub fn pool(&self) -> Vec<u8> {
        let mut pool = Vec::with_capacity(
            LOWERCASE.len() + UPPERCASE.len() + DIGITS.len() + SYMBOLS.len(),
        );
        pool.extend_from_slice(LOWERCASE.as_bytes());
        pool.extend_from_slice(UPPERCASE.as_bytes());
        if self.use_numbers {
            pool.extend_from_slice(DIGITS.as_bytes());
        }
        if self.use_symbols {
            pool.extend_from_slice(SYMBOLS.as_bytes());
        }
        pool
    }
}

/// Generate a password of `length` characters.
pub fn generate(length: usize, use_symbols: bool, use_numbers: bool) -> Result<String> {
    generate_with_policy(&PasswordPolicy {
        length,
        use_symbols,
        use_numbers,
    })
}

/// Generate a password following `policy`.
pub fn generate_with_policy(policy: &PasswordPolicy) -> Result<String> {
    if policy.length < 1 {
        return Err(CredVaultError::InvalidParameter(
            "password length must be at least 1".into(),
        ));
    }
    if policy.length > MAX_LENGTH {
        return Err(CredVaultError::InvalidParameter(format!(
            "password length cannot exceed {MAX_LENGTH}"
        )));
    }

    let pool = policy.pool();
    let mut rng = rand::rng();

    let password = (0..policy.length)
        .map(|_| char::from(pool[rng.random_range(0..pool.len())]))
        .collect();

    Ok(password)
}
