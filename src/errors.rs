use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in CredVault.
#[derive(Debug, Error)]
pub enum CredVaultError {
    // --- Crypto errors ---
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Wrong passphrase and damaged data both land here on purpose.
    /// The message never says which one happened.
    #[error("Vault could not be unlocked")]
    LockedVault,

    // --- Vault errors ---
    #[error("Vault already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault at {0} is in use by another process")]
    VaultInUse(PathBuf),

    #[error("No entry found for '{0}'")]
    NotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for CredVault results.
pub type Result<T> = std::result::Result<T, CredVaultError>;
