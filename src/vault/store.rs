//! Low-level vault persistence: salt file, container file, and lock.
//!
//! `VaultStore` owns the derived key and the advisory lock for one vault
//! directory.  It does not keep entries itself; `EntryRepository` holds
//! them and calls `save` with the full list after every change.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::crypto::kdf::{derive, generate_salt, DerivedKey};
use crate::errors::{CredVaultError, Result};

use super::entry::Entry;
use super::format::{self, VaultPaths};
use super::lock::VaultLock;

/// Handle on an unlocked vault directory.  Create one with
/// `VaultStore::create` or `VaultStore::open`.
pub struct VaultStore {
    /// Paths of the salt, container and lock files.
    paths: VaultPaths,

    /// The key derived from the master passphrase (zeroized on drop).
    key: DerivedKey,

    /// Held for as long as the store lives.
    _lock: VaultLock,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a brand-new vault in `dir`.
    ///
    /// Generates a random salt, derives the key from the passphrase, and
    /// writes the salt file followed by an encrypted empty entry list.
    pub fn create(dir: &Path, passphrase: &[u8]) -> Result<Self> {
        let paths = VaultPaths::new(dir);

        // Refuse before touching the directory's mode.
        if paths.container.exists() {
            return Err(CredVaultError::AlreadyExists(dir.to_path_buf()));
        }

        format::create_private_dir(dir)?;
        let lock = VaultLock::acquire(dir)?;

        // Another creator may have won the race before we took the lock.
        if paths.container.exists() {
            return Err(CredVaultError::AlreadyExists(dir.to_path_buf()));
        }

        // 1. Fresh salt, written before the container so that a container
        //    on disk always has its salt next to it.
        let salt = generate_salt()?;
        format::write_atomic(&paths.salt, &salt)?;

        // 2. Derive the key and persist an empty vault.
        let key = derive(passphrase, &salt)?;
        let store = Self {
            paths,
            key,
            _lock: lock,
        };
        store.save(&[])?;

        info!(dir = %dir.display(), "vault created");
        Ok(store)
    }

    /// Open an existing vault and decrypt its entries.
    ///
    /// A wrong passphrase and a damaged container both fail with
    /// `LockedVault`; nothing in the error tells them apart.
    pub fn open(dir: &Path, passphrase: &[u8]) -> Result<(Self, Vec<Entry>)> {
        let paths = VaultPaths::new(dir);
        if !Self::exists(dir) {
            return Err(CredVaultError::VaultNotFound(dir.to_path_buf()));
        }

        let lock = VaultLock::acquire(dir)?;

        let salt = format::read_salt(&paths.salt)?;
        let key = derive(passphrase, &salt)?;
        let data = fs::read(&paths.container)?;

        let entries = match format::unseal(&key, &data) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), "vault unlock rejected");
                return Err(e);
            }
        };

        debug!(dir = %dir.display(), entries = entries.len(), "vault opened");

        Ok((
            Self {
                paths,
                key,
                _lock: lock,
            },
            entries,
        ))
    }

    /// Returns `true` if both the salt and the container exist in `dir`.
    pub fn exists(dir: &Path) -> bool {
        let paths = VaultPaths::new(dir);
        paths.salt.is_file() && paths.container.is_file()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Encrypt the full entry list and replace the container atomically.
    pub fn save(&self, entries: &[Entry]) -> Result<()> {
        let sealed = format::seal(&self.key, entries)?;
        format::write_atomic(&self.paths.container, &sealed)?;

        debug!(entries = entries.len(), "vault saved");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the vault directory.
    pub fn dir(&self) -> &Path {
        &self.paths.dir
    }

    /// Returns the path to the encrypted container.
    pub fn container_path(&self) -> &Path {
        &self.paths.container
    }

    /// Returns the path to the salt file.
    pub fn salt_path(&self) -> &Path {
        &self.paths.salt
    }
}
