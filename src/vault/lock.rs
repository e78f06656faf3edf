//! Advisory lock that keeps a second handle out of an open vault.
//!
//! An exclusive, non-blocking lock is taken on `vault.lock` through
//! `fs4` (`flock` on Unix, `LockFileEx` on Windows).  It is released when
//! `VaultLock` is dropped; closing the file releases it as well.

use std::fs::File;
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use tracing::debug;

use super::format::{owner_only_options, LOCK_FILE};
use crate::errors::{CredVaultError, Result};

/// Holds the exclusive lock on a vault directory.
#[derive(Debug)]
pub struct VaultLock {
    file: File,
    path: PathBuf,
}

impl VaultLock {
    /// Take the lock for the vault in `dir`, failing fast if another
    /// handle already holds it.
    pub fn acquire(dir: &Path) -> Result<Self> {
        let path = dir.join(LOCK_FILE);
        let file = owner_only_options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        match FileExt::try_lock_exclusive(&file) {
            Ok(true) => {}
            Ok(false) => return Err(CredVaultError::VaultInUse(dir.to_path_buf())),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                return Err(CredVaultError::VaultInUse(dir.to_path_buf()));
            }
            Err(e) => return Err(CredVaultError::Io(e)),
        }
        debug!(path = %path.display(), "vault lock acquired");

        Ok(Self { file, path })
    }

    /// Path of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for VaultLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        debug!(path = %self.path.display(), "vault lock released");
    }
}
