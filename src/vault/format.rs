//! On-disk layout of a vault directory and the encrypted container format.
//!
//! A vault directory holds:
//!
//! ```text
//! salt.bin    16 random bytes, written once at creation
//! vault.enc   [CVLT: 4 bytes][version: 1 byte][nonce: 12 bytes][ciphertext + tag]
//! vault.lock  empty file used for the advisory lock
//! ```
//!
//! - **Magic** (`CVLT`) and **version** form the header.  The header is
//!   passed to AES-GCM as associated data, so editing it breaks the tag.
//! - The ciphertext decrypts to a JSON array of `Entry`.
//!
//! Every failure while opening a container (short file, bad header,
//! tag mismatch, bad JSON) is reported as `LockedVault`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;
use zeroize::Zeroizing;

use super::entry::Entry;
use crate::crypto::encryption::{decrypt_with_aad, encrypt_with_aad};
use crate::crypto::kdf::{DerivedKey, SALT_LEN};
use crate::errors::{CredVaultError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes at the start of every container file.
const MAGIC: &[u8; 4] = b"CVLT";

/// Current container format version.
pub const CURRENT_VERSION: u8 = 1;

/// Header size: 4 (magic) + 1 (version).
const HEADER_LEN: usize = 5;

/// File name of the salt inside the vault directory.
pub const SALT_FILE: &str = "salt.bin";

/// File name of the encrypted container inside the vault directory.
pub const VAULT_FILE: &str = "vault.enc";

/// File name of the advisory lock inside the vault directory.
pub const LOCK_FILE: &str = "vault.lock";

/// Paths of the files making up one vault.
#[derive(Debug, Clone)]
pub struct VaultPaths {
    pub dir: PathBuf,
    pub salt: PathBuf,
    pub container: PathBuf,
    pub lock: PathBuf,
}

impl VaultPaths {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            salt: dir.join(SALT_FILE),
            container: dir.join(VAULT_FILE),
            lock: dir.join(LOCK_FILE),
        }
    }
}

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

fn header() -> [u8; HEADER_LEN] {
    let mut h = [0u8; HEADER_LEN];
    h[..4].copy_from_slice(MAGIC);
    h[4] = CURRENT_VERSION;
    h
}

/// Serialize and encrypt the full entry list into container bytes.
pub fn seal(key: &DerivedKey, entries: &[Entry]) -> Result<Vec<u8>> {
    let json = Zeroizing::new(
        serde_json::to_vec(entries)
            .map_err(|e| CredVaultError::SerializationError(format!("entries: {e}")))?,
    );

    let header = header();
    let body = encrypt_with_aad(key.as_bytes(), &json, &header)?;

    let mut buf = Vec::with_capacity(HEADER_LEN + body.len());
    buf.extend_from_slice(&header);
    buf.extend_from_slice(&body);
    Ok(buf)
}

/// Decrypt container bytes back into the entry list.
pub fn unseal(key: &DerivedKey, data: &[u8]) -> Result<Vec<Entry>> {
    if data.len() < HEADER_LEN || &data[..4] != MAGIC || data[4] != CURRENT_VERSION {
        return Err(CredVaultError::LockedVault);
    }

    let (header, body) = data.split_at(HEADER_LEN);
    let plaintext = Zeroizing::new(decrypt_with_aad(key.as_bytes(), body, header)?);

    serde_json::from_slice(&plaintext).map_err(|_| CredVaultError::LockedVault)
}

// ---------------------------------------------------------------------------
// Salt
// ---------------------------------------------------------------------------

/// Read the salt file.  A salt of the wrong length is treated like any
/// other damage and reported as `LockedVault`.
pub fn read_salt(path: &Path) -> Result<Vec<u8>> {
    let salt = fs::read(path)?;
    if salt.len() != SALT_LEN {
        return Err(CredVaultError::LockedVault);
    }
    Ok(salt)
}

// ---------------------------------------------------------------------------
// Files and permissions
// ---------------------------------------------------------------------------

/// Write `bytes` to `path` **atomically**.
///
/// 1. Write to a temp file in the same directory (owner-only permissions).
/// 2. fsync the temp file.
/// 3. Rename it over the target path.
/// 4. fsync the directory.
///
/// Readers see either the old file or the new one, never a partial write.
/// Once the rename succeeds the new contents are in place, so a failed
/// directory fsync is logged and the write still reports success.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    replace_file(path, bytes, sync_dir)
}

fn replace_file(path: &Path, bytes: &[u8], sync_parent: fn(&Path) -> Result<()>) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let written = write_synced(&tmp_path, bytes);
    if let Err(e) = written.and_then(|()| fs::rename(&tmp_path, path).map_err(Into::into)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Err(e) = sync_parent(parent) {
        warn!(dir = %parent.display(), error = %e, "directory fsync failed after rename");
    }
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = owner_only_options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    // A stale temp file from a crash keeps its old mode; reset it.
    restrict_file(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    fs::File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<()> {
    Ok(())
}

/// `OpenOptions` that create files readable and writable by the owner only.
pub(crate) fn owner_only_options() -> OpenOptions {
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let mut options = OpenOptions::new();
        options.mode(0o600);
        options
    }

    #[cfg(not(unix))]
    {
        OpenOptions::new()
    }
}

/// Restrict an existing file to owner read/write (0600).
pub fn restrict_file(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}

/// Create the vault directory (if needed) and restrict it to the owner (0700).
pub fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }

    Ok(())
}
