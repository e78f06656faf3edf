//! Unlocked-vault session handed to the outer CLI layer.
//!
//! There is no global "current vault": each session is a value the
//! caller owns, so several vaults (or test harnesses) can be open at once.

use std::path::Path;

use crate::errors::Result;
use crate::password::{generator, strength, Strength};

use super::entry::{Entry, EntryUpdate};
use super::repository::EntryRepository;

/// Open the vault in `dir` with `passphrase`.
///
/// Fails with `LockedVault` on a wrong passphrase or damaged container.
pub fn unlock_session(dir: &Path, passphrase: &str) -> Result<RepositoryHandle> {
    let repo = EntryRepository::open(dir, passphrase.as_bytes())?;
    Ok(RepositoryHandle { repo })
}

/// Create a new vault in `dir` and return a session on it.
pub fn create_session(dir: &Path, passphrase: &str) -> Result<RepositoryHandle> {
    let repo = EntryRepository::create(dir, passphrase.as_bytes())?;
    Ok(RepositoryHandle { repo })
}

/// One unlocked vault.  Dropping the handle wipes the key and releases
/// the vault lock.
pub struct RepositoryHandle {
    repo: EntryRepository,
}

impl RepositoryHandle {
    pub fn add(&mut self, service: &str, username: &str, password: &str, notes: &str) -> Result<Entry> {
        self.repo.add(service, username, password, notes)
    }

    pub fn get(&self, service: &str) -> Result<&Entry> {
        self.repo.get(service)
    }

    pub fn search(&self, query: &str) -> Vec<&Entry> {
        self.repo.search(query)
    }

    pub fn update(&mut self, service: &str, changes: EntryUpdate) -> Result<Entry> {
        self.repo.update(service, changes)
    }

    pub fn delete(&mut self, service: &str) -> Result<bool> {
        self.repo.delete(service)
    }

    pub fn list(&self) -> &[Entry] {
        self.repo.list()
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }

    /// Vault directory this session is bound to.
    pub fn dir(&self) -> &Path {
        self.repo.store().dir()
    }

    /// Same as `password::generate`; does not touch the vault.
    pub fn generate_password(&self, length: usize, use_symbols: bool, use_numbers: bool) -> Result<String> {
        generator::generate(length, use_symbols, use_numbers)
    }

    /// Same as `password::score`; does not touch the vault.
    pub fn score_strength(&self, password: &str) -> Strength {
        strength::score(password)
    }
}
