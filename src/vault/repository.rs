//! In-memory credential list backed by a `VaultStore`.
//!
//! Every successful mutation re-encrypts and saves the whole list before
//! returning.  If that save fails, the in-memory change is undone so the
//! repository never holds state that is not on disk.

use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::errors::{CredVaultError, Result};

use super::entry::{Entry, EntryUpdate};
use super::store::VaultStore;

/// Decrypted entries of one unlocked vault.
pub struct EntryRepository {
    store: VaultStore,
    /// Insertion order is preserved and is the order `list`/`search` use.
    entries: Vec<Entry>,
}

impl EntryRepository {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a new, empty vault in `dir`.
    pub fn create(dir: &Path, passphrase: &[u8]) -> Result<Self> {
        let store = VaultStore::create(dir, passphrase)?;
        Ok(Self {
            store,
            entries: Vec::new(),
        })
    }

    /// Open and decrypt the vault in `dir`.
    pub fn open(dir: &Path, passphrase: &[u8]) -> Result<Self> {
        let (store, entries) = VaultStore::open(dir, passphrase)?;
        Ok(Self { store, entries })
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Add a new entry and save.
    ///
    /// Duplicate service names are allowed (several accounts per service).
    pub fn add(&mut self, service: &str, username: &str, password: &str, notes: &str) -> Result<Entry> {
        if service.trim().is_empty() {
            return Err(CredVaultError::InvalidParameter(
                "service name cannot be empty".into(),
            ));
        }
        if password.is_empty() {
            return Err(CredVaultError::InvalidParameter(
                "password cannot be empty".into(),
            ));
        }

        let entry = Entry::new(service, username, password, notes);
        self.entries.push(entry.clone());

        if let Err(e) = self.store.save(&self.entries) {
            self.entries.pop();
            return Err(e);
        }

        info!(total = self.entries.len(), "entry added");
        Ok(entry)
    }

    /// Look up an entry by exact service name.
    ///
    /// When several entries share the name, the one with the latest
    /// `updated_at` is returned; on equal timestamps the one added last wins.
    pub fn get(&self, service: &str) -> Result<&Entry> {
        self.find_index(service)
            .map(|idx| &self.entries[idx])
            .ok_or_else(|| CredVaultError::NotFound(service.to_string()))
    }

    /// Case-insensitive substring search over service and username.
    ///
    /// Results keep insertion order.  An empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&Entry> {
        if query.is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.service.to_lowercase().contains(&needle)
                    || e.username.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Apply `changes` to the entry `get(service)` would return, then save.
    pub fn update(&mut self, service: &str, changes: EntryUpdate) -> Result<Entry> {
        let idx = self
            .find_index(service)
            .ok_or_else(|| CredVaultError::NotFound(service.to_string()))?;

        if changes.is_empty() {
            return Err(CredVaultError::InvalidParameter(
                "nothing to update".into(),
            ));
        }
        if changes.password.as_deref() == Some("") {
            return Err(CredVaultError::InvalidParameter(
                "password cannot be empty".into(),
            ));
        }

        let previous = self.entries[idx].clone();
        {
            let entry = &mut self.entries[idx];
            if let Some(username) = changes.username {
                entry.username = username;
            }
            if let Some(password) = changes.password {
                entry.set_password(password);
            }
            if let Some(notes) = changes.notes {
                entry.notes = notes;
            }
            entry.updated_at = Utc::now().max(previous.updated_at);
        }

        if let Err(e) = self.store.save(&self.entries) {
            self.entries[idx] = previous;
            return Err(e);
        }

        info!("entry updated");
        Ok(self.entries[idx].clone())
    }

    /// Remove the entry `get(service)` would return.
    ///
    /// Returns `false` without touching the container if nothing matched.
    pub fn delete(&mut self, service: &str) -> Result<bool> {
        let Some(idx) = self.find_index(service) else {
            return Ok(false);
        };

        let removed = self.entries.remove(idx);
        if let Err(e) = self.store.save(&self.entries) {
            self.entries.insert(idx, removed);
            return Err(e);
        }

        info!(total = self.entries.len(), "entry deleted");
        Ok(true)
    }

    /// All entries in insertion order.
    pub fn list(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries in the vault.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the vault holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The underlying store (paths, lock).
    pub fn store(&self) -> &VaultStore {
        &self.store
    }

    fn find_index(&self, service: &str) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.service == service)
            .max_by_key(|(idx, e)| (e.updated_at, *idx))
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> (TempDir, EntryRepository) {
        let dir = TempDir::new().unwrap();
        let repo = EntryRepository::create(dir.path(), b"unit-test-pw").unwrap();
        (dir, repo)
    }

    #[test]
    fn add_rejects_empty_service_and_password() {
        let (_dir, mut repo) = repo();
        assert!(matches!(
            repo.add("", "u", "p", ""),
            Err(CredVaultError::InvalidParameter(_))
        ));
        assert!(matches!(
            repo.add("   ", "u", "p", ""),
            Err(CredVaultError::InvalidParameter(_))
        ));
        assert!(matches!(
            repo.add("svc", "u", "", ""),
            Err(CredVaultError::InvalidParameter(_))
        ));
        assert!(repo.is_empty());
    }

    #[test]
    fn get_prefers_most_recently_updated_duplicate() {
        let (_dir, mut repo) = repo();
        repo.add("mail", "first", "p1", "").unwrap();
        repo.add("mail", "second", "p2", "").unwrap();

        // Later insertion wins while neither has been touched since.
        assert_eq!(repo.get("mail").unwrap().username, "second");

        // Touch the older one: it becomes the most recently updated.
        let mut changed = repo.list()[0].clone();
        changed.updated_at = Utc::now() + chrono::Duration::seconds(5);
        repo.entries[0] = changed;
        assert_eq!(repo.get("mail").unwrap().username, "first");
    }

    #[test]
    fn get_is_case_sensitive() {
        let (_dir, mut repo) = repo();
        repo.add("GitHub", "u", "p", "").unwrap();
        assert!(matches!(
            repo.get("github"),
            Err(CredVaultError::NotFound(_))
        ));
    }

    #[test]
    fn search_matches_service_or_username_case_insensitively() {
        let (_dir, mut repo) = repo();
        repo.add("GitHub", "octo@example.com", "p", "").unwrap();
        repo.add("Mail", "someone", "p", "").unwrap();
        repo.add("Bank", "OCTOPUS", "p", "").unwrap();

        let hits: Vec<&str> = repo.search("octo").iter().map(|e| e.service.as_str()).collect();
        assert_eq!(hits, vec!["GitHub", "Bank"]);

        assert_eq!(repo.search("MAIL").len(), 1);
        assert!(repo.search("").is_empty());
        assert!(repo.search("zzz").is_empty());
    }

    #[test]
    fn update_changes_only_given_fields_and_bumps_timestamp() {
        let (_dir, mut repo) = repo();
        let original = repo.add("svc", "user", "old-pw", "note").unwrap();

        let updated = repo
            .update("svc", EntryUpdate::default().password("new-pw"))
            .unwrap();

        assert_eq!(updated.username, "user");
        assert_eq!(updated.password, "new-pw");
        assert_eq!(updated.notes, "note");
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
    }

    #[test]
    fn update_rejects_empty_password() {
        let (_dir, mut repo) = repo();
        repo.add("svc", "user", "pw", "").unwrap();
        assert!(matches!(
            repo.update("svc", EntryUpdate::default().password("")),
            Err(CredVaultError::InvalidParameter(_))
        ));
        assert_eq!(repo.get("svc").unwrap().password, "pw");
    }

    #[test]
    fn update_missing_is_not_found() {
        let (_dir, mut repo) = repo();
        assert!(matches!(
            repo.update("nope", EntryUpdate::default().notes("x")),
            Err(CredVaultError::NotFound(_))
        ));
    }

    #[test]
    fn delete_removes_one_duplicate_at_a_time() {
        let (_dir, mut repo) = repo();
        repo.add("mail", "a", "p", "").unwrap();
        repo.add("mail", "b", "p", "").unwrap();

        assert!(repo.delete("mail").unwrap());
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.list()[0].username, "a");

        assert!(repo.delete("mail").unwrap());
        assert!(!repo.delete("mail").unwrap());
        assert!(repo.is_empty());
    }

    #[test]
    fn list_keeps_insertion_order() {
        let (_dir, mut repo) = repo();
        for name in ["zeta", "alpha", "mid"] {
            repo.add(name, "", "pw", "").unwrap();
        }
        let names: Vec<&str> = repo.list().iter().map(|e| e.service.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn empty_update_is_rejected_without_saving() {
        let (_dir, mut repo) = repo();
        let original = repo.add("svc", "user", "pw", "").unwrap();
        let container = repo.store().container_path().to_path_buf();
        let before = std::fs::read(&container).unwrap();

        assert!(matches!(
            repo.update("svc", EntryUpdate::default()),
            Err(CredVaultError::InvalidParameter(_))
        ));
        assert_eq!(repo.get("svc").unwrap().updated_at, original.updated_at);
        assert_eq!(std::fs::read(&container).unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    fn save_committed_by_rename_is_kept_in_memory() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, mut repo) = repo();
        // Write and search permission only: the rename works, the
        // directory cannot be opened for fsync.
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o300)).unwrap();
        if std::fs::File::open(dir.path()).is_ok() {
            // Running with privileges that bypass directory permissions.
            std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o700)).unwrap();
            return;
        }

        let added = repo.add("svc", "user", "pw", "");
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o700)).unwrap();

        assert!(added.is_ok());
        assert_eq!(repo.len(), 1);

        drop(repo);
        let reopened = EntryRepository::open(dir.path(), b"unit-test-pw").unwrap();
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn failed_save_rolls_back_every_mutation() {
        let (dir, mut repo) = repo();
        repo.add("keep", "user", "pw", "note").unwrap();
        let before = repo.list().to_vec();

        // With the directory gone the temp file cannot be created.
        std::fs::remove_dir_all(dir.path()).unwrap();

        assert!(repo.add("new", "", "pw", "").is_err());
        assert_eq!(repo.list(), before.as_slice());

        assert!(repo
            .update("keep", EntryUpdate::default().password("changed"))
            .is_err());
        assert_eq!(repo.list(), before.as_slice());

        assert!(repo.delete("keep").is_err());
        assert_eq!(repo.list(), before.as_slice());
    }
}
