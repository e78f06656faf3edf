//! Entry and EntryUpdate types stored inside a vault.
//!
//! The whole `Vec<Entry>` is serialized to JSON and encrypted as one
//! blob, so entries themselves carry plaintext fields.  They only exist
//! in memory while a session is unlocked.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// A single credential record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Service name (e.g. "GitHub").  Not unique.
    pub service: String,

    /// Account name on that service.  May be empty.
    pub username: String,

    /// Plaintext password.  Wiped when the entry is dropped.
    pub password: String,

    /// Free-form notes.  May be empty.
    #[serde(default)]
    pub notes: String,

    /// When this entry was first added.
    pub created_at: DateTime<Utc>,

    /// When this entry was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Build a new entry stamped with the current time.
    pub fn new(service: &str, username: &str, password: &str, notes: &str) -> Self {
        let now = Utc::now();
        Self {
            service: service.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            notes: notes.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entry {
    /// Replace the password, wiping the old plaintext first.
    pub fn set_password(&mut self, password: String) {
        self.password.zeroize();
        self.password = password;
    }
}

impl Drop for Entry {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("service", &self.service)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("notes", &self.notes)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Replacement values for `EntryRepository::update`.
///
/// `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub notes: Option<String>,
}

impl EntryUpdate {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none() && self.notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_has_equal_timestamps() {
        let e = Entry::new("GitHub", "u@example.com", "x1!Q", "");
        assert_eq!(e.created_at, e.updated_at);
    }

    #[test]
    fn debug_redacts_password() {
        let e = Entry::new("GitHub", "octocat", "hunter2-secret", "");
        let shown = format!("{e:?}");
        assert!(shown.contains("octocat"));
        assert!(!shown.contains("hunter2-secret"));
    }

    #[test]
    fn notes_default_when_missing_from_json() {
        let json = r#"{
            "service": "mail",
            "username": "me",
            "password": "pw",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;
        let e: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(e.notes, "");
    }

    #[test]
    fn set_password_replaces_value_and_keeps_other_fields() {
        let mut e = Entry::new("GitHub", "octocat", "old-secret", "note");
        e.set_password("new-secret".to_string());
        assert_eq!(e.password, "new-secret");
        assert_eq!(e.username, "octocat");
        assert_eq!(e.notes, "note");
    }

    #[test]
    fn update_builder_sets_fields() {
        let u = EntryUpdate::default().password("new").notes("rotated");
        assert!(u.username.is_none());
        assert_eq!(u.password.as_deref(), Some("new"));
        assert_eq!(u.notes.as_deref(), Some("rotated"));
        assert!(!u.is_empty());
        assert!(EntryUpdate::default().is_empty());
    }
}
