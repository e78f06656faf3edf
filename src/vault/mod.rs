//! Vault module: encrypted credential storage.
//!
//! This module provides:
//! - `Entry` and `EntryUpdate` types (`entry`)
//! - Container file format, salt file, atomic writes (`format`)
//! - Advisory cross-process lock (`lock`)
//! - `VaultStore` for creating, opening and saving vaults (`store`)
//! - `EntryRepository` with add/get/search/update/delete/list (`repository`)
//! - Session entry points for the CLI layer (`session`)

pub mod entry;
pub mod format;
pub mod lock;
pub mod repository;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{Entry, EntryUpdate};
pub use repository::EntryRepository;
pub use session::{create_session, unlock_session, RepositoryHandle};
pub use store::VaultStore;
