pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod password;
pub mod vault;

pub use errors::{CredVaultError, Result};
pub use vault::{create_session, unlock_session, RepositoryHandle};
