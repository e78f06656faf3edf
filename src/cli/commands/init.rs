//! `credvault init`: create a new vault.

use crate::cli::output;
use crate::cli::{prompt_new_passphrase, vault_dir, Cli};
use crate::errors::{CredVaultError, Result};
use crate::vault::{create_session, VaultStore};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let dir = vault_dir(cli);

    // 1. Refuse to clobber an existing vault before asking for anything.
    if VaultStore::exists(&dir) {
        output::tip("Use `credvault add <SERVICE>` to add entries to the existing vault.");
        return Err(CredVaultError::AlreadyExists(dir));
    }

    // 2. Prompt for a new master password (with confirmation).
    let passphrase = prompt_new_passphrase()?;

    // 3. Create the salt and empty container.
    let session = create_session(&dir, &passphrase)?;

    output::success(&format!("Vault created at {}", session.dir().display()));
    output::warning("There is no way to recover a forgotten master password.");

    output::tip("Run `credvault add <SERVICE>` to store a credential.");
    output::tip("Run `credvault generate` to create a strong password.");

    Ok(())
}
