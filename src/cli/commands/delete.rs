//! `credvault delete`: remove a credential from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::{CredVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, service: &str, force: bool) -> Result<()> {
    let mut session = open_session(cli)?;

    // Look the entry up first so we only ask about something that exists.
    let username = session.get(service)?.username.clone();

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry '{service}' ({username})?"))
            .default(false)
            .interact()
            .map_err(|e| CredVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    if !session.delete(service)? {
        return Err(CredVaultError::NotFound(service.to_string()));
    }

    output::success(&format!("Deleted entry '{service}'"));

    Ok(())
}
