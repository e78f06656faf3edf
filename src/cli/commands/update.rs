//! `credvault update`: change fields of an existing credential.

use crate::cli::output;
use crate::cli::{open_session, read_entry_password, settings, Cli};
use crate::errors::{CredVaultError, Result};
use crate::password::generate_with_policy;
use crate::vault::EntryUpdate;

/// Flags collected from the `update` subcommand.
pub struct UpdateArgs<'a> {
    pub username: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub prompt_password: bool,
    pub generate: bool,
    pub length: Option<usize>,
}

/// Execute the `update` command.
pub fn execute(cli: &Cli, service: &str, args: &UpdateArgs<'_>) -> Result<()> {
    let settings = settings(cli)?;
    let mut session = open_session(cli)?;

    // Fail before prompting for a new password if the entry is missing.
    session.get(service)?;

    let mut changes = EntryUpdate::default();
    if let Some(username) = args.username {
        changes = changes.username(username);
    }
    if let Some(notes) = args.notes {
        changes = changes.notes(notes);
    }

    if args.generate {
        let mut policy = settings.password_policy();
        if let Some(length) = args.length {
            policy.length = length;
        }
        let generated = generate_with_policy(&policy)?;
        output::info(&format!("Generated password: {generated}"));
        output::print_strength(&session.score_strength(&generated));
        changes = changes.password(generated);
    } else if args.prompt_password {
        let password = read_entry_password(&format!("New password for {service}"))?;
        output::print_strength(&session.score_strength(&password));
        changes = changes.password(password.as_str());
    }

    if changes.is_empty() {
        return Err(CredVaultError::InvalidParameter(
            "nothing to update; pass --username, --notes, --password or --generate".into(),
        ));
    }

    session.update(service, changes)?;
    output::success(&format!("Entry for '{service}' updated"));

    Ok(())
}
