//! `credvault add`: store a new credential.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_session, read_entry_password, settings, Cli};
use crate::errors::Result;
use crate::password::generate_with_policy;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    service: &str,
    username: &str,
    notes: &str,
    generate: bool,
    length: Option<usize>,
) -> Result<()> {
    let settings = settings(cli)?;
    let mut session = open_session(cli)?;

    if session.get(service).is_ok() {
        output::warning(&format!(
            "An entry for '{service}' already exists; adding another account."
        ));
    }

    // The password comes from the generator, piped stdin, or a prompt.
    let password = if generate {
        let mut policy = settings.password_policy();
        if let Some(length) = length {
            policy.length = length;
        }
        let generated = Zeroizing::new(generate_with_policy(&policy)?);
        output::info(&format!("Generated password: {}", generated.as_str()));
        generated
    } else {
        read_entry_password(&format!("Password for {service}"))?
    };

    output::print_strength(&session.score_strength(&password));

    session.add(service, username, &password, notes)?;

    output::success(&format!(
        "Entry for '{service}' added ({} total)",
        session.len()
    ));

    Ok(())
}
