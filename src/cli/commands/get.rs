//! `credvault get`: show one credential and copy its password.

use crate::cli::{clipboard, output};
use crate::cli::{open_session, settings, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, service: &str, no_copy: bool) -> Result<()> {
    let settings = settings(cli)?;
    let session = open_session(cli)?;

    let entry = session.get(service)?;
    output::print_entry(entry);

    if settings.copy_to_clipboard && !no_copy {
        match clipboard::copy(&entry.password) {
            Ok(()) => output::success("Password copied to clipboard."),
            Err(e) => output::warning(&e.to_string()),
        }
    }

    Ok(())
}
