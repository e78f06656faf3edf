//! `credvault list`: show every credential (without passwords).

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;
use crate::vault::Entry;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let session = open_session(cli)?;

    if session.is_empty() {
        output::info("No entries in this vault yet.");
        output::tip("Run `credvault add <SERVICE>` to add your first credential.");
        return Ok(());
    }

    let mut entries: Vec<&Entry> = session.list().iter().collect();
    entries.sort_by_key(|e| e.service.to_lowercase());

    output::info(&format!("{} entr(ies)", entries.len()));
    output::print_entries_table(&entries);

    Ok(())
}
