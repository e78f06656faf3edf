//! `credvault search`: find credentials by service or username.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::{CredVaultError, Result};

/// Execute the `search` command.
pub fn execute(cli: &Cli, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(CredVaultError::InvalidParameter(
            "search query cannot be empty".into(),
        ));
    }

    let session = open_session(cli)?;
    let results = session.search(query);

    if results.is_empty() {
        output::info(&format!("No entries found matching '{query}'"));
        return Ok(());
    }

    output::info(&format!("{} match(es) for '{query}'", results.len()));
    output::print_entries_table(&results);

    Ok(())
}
