//! `credvault strength`: rate a password without storing it.

use crate::cli::output;
use crate::cli::read_entry_password;
use crate::errors::Result;
use crate::password::score;

/// Execute the `strength` command.
pub fn execute(password: Option<&str>) -> Result<()> {
    let strength = match password {
        Some(pw) => {
            output::warning("Password provided on the command line may appear in shell history.");
            score(pw)
        }
        None => score(&read_entry_password("Password to rate")?),
    };

    output::print_strength(&strength);
    Ok(())
}
