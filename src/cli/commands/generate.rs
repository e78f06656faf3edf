//! `credvault generate`: print a random password.  Does not unlock the vault.

use crate::cli::{clipboard, output};
use crate::cli::{settings, Cli};
use crate::errors::Result;
use crate::password::{generate_with_policy, score};

/// Execute the `generate` command.
pub fn execute(
    cli: &Cli,
    length: Option<usize>,
    no_symbols: bool,
    no_numbers: bool,
    copy: bool,
) -> Result<()> {
    let mut policy = settings(cli)?.password_policy();
    if let Some(length) = length {
        policy.length = length;
    }
    if no_symbols {
        policy.use_symbols = false;
    }
    if no_numbers {
        policy.use_numbers = false;
    }

    let password = generate_with_policy(&policy)?;
    println!("{password}");
    output::print_strength(&score(&password));

    if copy {
        match clipboard::copy(&password) {
            Ok(()) => output::success("Password copied to clipboard."),
            Err(e) => output::warning(&e.to_string()),
        }
    }

    Ok(())
}
