//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod clipboard;
pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{default_vault_dir, Settings};
use crate::errors::{CredVaultError, Result};
use crate::vault::{unlock_session, RepositoryHandle};

/// Minimum length for a new master passphrase.
const MIN_PASSPHRASE_LEN: usize = 8;

/// CredVault CLI: encrypted credential vault.
#[derive(Parser)]
#[command(
    name = "credvault",
    about = "Encrypted credential vault for the terminal",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: ~/.credvault)
    #[arg(long, env = "CREDVAULT_DIR", global = true)]
    pub vault_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault
    Init,

    /// Add a credential
    Add {
        /// Service name (e.g. GitHub)
        service: String,
        /// Username or email
        #[arg(short, long, default_value = "")]
        username: String,
        /// Free-form notes
        #[arg(short, long, default_value = "")]
        notes: String,
        /// Generate the password instead of prompting for it
        #[arg(short, long)]
        generate: bool,
        /// Length of the generated password (default from config)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Show a credential and copy its password
    Get {
        /// Service name
        service: String,
        /// Do not copy the password to the clipboard
        #[arg(long)]
        no_copy: bool,
    },

    /// List all credentials
    List,

    /// Search credentials by service or username
    Search {
        /// Case-insensitive text to look for
        query: String,
    },

    /// Update a credential
    Update {
        /// Service name
        service: String,
        /// New username
        #[arg(short, long)]
        username: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Prompt for a new password
        #[arg(short, long, conflicts_with = "generate")]
        password: bool,
        /// Generate a new password
        #[arg(short, long)]
        generate: bool,
        /// Length of the generated password (default from config)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Delete a credential
    Delete {
        /// Service name
        service: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password
    Generate {
        /// Password length (default from config)
        #[arg(short, long)]
        length: Option<usize>,
        /// Leave symbols out
        #[arg(long)]
        no_symbols: bool,
        /// Leave digits out
        #[arg(long)]
        no_numbers: bool,
        /// Copy the password to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// Rate a password's strength (reads stdin or prompts if omitted)
    Strength {
        /// Password to rate
        password: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault directory from the CLI arguments.
pub fn vault_dir(cli: &Cli) -> PathBuf {
    cli.vault_dir.clone().unwrap_or_else(default_vault_dir)
}

/// Load settings for the vault directory in use.
pub fn settings(cli: &Cli) -> Result<Settings> {
    Settings::load(&vault_dir(cli))
}

/// Get the master passphrase, trying in order:
/// 1. `CREDVAULT_PASSWORD` env var (scripting/tests)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| CredVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master passphrase with confirmation (used by `init`).
///
/// Also respects `CREDVAULT_PASSWORD`.  Enforces a minimum length.
pub fn prompt_new_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDVAULT_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSPHRASE_LEN {
                return Err(CredVaultError::InvalidParameter(format!(
                    "master password must be at least {MIN_PASSPHRASE_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let pw = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| CredVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if pw.len() < MIN_PASSPHRASE_LEN {
            output::warning(&format!(
                "Master password must be at least {MIN_PASSPHRASE_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(pw));
    }
}

/// Read a credential password from piped stdin, or prompt for it.
pub fn read_entry_password(prompt: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        return Ok(Zeroizing::new(
            buf.trim_end_matches(['\r', '\n']).to_string(),
        ));
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| CredVaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for the master passphrase and unlock the vault.
pub fn open_session(cli: &Cli) -> Result<RepositoryHandle> {
    let dir = vault_dir(cli);
    let passphrase = prompt_passphrase()?;
    unlock_session(&dir, &passphrase)
}
