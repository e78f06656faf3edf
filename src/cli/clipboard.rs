//! System clipboard access for copying passwords.

use crate::errors::{CredVaultError, Result};

/// Put `text` on the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| CredVaultError::CommandFailed(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| CredVaultError::CommandFailed(format!("clipboard write failed: {e}")))
}
