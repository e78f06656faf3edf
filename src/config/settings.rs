use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CredVaultError, Result};
use crate::password::generator::{PasswordPolicy, MAX_LENGTH};

/// Per-vault preferences, loaded from `<vault_dir>/config.toml`.
///
/// Every field has a sensible default so CredVault works out-of-the-box
/// without any config file at all.  Nothing here affects key derivation
/// or the container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Length of generated passwords (default: 16).
    #[serde(default = "default_password_length")]
    pub password_length: usize,

    /// Include symbols in generated passwords (default: true).
    #[serde(default = "default_true")]
    pub use_symbols: bool,

    /// Include digits in generated passwords (default: true).
    #[serde(default = "default_true")]
    pub use_numbers: bool,

    /// Copy retrieved or generated passwords to the clipboard (default: true).
    #[serde(default = "default_true")]
    pub copy_to_clipboard: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_password_length() -> usize {
    16
}

fn default_true() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            password_length: default_password_length(),
            use_symbols: default_true(),
            use_numbers: default_true(),
            copy_to_clipboard: default_true(),
        }
    }
}

impl Settings {
    /// Name of the config file inside the vault directory.
    pub const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<vault_dir>/config.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If it exists but cannot be parsed or holds bad values, an error
    /// is returned.
    pub fn load(vault_dir: &Path) -> Result<Self> {
        let config_path = vault_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CredVaultError::ConfigurationError(format!(
                "Failed to parse {}: {e}",
                config_path.display()
            ))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the generator would refuse anyway.
    pub fn validate(&self) -> Result<()> {
        if self.password_length < 1 || self.password_length > MAX_LENGTH {
            return Err(CredVaultError::ConfigurationError(format!(
                "password_length must be between 1 and {MAX_LENGTH} (got {})",
                self.password_length
            )));
        }
        Ok(())
    }

    /// Generator policy built from these settings.
    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            length: self.password_length,
            use_symbols: self.use_symbols,
            use_numbers: self.use_numbers,
        }
    }
}

/// Default vault directory: `$CREDVAULT_DIR`, else `$HOME/.credvault`,
/// else `.credvault` in the current directory.
pub fn default_vault_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CREDVAULT_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(".credvault"),
        _ => PathBuf::from(".credvault"),
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.password_length, 16);
        assert!(s.use_symbols);
        assert!(s.use_numbers);
        assert!(s.copy_to_clipboard);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.password_length, 16);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
password_length = 24
use_symbols = false
use_numbers = true
copy_to_clipboard = false
"#;
        fs::write(tmp.path().join("config.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.password_length, 24);
        assert!(!settings.use_symbols);
        assert!(settings.use_numbers);
        assert!(!settings.copy_to_clipboard);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "use_symbols = false\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(!settings.use_symbols);
        // Rest should be defaults
        assert_eq!(settings.password_length, 16);
        assert!(settings.copy_to_clipboard);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "not valid {{toml").unwrap();

        assert!(matches!(
            Settings::load(tmp.path()),
            Err(CredVaultError::ConfigurationError(_))
        ));
    }

    #[test]
    fn load_rejects_zero_length() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "password_length = 0\n").unwrap();

        assert!(matches!(
            Settings::load(tmp.path()),
            Err(CredVaultError::ConfigurationError(_))
        ));
    }

    #[test]
    fn password_policy_mirrors_settings() {
        let s = Settings {
            password_length: 30,
            use_symbols: false,
            ..Settings::default()
        };
        let policy = s.password_policy();
        assert_eq!(policy.length, 30);
        assert!(!policy.use_symbols);
        assert!(policy.use_numbers);
    }
}
