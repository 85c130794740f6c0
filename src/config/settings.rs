use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{NoteVaultError, Result};

/// Vault layout settings, loaded from `.notevault.toml`.
///
/// Every field has a sensible default so NoteVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) holding the vault.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// File name of the credential record inside the vault directory.
    #[serde(default = "default_credential_file")]
    pub credential_file: String,

    /// File name of the catalog document inside the vault directory.
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    /// Sub-directory that receives imported attachment copies.
    #[serde(default = "default_attachments_dir")]
    pub attachments_dir: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".notevault".to_string()
}

fn default_credential_file() -> String {
    "credential".to_string()
}

fn default_catalog_file() -> String {
    "catalog.json".to_string()
}

fn default_attachments_dir() -> String {
    "attachments".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            credential_file: default_credential_file(),
            catalog_file: default_catalog_file(),
            attachments_dir: default_attachments_dir(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".notevault.toml";

    /// Load settings from `<project_dir>/.notevault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            NoteVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// The vault directory under `project_dir`.
    ///
    /// Example: `project_dir/.notevault`
    pub fn vault_root(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_dir)
    }

    pub fn credential_path(&self, project_dir: &Path) -> PathBuf {
        self.vault_root(project_dir).join(&self.credential_file)
    }

    pub fn catalog_path(&self, project_dir: &Path) -> PathBuf {
        self.vault_root(project_dir).join(&self.catalog_file)
    }

    pub fn attachments_path(&self, project_dir: &Path) -> PathBuf {
        self.vault_root(project_dir).join(&self.attachments_dir)
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
        assert_eq!(s.vault_dir, ".notevault");
        assert_eq!(s.credential_file, "credential");
        assert_eq!(s.catalog_file, "catalog.json");
        assert_eq!(s.attachments_dir, "attachments");
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_dir = "private"
credential_file = "pin"
catalog_file = "items.json"
attachments_dir = "files"
"#;
        fs::write(tmp.path().join(".notevault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, "private");
        assert_eq!(settings.credential_file, "pin");
        assert_eq!(settings.catalog_file, "items.json");
        assert_eq!(settings.attachments_dir, "files");
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".notevault.toml"), "vault_dir = \"vault\"\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, "vault");
        assert_eq!(settings.catalog_file, "catalog.json");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".notevault.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(NoteVaultError::ConfigError(_))));
    }

    #[test]
    fn paths_are_built_under_the_vault_dir() {
        let s = Settings::default();
        let project = Path::new("/home/user");
        assert_eq!(
            s.credential_path(project),
            PathBuf::from("/home/user/.notevault/credential")
        );
        assert_eq!(
            s.catalog_path(project),
            PathBuf::from("/home/user/.notevault/catalog.json")
        );
        assert_eq!(
            s.attachments_path(project),
            PathBuf::from("/home/user/.notevault/attachments")
        );
    }

    #[test]
    fn absolute_vault_dir_replaces_project_dir() {
        let s = Settings {
            vault_dir: "/srv/vault".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            s.catalog_path(Path::new("/home/user")),
            PathBuf::from("/srv/vault/catalog.json")
        );
    }
}
