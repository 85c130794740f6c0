use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in NoteVault.
#[derive(Debug, Error)]
pub enum NoteVaultError {
    // --- Storage errors ---
    /// Only produced internally; callers recover by treating the file as absent.
    #[error("Could not read {path}: {reason}")]
    StorageRead { path: PathBuf, reason: String },

    #[error("Could not write {path}: {source}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read source file {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Gate errors ---
    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("A password is already set for the vault at {0}")]
    CredentialAlreadyExists(PathBuf),

    // --- Catalog errors ---
    #[error("Item '{0}' not found")]
    ItemNotFound(String),

    #[error("Item id '{0}' is already in use")]
    DuplicateItemId(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NoteVaultError {
    /// Shorthand for a failed write to `path`.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageWrite {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for NoteVault results.
pub type Result<T> = std::result::Result<T, NoteVaultError>;
