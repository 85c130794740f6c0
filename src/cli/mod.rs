//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{NoteVaultError, Result};
use crate::vault::{AttachmentImporter, HashGate, VaultCatalog};

/// Environment variable consulted before prompting for the password.
pub const PASSWORD_ENV: &str = "NOTEVAULT_PASSWORD";

/// NoteVault CLI: a password-gated vault for notes, files, links and passwords.
#[derive(Parser)]
#[command(
    name = "notevault",
    about = "Password-gated local vault for photos, documents, notes, links and passwords",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (overrides `vault_dir` in .notevault.toml)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,

    /// Print diagnostic logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Set the vault password (first run only)
    Init,

    /// Add an item to the vault
    Add {
        /// Category: photo, document, text-note, website or password
        category: String,
        /// Display title
        title: String,
        /// Note text, URL or password (omit for a prompt)
        content: Option<String>,
        /// File to import (photo and document items)
        #[arg(short, long)]
        file: Option<String>,
        /// Name to store the imported copy under (default: the file's name)
        #[arg(long)]
        name: Option<String>,
    },

    /// List items, optionally filtered by a search query
    List {
        /// Case-insensitive text matched against title, content and category
        query: Option<String>,
    },

    /// Show a single item including its content
    Show {
        /// Item id
        id: String,
    },

    /// Delete an item
    Delete {
        /// Item id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Count items per category
    Tally,

    /// Copy an item's content to the clipboard
    Copy {
        /// Item id
        id: String,
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

/// Resolved vault location for one invocation.
#[derive(Debug, Clone)]
pub struct VaultContext {
    /// Directory relative vault paths are resolved against.
    pub project_dir: PathBuf,
    pub settings: Settings,
}

impl VaultContext {
    /// Load `.notevault.toml` from the working directory and apply the
    /// `--vault-dir` override.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let project_dir = std::env::current_dir()?;
        let mut settings = Settings::load(&project_dir)?;
        if let Some(dir) = &cli.vault_dir {
            settings.vault_dir.clone_from(dir);
        }
        Ok(Self {
            project_dir,
            settings,
        })
    }

    pub fn gate(&self) -> HashGate {
        HashGate::new(self.settings.credential_path(&self.project_dir))
    }

    pub fn catalog(&self) -> VaultCatalog {
        VaultCatalog::load(self.settings.catalog_path(&self.project_dir))
    }

    pub fn importer(&self) -> AttachmentImporter {
        AttachmentImporter::new(self.settings.attachments_path(&self.project_dir))
    }
}

/// Pass the password gate and load the catalog.
///
/// With no credential on disk this is the first-run flow: the user
/// picks a password, it is stored, and the vault opens.
pub fn unlock(ctx: &VaultContext) -> Result<VaultCatalog> {
    let gate = ctx.gate();

    if gate.has_credential() {
        let password = prompt_password()?;
        gate.unlock(&password)?;
    } else {
        output::info("No password is set for this vault yet.");
        let password = prompt_new_password()?;
        gate.set_credential(&password)?;
        output::success("Password set.");
    }

    Ok(ctx.catalog())
}

/// Get the vault password, trying in order:
/// 1. `NOTEVAULT_PASSWORD` env var (scripts)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault password")
        .interact()
        .map_err(|e| NoteVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (first run).
///
/// Also respects `NOTEVAULT_PASSWORD`. Empty passwords are refused.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose vault password")
            .with_confirmation(
                "Confirm vault password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| NoteVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.is_empty() {
            output::warning("Password cannot be empty. Try again.");
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}
