//! `notevault init` — first-run set-up: choose the vault password.

use std::fs;

use crate::cli::output;
use crate::cli::{prompt_new_password, Cli, VaultContext};
use crate::errors::{NoteVaultError, Result};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = VaultContext::from_cli(cli)?;
    let vault_root = ctx.settings.vault_root(&ctx.project_dir);
    let gate = ctx.gate();

    // 1. Refuse to replace an existing password; there is no change flow.
    if gate.has_credential() {
        output::tip("The vault already has a password. Run `notevault list` to open it.");
        return Err(NoteVaultError::CredentialAlreadyExists(gate.path().to_path_buf()));
    }

    // 2. Create the vault directory if it doesn't exist.
    if !vault_root.exists() {
        fs::create_dir_all(&vault_root).map_err(|e| NoteVaultError::write(&vault_root, e))?;
        output::info(&format!("Created vault directory: {}", vault_root.display()));
    }

    // 3. Prompt for a new password (with confirmation) and store its digest.
    let password = prompt_new_password()?;
    gate.initialize(&password)?;

    output::success(&format!("Vault ready at {}", vault_root.display()));
    output::tip("Run `notevault add <CATEGORY> <TITLE>` to add an item.");
    output::tip("Run `notevault list` to see all items.");

    Ok(())
}
