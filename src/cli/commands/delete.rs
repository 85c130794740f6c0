//! `notevault delete` — remove an item from the vault.

use std::path::Path;

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{unlock, Cli, VaultContext};
use crate::errors::{NoteVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    let ctx = VaultContext::from_cli(cli)?;
    let mut catalog = unlock(&ctx)?;

    let title = catalog
        .get(id)
        .map(|item| item.title.clone())
        .ok_or_else(|| NoteVaultError::ItemNotFound(id.to_string()))?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{title}'?"))
            .default(false)
            .interact()
            .map_err(|e| NoteVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let Some(removed) = catalog.remove(id)? else {
        return Err(NoteVaultError::ItemNotFound(id.to_string()));
    };

    // The imported copy belongs to the vault; the user's original is untouched.
    if removed.category.requires_file() {
        if let Err(e) = ctx.importer().discard(Path::new(&removed.content)) {
            output::warning(&format!("Item deleted but its file could not be removed: {e}"));
        }
    }

    output::success(&format!("Deleted '{title}'"));

    Ok(())
}
