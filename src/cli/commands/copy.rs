//! `notevault copy` — put an item's content on the clipboard.

use crate::cli::output;
use crate::cli::{unlock, Cli, VaultContext};
use crate::errors::{NoteVaultError, Result};

/// Execute the `copy` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let ctx = VaultContext::from_cli(cli)?;
    let catalog = unlock(&ctx)?;

    let item = catalog
        .get(id)
        .ok_or_else(|| NoteVaultError::ItemNotFound(id.to_string()))?;

    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| NoteVaultError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(item.content.clone())
        .map_err(|e| NoteVaultError::Clipboard(e.to_string()))?;

    output::success(&format!("Copied '{}' to the clipboard", item.title));

    Ok(())
}
