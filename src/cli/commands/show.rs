//! `notevault show` — print one item including its content.

use crate::cli::output;
use crate::cli::{unlock, Cli, VaultContext};
use crate::errors::{NoteVaultError, Result};

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let ctx = VaultContext::from_cli(cli)?;
    let catalog = unlock(&ctx)?;

    let item = catalog
        .get(id)
        .ok_or_else(|| NoteVaultError::ItemNotFound(id.to_string()))?;
    output::print_item(item);

    Ok(())
}
