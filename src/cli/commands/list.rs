//! `notevault list` — display items in a table, optionally filtered.

use crate::cli::output;
use crate::cli::{unlock, Cli, VaultContext};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, query: Option<&str>) -> Result<()> {
    let ctx = VaultContext::from_cli(cli)?;
    let catalog = unlock(&ctx)?;

    let query = query.unwrap_or("");
    let items = catalog.search(query);

    if query.is_empty() {
        output::info(&format!("{} item(s)", items.len()));
    } else {
        output::info(&format!(
            "{} of {} item(s) match '{query}'",
            items.len(),
            catalog.len()
        ));
    }

    output::print_items_table(&items);

    Ok(())
}
