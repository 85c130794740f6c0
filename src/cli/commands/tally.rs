//! `notevault tally` — count items per category.

use crate::cli::output;
use crate::cli::{unlock, Cli, VaultContext};
use crate::errors::Result;

/// Execute the `tally` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = VaultContext::from_cli(cli)?;
    let catalog = unlock(&ctx)?;

    output::print_tally_table(&catalog.tally());

    Ok(())
}
