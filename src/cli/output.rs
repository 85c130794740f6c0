//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use std::collections::BTreeMap;

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{Category, ContentKind, StoredItem};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of items (Title, Category, Stored, Id).
///
/// Content is left out so passwords never end up in a listing.
pub fn print_items_table(items: &[&StoredItem]) {
    if items.is_empty() {
        info("No matching items.");
        tip("Run `notevault add <CATEGORY> <TITLE>` to store something.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Title", "Category", "Stored", "Id"]);

    for item in items {
        table.add_row(vec![
            item.title.clone(),
            item.category.label().to_string(),
            item.stored_date.format("%Y-%m-%d %H:%M").to_string(),
            item.id.clone(),
        ]);
    }

    println!("{table}");
}

/// Print one item with its content.
pub fn print_item(item: &StoredItem) {
    let content_heading = match item.category.content_kind() {
        ContentKind::ImportedFile => "File",
        ContentKind::Text => "Note",
        ContentKind::Link => "Link",
        ContentKind::Secret => "Password",
    };

    println!("{}", style(&item.title).bold());
    println!("  {:<9}{}", style("Category").dim(), item.category);
    println!(
        "  {:<9}{}",
        style("Stored").dim(),
        item.stored_date.format("%Y-%m-%d %H:%M:%S")
    );
    println!("  {:<9}{}", style("Id").dim(), item.id);
    println!("  {:<9}{}", style(content_heading).dim(), item.content);
}

/// Print per-category counts plus a total row.
pub fn print_tally_table(tally: &BTreeMap<Category, usize>) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Items"]);

    for (category, count) in tally {
        table.add_row(vec![category.label().to_string(), count.to_string()]);
    }
    let total: usize = tally.values().sum();
    table.add_row(vec!["Total".to_string(), total.to_string()]);

    println!("{table}");
}
