//! `notevault add` — store a new item, importing its file when needed.

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use crate::cli::output;
use crate::cli::{unlock, Cli, VaultContext};
use crate::errors::{NoteVaultError, Result};
use crate::vault::{AttachmentImporter, Category, ContentKind};

/// Arguments of the `add` command.
#[derive(Debug, Clone, Copy)]
pub struct AddArgs<'a> {
    pub category: &'a str,
    pub title: &'a str,
    pub content: Option<&'a str>,
    pub file: Option<&'a str>,
    pub name: Option<&'a str>,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: AddArgs<'_>) -> Result<()> {
    let category: Category = args.category.parse()?;

    // Reject bad argument combinations before asking for the password.
    check_args(category, &args)?;

    let ctx = VaultContext::from_cli(cli)?;
    let mut catalog = unlock(&ctx)?;
    let importer = ctx.importer();

    // File categories store the path of the imported copy as content.
    let (content, imported) = match args.file {
        Some(file) => {
            let path = import(&importer, Path::new(file), args.name)?;
            let content = path_to_content(&path)?;
            (content, Some(path))
        }
        None => (read_content(category, args.content)?, None),
    };

    let item = match catalog.create(args.title, category, content) {
        Ok(item) => item,
        Err(e) => {
            // Don't leave an orphaned copy when the item was never stored.
            if let Some(path) = imported {
                discard_unstored(&importer, &path);
            }
            return Err(e);
        }
    };

    output::success(&format!(
        "Added {} '{}' ({} item(s) total)",
        item.category,
        item.title,
        catalog.len()
    ));
    output::tip(&format!("Item id: {}", item.id));

    Ok(())
}

fn check_args(category: Category, args: &AddArgs<'_>) -> Result<()> {
    if args.title.trim().is_empty() {
        return Err(NoteVaultError::InvalidItem("title cannot be empty".into()));
    }

    match (category.requires_file(), args.file.is_some()) {
        (true, false) => Err(NoteVaultError::CommandFailed(format!(
            "{category} items need a file — use --file <PATH>"
        ))),
        (true, true) if args.content.is_some() => Err(NoteVaultError::CommandFailed(format!(
            "{category} items take their content from --file; drop the extra text argument"
        ))),
        (false, true) => Err(NoteVaultError::CommandFailed(
            "--file only applies to photo and document items".into(),
        )),
        _ => Ok(()),
    }
}

/// Remove an imported copy whose item was never stored. Returns `true`
/// when the copy is gone.
fn discard_unstored(importer: &AttachmentImporter, path: &Path) -> bool {
    match importer.discard(path) {
        Ok(removed) => removed,
        Err(e) => {
            output::warning(&format!(
                "Imported copy {} could not be removed: {e}",
                path.display()
            ));
            false
        }
    }
}

fn import(importer: &AttachmentImporter, source: &Path, name: Option<&str>) -> Result<PathBuf> {
    let suggested = match name {
        Some(name) => name.to_string(),
        None => source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    importer.import_file(source, &suggested)
}

fn path_to_content(path: &Path) -> Result<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        NoteVaultError::CommandFailed(format!(
            "imported file path {} is not valid UTF-8",
            path.display()
        ))
    })
}

/// Take content from the argument, a stdin pipe, or a prompt.
fn read_content(category: Category, inline: Option<&str>) -> Result<String> {
    if let Some(value) = inline {
        if category.content_kind() == ContentKind::Secret {
            output::warning("Password given on the command line — it may appear in shell history.");
        }
        return Ok(value.to_string());
    }

    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf.trim_end().to_string());
    }

    let prompt = format!("Enter {}", category.label().to_lowercase());
    let value = match category.content_kind() {
        ContentKind::Secret => dialoguer::Password::new().with_prompt(prompt).interact(),
        ContentKind::Text | ContentKind::Link | ContentKind::ImportedFile => {
            dialoguer::Input::<String>::new()
                .with_prompt(prompt)
                .interact_text()
        }
    };
    value.map_err(|e| NoteVaultError::CommandFailed(format!("input prompt: {e}")))
}
