//! `StoredItem` and the closed `Category` set.
//!
//! Everything that differs between categories (wire index, display
//! label, whether `content` is an imported file, how content is
//! validated) is kept in the single `Category::traits` table so a new
//! category is a one-place change that the compiler checks.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{NoteVaultError, Result};

/// What an item's `content` string holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Absolute path to a file copied into the vault.
    ImportedFile,
    /// Free-form text.
    Text,
    /// A URL.
    Link,
    /// A plaintext secret.
    Secret,
}

/// Static per-category behaviour.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTraits {
    /// Position in the on-disk enumeration.
    pub index: u8,
    /// Human-readable label, also matched by search.
    pub label: &'static str,
    pub content_kind: ContentKind,
}

/// The fixed set of item categories.
///
/// Serialized as its integer index: Photo=0, Document=1, TextNote=2,
/// Website=3, Password=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Category {
    Photo,
    Document,
    TextNote,
    Website,
    Password,
}

impl Category {
    /// Every category, in wire order.
    pub const ALL: [Category; 5] = [
        Category::Photo,
        Category::Document,
        Category::TextNote,
        Category::Website,
        Category::Password,
    ];

    pub const fn traits(self) -> CategoryTraits {
        match self {
            Category::Photo => CategoryTraits {
                index: 0,
                label: "Photo",
                content_kind: ContentKind::ImportedFile,
            },
            Category::Document => CategoryTraits {
                index: 1,
                label: "Document",
                content_kind: ContentKind::ImportedFile,
            },
            Category::TextNote => CategoryTraits {
                index: 2,
                label: "Text Note",
                content_kind: ContentKind::Text,
            },
            Category::Website => CategoryTraits {
                index: 3,
                label: "Website",
                content_kind: ContentKind::Link,
            },
            Category::Password => CategoryTraits {
                index: 4,
                label: "Password",
                content_kind: ContentKind::Secret,
            },
        }
    }

    pub const fn index(self) -> u8 {
        self.traits().index
    }

    pub const fn label(self) -> &'static str {
        self.traits().label
    }

    pub const fn content_kind(self) -> ContentKind {
        self.traits().content_kind
    }

    /// Whether items of this category are backed by an imported file.
    pub const fn requires_file(self) -> bool {
        matches!(self.content_kind(), ContentKind::ImportedFile)
    }

    /// Look a category up by its wire index.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.index() == index)
    }

    /// Check `content` against this category's rule.
    fn validate_content(self, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(NoteVaultError::InvalidItem(format!(
                "{} content cannot be empty",
                self.label()
            )));
        }
        match self.content_kind() {
            ContentKind::Link if content.chars().any(char::is_whitespace) => {
                Err(NoteVaultError::InvalidItem(format!(
                    "'{content}' is not a valid link — it contains whitespace"
                )))
            }
            ContentKind::ImportedFile
            | ContentKind::Text
            | ContentKind::Link
            | ContentKind::Secret => Ok(()),
        }
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> Self {
        category.index()
    }
}

impl TryFrom<u8> for Category {
    type Error = String;

    fn try_from(index: u8) -> std::result::Result<Self, Self::Error> {
        Self::from_index(index).ok_or_else(|| format!("unknown category index {index}"))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = NoteVaultError;

    /// Accepts labels case-insensitively, ignoring spaces, dashes and
    /// underscores (`text-note`, `TextNote`, `text note`), plus a few
    /// short aliases.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "photo" | "image" => Ok(Category::Photo),
            "document" | "doc" => Ok(Category::Document),
            "textnote" | "note" | "text" => Ok(Category::TextNote),
            "website" | "link" | "url" => Ok(Category::Website),
            "password" | "pw" => Ok(Category::Password),
            _ => Err(NoteVaultError::CommandFailed(format!(
                "unknown category '{s}' — use photo, document, text-note, website or password"
            ))),
        }
    }
}

/// A single entry in the vault catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredItem {
    /// Opaque unique id, assigned once by the catalog.
    pub id: String,

    pub title: String,

    pub category: Category,

    /// Meaning depends on `category`; see `ContentKind`.
    pub content: String,

    /// When the item was created. Never changes.
    pub stored_date: DateTime<Utc>,
}

impl StoredItem {
    /// Build an item stamped with the current time, validating its fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: Category,
        content: impl Into<String>,
    ) -> Result<Self> {
        let item = Self {
            id: id.into(),
            title: title.into(),
            category,
            content: content.into(),
            stored_date: Utc::now(),
        };
        item.validate()?;
        Ok(item)
    }

    /// Enforce the non-empty title/content rules and the category rule.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(NoteVaultError::InvalidItem("id cannot be empty".into()));
        }
        if self.title.trim().is_empty() {
            return Err(NoteVaultError::InvalidItem("title cannot be empty".into()));
        }
        self.category.validate_content(&self.content)
    }

    /// Case-insensitive substring match on title, content and category
    /// label. `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.category.label().to_lowercase().contains(needle)
    }
}
