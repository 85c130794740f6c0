//! The item catalog and its JSON persistence.
//!
//! `VaultCatalog` owns the in-memory list of `StoredItem`s, newest
//! first. Every mutation rewrites the whole catalog file; the list in
//! memory is the source of truth and the file is its mirror.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::errors::{NoteVaultError, Result};

use super::format;
use super::item::{Category, StoredItem};

/// The main catalog handle. Create one with `VaultCatalog::load`.
#[derive(Debug)]
pub struct VaultCatalog {
    /// Path to the catalog JSON file.
    path: PathBuf,

    /// Items in display order, newest first.
    items: Vec<StoredItem>,
}

impl VaultCatalog {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Load the catalog stored at `path`.
    ///
    /// A missing file is the normal first-run state and yields an empty
    /// catalog. So does a file that cannot be read or parsed: the
    /// problem is logged and the catalog starts empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = read_or_empty(&path);
        Self { path, items }
    }

    /// Discard the in-memory list and read the file again.
    pub fn reload(&mut self) {
        self.items = read_or_empty(&self.path);
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Insert `item` at the front and persist.
    ///
    /// The item must be valid and its id must not already be in use.
    /// If the write fails the item stays in memory and the error is
    /// returned; memory and disk differ until the next successful write.
    pub fn add(&mut self, item: StoredItem) -> Result<()> {
        item.validate()?;
        if self.contains(&item.id) {
            return Err(NoteVaultError::DuplicateItemId(item.id));
        }

        debug!(id = %item.id, category = %item.category, "adding item");
        self.items.insert(0, item);
        self.persist()
    }

    /// Build a new item with a fresh id and the current time, add it,
    /// and return a copy of it.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        category: Category,
        content: impl Into<String>,
    ) -> Result<StoredItem> {
        let item = StoredItem::new(self.next_id(), title, category, content)?;
        self.add(item.clone())?;
        Ok(item)
    }

    /// Remove the item with `id` and persist.
    ///
    /// Returns the removed item, or `None` if no item had that id. An
    /// unknown id leaves both memory and the file untouched.
    pub fn remove(&mut self, id: &str) -> Result<Option<StoredItem>> {
        let Some(pos) = self.items.iter().position(|i| i.id == id) else {
            debug!(id, "remove: no such item");
            return Ok(None);
        };

        let removed = self.items.remove(pos);
        debug!(id, "removed item");
        self.persist()?;
        Ok(Some(removed))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Items whose title, content or category label contain `query`,
    /// ignoring case, in catalog order. An empty query matches all;
    /// whitespace is matched like any other character.
    pub fn search(&self, query: &str) -> Vec<&StoredItem> {
        if query.is_empty() {
            return self.items.iter().collect();
        }
        let needle = query.to_lowercase();
        self.items.iter().filter(|i| i.matches(&needle)).collect()
    }

    /// Number of items per category. Every category is present.
    pub fn tally(&self) -> BTreeMap<Category, usize> {
        let mut counts: BTreeMap<Category, usize> =
            Category::ALL.into_iter().map(|c| (c, 0)).collect();
        for item in &self.items {
            *counts.entry(item.category).or_insert(0) += 1;
        }
        counts
    }

    /// Look up a single item.
    pub fn get(&self, id: &str) -> Option<&StoredItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Returns `true` if an item with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All items, newest first.
    pub fn items(&self) -> &[StoredItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the path to the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Rewrite the catalog file from the in-memory list.
    fn persist(&self) -> Result<()> {
        format::write_catalog(&self.path, &self.items)?;
        debug!(path = %self.path.display(), items = self.items.len(), "catalog persisted");
        Ok(())
    }

    /// A millisecond timestamp id, bumped past any id already in use.
    fn next_id(&self) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let id = stamp.to_string();
            if !self.contains(&id) {
                return id;
            }
            stamp += 1;
        }
    }
}

fn read_or_empty(path: &Path) -> Vec<StoredItem> {
    match format::read_catalog(path) {
        Ok(Some(items)) => {
            debug!(path = %path.display(), items = items.len(), "catalog loaded");
            items
        }
        Ok(None) => {
            debug!(path = %path.display(), "no catalog yet, starting empty");
            Vec::new()
        }
        Err(e) => {
            warn!("starting with an empty catalog: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog() -> (TempDir, VaultCatalog) {
        let dir = TempDir::new().unwrap();
        let catalog = VaultCatalog::load(dir.path().join("catalog.json"));
        (dir, catalog)
    }

    #[test]
    fn new_items_go_to_the_front() {
        let (_dir, mut catalog) = catalog();
        catalog
            .create("first", Category::TextNote, "one")
            .unwrap();
        catalog
            .create("second", Category::TextNote, "two")
            .unwrap();

        let titles: Vec<_> = catalog.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["second", "first"]);
    }

    #[test]
    fn generated_ids_are_unique() {
        let (_dir, mut catalog) = catalog();
        for i in 0..20 {
            catalog
                .create(format!("note {i}"), Category::TextNote, "body")
                .unwrap();
        }

        let mut ids: Vec<_> = catalog.items().iter().map(|i| i.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let (_dir, mut catalog) = catalog();
        let item = StoredItem::new("42", "a", Category::TextNote, "x").unwrap();
        catalog.add(item.clone()).unwrap();

        let err = catalog.add(item).unwrap_err();
        assert!(matches!(err, NoteVaultError::DuplicateItemId(id) if id == "42"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn add_rejects_invalid_item() {
        let (_dir, mut catalog) = catalog();
        let mut item = StoredItem::new("1", "a", Category::TextNote, "x").unwrap();
        item.content.clear();

        assert!(catalog.add(item).is_err());
        assert!(catalog.is_empty());
        assert!(!catalog.path().exists());
    }

    #[test]
    fn search_is_case_insensitive_and_ordered() {
        let (_dir, mut catalog) = catalog();
        catalog.create("Wifi", Category::Password, "secret1").unwrap();
        catalog.create("Recipes", Category::TextNote, "WIFI at cafe").unwrap();
        catalog.create("Bank", Category::Website, "https://bank.example").unwrap();

        let hits: Vec<_> = catalog.search("wIfI").iter().map(|i| i.title.clone()).collect();
        assert_eq!(hits, ["Recipes", "Wifi"]);

        assert_eq!(catalog.search("").len(), 3);
        assert!(catalog.search("   ").is_empty());
        assert!(catalog.search("nothing").is_empty());
    }

    #[test]
    fn search_does_not_trim_whitespace() {
        let (_dir, mut catalog) = catalog();
        catalog.create("Bank", Category::Website, "https://bank.example").unwrap();
        catalog.create("Home Wifi", Category::TextNote, "router on the shelf").unwrap();

        let titles = |query: &str| -> Vec<String> {
            catalog.search(query).iter().map(|i| i.title.clone()).collect()
        };
        assert_eq!(titles(" "), ["Home Wifi"]);
        assert_eq!(titles("e "), ["Home Wifi"]);
        assert_eq!(titles("e"), ["Home Wifi", "Bank"]);
    }

    #[test]
    fn search_matches_category_label() {
        let (_dir, mut catalog) = catalog();
        catalog.create("Shopping", Category::TextNote, "eggs").unwrap();
        catalog.create("Mail", Category::Password, "pw").unwrap();

        let hits = catalog.search("text note");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Shopping");
    }

    #[test]
    fn tally_always_lists_every_category() {
        let (_dir, mut catalog) = catalog();
        let empty = catalog.tally();
        assert_eq!(empty.len(), 5);
        assert!(empty.values().all(|&n| n == 0));

        catalog.create("a", Category::Password, "x").unwrap();
        catalog.create("b", Category::Password, "y").unwrap();
        catalog.create("c", Category::Website, "https://c").unwrap();

        let tally = catalog.tally();
        assert_eq!(tally.len(), 5);
        assert_eq!(tally[&Category::Password], 2);
        assert_eq!(tally[&Category::Website], 1);
        assert_eq!(tally[&Category::Photo], 0);
        assert_eq!(tally.values().sum::<usize>(), catalog.len());
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let (_dir, mut catalog) = catalog();
        catalog.create("a", Category::TextNote, "x").unwrap();
        let before = std::fs::read(catalog.path()).unwrap();

        assert!(catalog.remove("missing").unwrap().is_none());

        assert_eq!(catalog.len(), 1);
        assert_eq!(std::fs::read(catalog.path()).unwrap(), before);
    }

    #[test]
    fn reload_discards_unsaved_state() {
        let (_dir, mut catalog) = catalog();
        catalog.create("kept", Category::TextNote, "x").unwrap();
        std::fs::write(catalog.path(), "[]").unwrap();

        catalog.reload();
        assert!(catalog.is_empty());
    }

    #[test]
    fn failed_persist_keeps_item_in_memory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let mut catalog = VaultCatalog::load(blocker.join("catalog.json"));

        let err = catalog.create("a", Category::TextNote, "x").unwrap_err();
        assert!(matches!(err, NoteVaultError::StorageWrite { .. }));
        assert_eq!(catalog.len(), 1);
    }
}
