//! On-disk formats for the credential and catalog files.
//!
//! ```text
//! credential    <64 lowercase hex chars>          (no newline, no metadata)
//! catalog.json  [ {"id", "title", "category", "content", "storedDate"}, ... ]
//! ```
//!
//! Both files are rewritten wholesale. Reads report problems as
//! `StorageRead` so the caller can decide to fall back to "absent".

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::errors::{NoteVaultError, Result};

use super::item::StoredItem;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// Read the stored digest.
///
/// `Ok(None)` when the file does not exist. A file that exists but does
/// not hold a 64-char hex digest is a `StorageRead` error.
pub fn read_credential(path: &Path) -> Result<Option<String>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(read_error(path, e)),
    };

    let digest = raw.trim();
    if digest.len() != DIGEST_HEX_LEN || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(read_error(path, "not a SHA-256 hex digest"));
    }

    Ok(Some(digest.to_ascii_lowercase()))
}

/// Overwrite the credential file with `digest`. Owner-only on Unix.
pub fn write_credential(path: &Path, digest: &str) -> Result<()> {
    write_atomic(path, digest.as_bytes(), true)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Read the catalog document.
///
/// `Ok(None)` when the file does not exist; `StorageRead` when it
/// exists but cannot be read or parsed, holds an invalid item, or
/// repeats an id.
pub fn read_catalog(path: &Path) -> Result<Option<Vec<StoredItem>>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(read_error(path, e)),
    };

    let items: Vec<StoredItem> =
        serde_json::from_slice(&data).map_err(|e| read_error(path, format!("catalog JSON: {e}")))?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        item.validate().map_err(|e| read_error(path, format!("item '{}': {e}", item.id)))?;
        if !seen.insert(item.id.as_str()) {
            return Err(read_error(path, format!("duplicate item id '{}'", item.id)));
        }
    }

    Ok(Some(items))
}

/// Serialize `items` as one JSON array and overwrite the catalog file.
pub fn write_catalog(path: &Path, items: &[StoredItem]) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(items)
        .map_err(|e| NoteVaultError::SerializationError(format!("catalog: {e}")))?;

    write_atomic(path, &bytes, false)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write `data` to `path` via a temp file in the same directory and a
/// rename, so a reader sees either the old or the new file.
///
/// Every failure is reported as `StorageWrite` for `path`.
pub(crate) fn write_atomic(path: &Path, data: &[u8], owner_only: bool) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(parent).map_err(|e| NoteVaultError::write(path, e))?;

    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let result = fs::write(&tmp_path, data)
        .and_then(|()| {
            if owner_only {
                restrict_permissions(&tmp_path)
            } else {
                Ok(())
            }
        })
        .and_then(|()| fs::rename(&tmp_path, path));

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(NoteVaultError::write(path, e));
    }

    Ok(())
}

/// Restrict a file to owner read/write. No-op off Unix.
pub(crate) fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

fn read_error(path: &Path, reason: impl ToString) -> NoteVaultError {
    NoteVaultError::StorageRead {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::item::Category;
    use tempfile::TempDir;

    const DIGEST: &str = "6ca13d52ca70c883e0f0bb101e425a89e8624de51db2d2392593af6a84118090";

    #[test]
    fn missing_files_read_as_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_credential(&dir.path().join("credential"))
            .unwrap()
            .is_none());
        assert!(read_catalog(&dir.path().join("catalog.json"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn credential_file_holds_only_the_digest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credential");

        write_credential(&path, DIGEST).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), DIGEST);
        assert_eq!(read_credential(&path).unwrap().as_deref(), Some(DIGEST));
    }

    #[test]
    fn garbage_credential_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credential");
        fs::write(&path, "not-a-digest").unwrap();

        let err = read_credential(&path).unwrap_err();
        assert!(matches!(err, NoteVaultError::StorageRead { .. }));
    }

    #[test]
    fn malformed_catalog_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{ this is not json").unwrap();

        let err = read_catalog(&path).unwrap_err();
        assert!(matches!(err, NoteVaultError::StorageRead { .. }));
    }

    #[test]
    fn catalog_is_a_top_level_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        let items = vec![
            StoredItem::new("2", "Blog", Category::Website, "https://example.com").unwrap(),
            StoredItem::new("1", "Groceries", Category::TextNote, "milk").unwrap(),
        ];

        write_catalog(&path, &items).unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["category"], 3);
        assert_eq!(array[1]["category"], 2);

        assert_eq!(read_catalog(&path).unwrap().unwrap(), items);
    }

    #[test]
    fn catalog_with_repeated_id_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        let items = vec![
            StoredItem::new("7", "a", Category::TextNote, "one").unwrap(),
            StoredItem::new("7", "b", Category::TextNote, "two").unwrap(),
        ];
        write_catalog(&path, &items).unwrap();

        let err = read_catalog(&path).unwrap_err();
        assert!(
            matches!(&err, NoteVaultError::StorageRead { reason, .. } if reason.contains("duplicate"))
        );
    }

    #[test]
    fn catalog_with_invalid_item_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        let mut item = StoredItem::new("1", "Link", Category::Website, "https://a.example").unwrap();
        item.content = "not a url".into();
        write_catalog(&path, &[item]).unwrap();

        let err = read_catalog(&path).unwrap_err();
        assert!(matches!(err, NoteVaultError::StorageRead { .. }));
    }

    #[test]
    fn write_atomic_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("catalog.json");

        write_catalog(&path, &[]).unwrap();

        let names: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["catalog.json".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn credential_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credential");
        write_credential(&path, DIGEST).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
